//! `log` backend that writes to the browser console.
//!
//! Records from `tiltview-core` go through the `log` facade; this module
//! routes them to `console.error/warn/log/debug` by level.

use log::{Level, LevelFilter, Log, Metadata, Record};
use wasm_bindgen::JsValue;

struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = JsValue::from_str(&format_line(record));
        match record.level() {
            Level::Error => web_sys::console::error_1(&line),
            Level::Warn => web_sys::console::warn_1(&line),
            Level::Info => web_sys::console::log_1(&line),
            Level::Debug | Level::Trace => web_sys::console::debug_1(&line),
        }
    }

    fn flush(&self) {}
}

/// Install the console logger. Calling it again only updates the level.
pub fn install(level: LevelFilter) {
    // A second install fails with SetLoggerError; the first logger stays.
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(level);
}

fn format_line(record: &Record) -> String {
    format!("[{:>5}] {}: {}", record.level(), record.target(), record.args())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_line() {
        let line = format_line(
            &Record::builder()
                .args(format_args!("loaded cat.png (8x4)"))
                .level(Level::Info)
                .target("tiltview_core::viewer")
                .build(),
        );
        assert_eq!(line, "[ INFO] tiltview_core::viewer: loaded cat.png (8x4)");
    }
}
