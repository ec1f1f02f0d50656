//! Tiltview WASM - WebAssembly bindings for Tiltview
//!
//! This crate provides WASM bindings to expose the tiltview-core viewer and
//! transform engine to a JavaScript/TypeScript UI shell.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper types for image data
//! - `decode` - Image decoding bindings (PNG, JPEG, BMP, GIF)
//! - `encode` - Image encoding bindings (PNG, JPEG, BMP export)
//! - `transform` - Rotate/scale about the image center
//! - `viewer` - The viewer state machine behind the window's controls
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsViewer } from '@tiltview/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const viewer = new JsViewer();
//! viewer.load(file.name, new Uint8Array(await file.arrayBuffer()));
//! viewer.rotate_left();
//! const frame = viewer.preview();
//! console.log(`Preview ${frame.width}x${frame.height}`);
//! ```

use wasm_bindgen::prelude::*;

mod decode;
mod encode;
mod logger;
mod transform;
mod types;
mod viewer;

// Re-export public types
pub use decode::{decode_image, is_supported_file_name, open_extensions};
pub use encode::{encode_image, export_mime_type};
pub use transform::{apply_transform, compute_canvas_size, render_export, render_preview};
pub use types::JsRasterImage;
pub use viewer::JsViewer;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    logger::install(log::LevelFilter::Info);
}

/// Change how much of the core's logging reaches the console:
/// `error`, `warn`, `info`, `debug`, `trace` or `off`.
#[wasm_bindgen]
pub fn set_log_level(level: &str) -> bool {
    match level.parse::<log::LevelFilter>() {
        Ok(filter) => {
            log::set_max_level(filter);
            true
        }
        Err(_) => false,
    }
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
