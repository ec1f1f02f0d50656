//! Opening images by path or by display name.
//!
//! Read failures and decode failures are reported separately. When a file
//! exists but does not decode and its path contains Japanese or CJK
//! characters, the error carries a hint about the path encoding.

use std::path::Path;

use log::{info, warn};

use super::bytes::decode_image;
use super::{DecodeError, OPEN_EXTENSIONS};
use crate::raster::RasterImage;

/// Read and decode the image at `path`.
///
/// # Errors
///
/// `DecodeError::Io` if the file cannot be read, `DecodeError::Unreadable`
/// if it was read but is not a decodable image.
pub fn open_image(path: &Path) -> Result<RasterImage, DecodeError> {
    let display = path.to_string_lossy();
    let bytes = std::fs::read(path).map_err(|e| {
        warn!("open_image: read error for {}: {}", display, e);
        DecodeError::Io {
            path: display.to_string(),
            message: e.to_string(),
        }
    })?;
    decode_named(&display, &bytes)
}

/// Decode `bytes` that were loaded from `name` (a path or a file name).
///
/// Any decoding failure becomes `DecodeError::Unreadable` naming the file.
pub fn decode_named(name: &str, bytes: &[u8]) -> Result<RasterImage, DecodeError> {
    match decode_image(bytes) {
        Ok(img) => {
            info!(
                "decoded {} ({}x{}, {} channels)",
                file_name(name),
                img.width,
                img.height,
                img.channels()
            );
            Ok(img)
        }
        Err(e) => {
            let cjk_path = contains_cjk(name);
            warn!("decode failed for {}: {} (cjk path: {})", name, e, cjk_path);
            Err(DecodeError::Unreadable {
                file_name: file_name(name).to_string(),
                reason: e.to_string(),
                cjk_path,
            })
        }
    }
}

/// True if `text` contains Hiragana, Katakana or CJK unified ideographs.
pub fn contains_cjk(text: &str) -> bool {
    text.chars().any(|c| {
        matches!(c,
            '\u{3040}'..='\u{309F}'
            | '\u{30A0}'..='\u{30FF}'
            | '\u{4E00}'..='\u{9FAF}')
    })
}

/// Final path component of `name`, accepting both `/` and `\` separators.
pub fn file_name(name: &str) -> &str {
    name.rsplit(['/', '\\']).next().unwrap_or(name)
}

/// True if the path has one of the extensions offered by the open dialog.
pub fn is_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            OPEN_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(e))
        })
        .unwrap_or(false)
}
