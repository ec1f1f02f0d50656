//! Image decoding WASM bindings.
//!
//! # Functions
//!
//! - [`decode_image`] - Decode PNG/JPEG/BMP/GIF bytes picked by the user
//! - [`is_supported_file_name`] - Check a file name against the open filter
//! - [`open_extensions`] - Extensions for an `<input accept>` attribute
//!
//! # Example
//!
//! ```typescript
//! import { decode_image, open_extensions } from '@tiltview/wasm';
//!
//! input.accept = open_extensions().map((e) => '.' + e).join(',');
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_image(file.name, bytes);
//! ```

use crate::types::JsRasterImage;
use std::path::Path;
use tiltview_core::decode;
use wasm_bindgen::prelude::*;

/// Decode image bytes loaded from a file called `name`.
///
/// EXIF orientation is applied. Images with alpha decode to 4 channels,
/// others to 3.
///
/// # Errors
///
/// Returns an error string naming the file if the bytes do not decode. The
/// string mentions the path encoding when `name` contains Japanese text.
#[wasm_bindgen]
pub fn decode_image(name: &str, bytes: &[u8]) -> Result<JsRasterImage, JsValue> {
    decode::decode_named(name, bytes)
        .map(JsRasterImage::from_raster)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// True if `name` has an extension the viewer can open.
#[wasm_bindgen]
pub fn is_supported_file_name(name: &str) -> bool {
    decode::is_supported_extension(Path::new(name))
}

/// Extensions accepted by the open dialog, without dots.
#[wasm_bindgen]
pub fn open_extensions() -> js_sys::Array {
    decode::OPEN_EXTENSIONS
        .iter()
        .map(|e| JsValue::from_str(e))
        .collect()
}


/// WASM-specific tests that require JsValue.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_decode_invalid_bytes() {
        assert!(decode_image("x.png", &[0, 1, 2, 3]).is_err());
    }

    #[wasm_bindgen_test]
    fn test_open_extensions() {
        assert_eq!(open_extensions().length(), 5);
    }
}
