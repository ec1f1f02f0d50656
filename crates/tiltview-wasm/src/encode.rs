//! Image encoding WASM bindings.
//!
//! # Example
//!
//! ```typescript
//! import { encode_image, export_mime_type } from '@tiltview/wasm';
//!
//! const bytes = encode_image(exported, 'png');
//! const blob = new Blob([bytes], { type: export_mime_type('png') });
//! ```

use crate::types::JsRasterImage;
use tiltview_core::encode::{self, EncodeError, ExportFormat};
use wasm_bindgen::prelude::*;

/// Encode an image as `png`, `jpg`/`jpeg` or `bmp`.
///
/// JPEG drops the alpha channel.
#[wasm_bindgen]
pub fn encode_image(image: &JsRasterImage, format: &str) -> Result<Vec<u8>, JsValue> {
    encode_inner(image, format).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// MIME type for an export format name, or `undefined` if unknown.
#[wasm_bindgen]
pub fn export_mime_type(format: &str) -> Option<String> {
    ExportFormat::from_extension(format).map(|f| f.mime_type().to_string())
}

pub(crate) fn parse_format(format: &str) -> Result<ExportFormat, EncodeError> {
    ExportFormat::from_extension(format)
        .ok_or_else(|| EncodeError::UnsupportedFormat(format.to_string()))
}

fn encode_inner(image: &JsRasterImage, format: &str) -> Result<Vec<u8>, EncodeError> {
    let format = parse_format(format)?;
    let raster = image
        .to_raster()
        .ok_or(EncodeError::InvalidDimensions {
            width: image.width(),
            height: image.height(),
        })?;
    encode::encode_image(&raster, format)
}
