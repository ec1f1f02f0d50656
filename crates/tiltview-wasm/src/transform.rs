//! WASM bindings for the rotate/scale transform engine.
//!
//! The preview and export bindings wrap the same core paths the viewer uses,
//! so a shell that manages its own state still gets identical output.

use crate::types::{pixel_from_slice, JsRasterImage};
use tiltview_core::raster::RasterImage;
use tiltview_core::transform::{self, Interpolation, TransformError, TransformState};
use wasm_bindgen::prelude::*;

/// Rotate and scale an image about its center onto an expanded canvas.
///
/// # Arguments
///
/// * `image` - Source image (never modified)
/// * `angle_degrees` - Rotation in degrees, positive = counter-clockwise
/// * `scale` - Uniform scale factor, must be positive
/// * `fill` - Background color: 3 bytes for RGB images, 4 for RGBA
///
/// # Example (TypeScript)
///
/// ```typescript
/// const rotated = apply_transform(source, 45, 1.0, new Uint8Array([255, 255, 255]));
/// ```
#[wasm_bindgen]
pub fn apply_transform(
    image: &JsRasterImage,
    angle_degrees: i32,
    scale: f64,
    fill: &[u8],
) -> Result<JsRasterImage, JsValue> {
    transform_inner(image, angle_degrees, scale, fill)
        .map(JsRasterImage::from_raster)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Preview path: opaque white background.
#[wasm_bindgen]
pub fn render_preview(
    image: &JsRasterImage,
    angle_degrees: i32,
    scale: f64,
) -> Result<JsRasterImage, JsValue> {
    let src = source(image).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let state = TransformState::new(angle_degrees, scale);
    transform::render_preview(&src, &state, Interpolation::Bilinear)
        .map(JsRasterImage::from_raster)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Export path: RGBA output with a transparent background.
#[wasm_bindgen]
pub fn render_export(
    image: &JsRasterImage,
    angle_degrees: i32,
    scale: f64,
) -> Result<JsRasterImage, JsValue> {
    let src = source(image).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let state = TransformState::new(angle_degrees, scale);
    transform::render_export(&src, &state, Interpolation::Bilinear)
        .map(JsRasterImage::from_raster)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Canvas size for a transform, as `[width, height]`.
///
/// Fails if a side would not fit in 32 bits.
#[wasm_bindgen]
pub fn compute_canvas_size(
    width: u32,
    height: u32,
    angle_degrees: i32,
    scale: f64,
) -> Result<Vec<u32>, JsValue> {
    canvas_inner(width, height, angle_degrees, scale)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

fn canvas_inner(
    width: u32,
    height: u32,
    angle_degrees: i32,
    scale: f64,
) -> Result<Vec<u32>, TransformError> {
    let (w, h) = transform::compute_canvas_size(width, height, angle_degrees, scale)?;
    Ok(vec![w, h])
}

fn source(image: &JsRasterImage) -> Result<RasterImage, TransformError> {
    image.to_raster().ok_or_else(|| {
        TransformError::InvalidInput(format!("unsupported channel count {}", image.channels()))
    })
}

fn transform_inner(
    image: &JsRasterImage,
    angle_degrees: i32,
    scale: f64,
    fill: &[u8],
) -> Result<RasterImage, TransformError> {
    let src = source(image)?;
    let fill = pixel_from_slice(fill).ok_or_else(|| {
        TransformError::InvalidInput(format!("fill must have 3 or 4 bytes, got {}", fill.len()))
    })?;
    transform::apply(&src, angle_degrees, scale, fill)
}
