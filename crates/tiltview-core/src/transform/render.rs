//! Preview and export render paths.
//!
//! Both paths run the same engine with the same [`TransformState`], so the
//! exported file always matches what the viewer shows. They differ only in
//! the fill color for exposed background:
//! - **Preview**: opaque white
//! - **Export**: fully transparent, which requires an alpha channel

use super::types::{Interpolation, TransformError, TransformState};
use super::warp::apply_with;
use crate::raster::{ChannelLayout, Pixel, RasterImage};

/// Render the on-screen bitmap for `display` under `state`.
///
/// Exposed areas are opaque white in the source's own channel layout.
pub fn render_preview(
    display: &RasterImage,
    state: &TransformState,
    filter: Interpolation,
) -> Result<RasterImage, TransformError> {
    let fill = Pixel::WHITE.to_layout(display.layout);
    apply_with(display, state, fill, filter)
}

/// Render the raster written to disk for `original` under `state`.
///
/// RGB sources gain an opaque alpha channel before the transform so that
/// areas exposed by rotation come out with alpha 0.
pub fn render_export(
    original: &RasterImage,
    state: &TransformState,
    filter: Interpolation,
) -> Result<RasterImage, TransformError> {
    match original.layout {
        ChannelLayout::Rgba => apply_with(original, state, Pixel::TRANSPARENT, filter),
        ChannelLayout::Rgb => {
            apply_with(&original.with_alpha(), state, Pixel::TRANSPARENT, filter)
        }
    }
}
