//! Image transformation: rotation and scale about the image center.
//!
//! The engine is pure: every call returns a new raster and never mutates its
//! input. Callers keep the original image and a [`TransformState`] and
//! recompute from the original on every redraw or export, so repeated edits
//! never resample already-resampled pixels.
//!
//! # Coordinate System
//!
//! - Rotation angles are integer degrees, positive = counter-clockwise
//! - Pixel centers are at integer coordinates, origin top-left
//! - Scale is uniform, 1.0 = 100%

mod affine;
mod render;
mod types;
mod warp;

pub use affine::Affine;
pub use render::{render_export, render_preview};
pub use types::{Interpolation, TransformError, TransformState};
pub use warp::{apply, apply_filtered, apply_with, compute_canvas_size, rotation_matrix};
