//! Core types for transform operations.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for transform operations.
#[derive(Debug, Error, PartialEq)]
pub enum TransformError {
    /// The engine was called with degenerate parameters.
    #[error("Invalid transform input: {0}")]
    InvalidInput(String),
}

/// Interpolation filter used when resampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Interpolation {
    /// Nearest neighbor (fastest, blocky when zoomed).
    Nearest,
    /// Bilinear interpolation over the 4 nearest pixels.
    #[default]
    Bilinear,
}

/// Rotation and scale applied to the original image.
///
/// This is a plain value: the displayed and exported rasters are always
/// computed from `(original, TransformState)`, never from a previously
/// transformed raster.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransformState {
    rotation_degrees: i32,
    scale: f64,
}

impl Default for TransformState {
    fn default() -> Self {
        Self::identity()
    }
}

impl TransformState {
    /// No rotation, 100% scale.
    pub const fn identity() -> Self {
        Self {
            rotation_degrees: 0,
            scale: 1.0,
        }
    }

    /// Create a state, normalizing the angle to [0, 360).
    pub fn new(rotation_degrees: i32, scale: f64) -> Self {
        Self {
            rotation_degrees: rotation_degrees.rem_euclid(360),
            scale,
        }
    }

    /// Rotation angle in degrees, in [0, 360). Positive is counter-clockwise.
    pub fn rotation_degrees(&self) -> i32 {
        self.rotation_degrees.rem_euclid(360)
    }

    /// Uniform scale factor (1.0 = 100%).
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Scale expressed as a whole percentage.
    pub fn zoom_percent(&self) -> u32 {
        (self.scale * 100.0).round().max(0.0) as u32
    }

    /// Return a copy rotated by `delta` degrees, accumulated modulo 360.
    pub fn rotated(self, delta: i32) -> Self {
        Self::new(self.rotation_degrees.wrapping_add(delta), self.scale)
    }

    /// Return a copy with a new scale factor.
    pub fn with_scale(self, scale: f64) -> Self {
        Self { scale, ..self }
    }

    /// Return a copy with the scale set from a percentage (100 = 1.0).
    pub fn with_zoom_percent(self, percent: u32) -> Self {
        self.with_scale(percent as f64 / 100.0)
    }

    /// True when applying this state reproduces the source unchanged.
    pub fn is_identity(&self) -> bool {
        self.rotation_degrees() == 0 && (self.scale - 1.0).abs() < f64::EPSILON
    }
}
