//! Viewer configuration.
//!
//! There is no config file; shells build a [`ViewerConfig`] (or deserialize
//! one from JSON) and hand it to the viewer.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::messages::Locale;
use crate::transform::Interpolation;

/// Errors for inconsistent configuration values.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid zoom range: {min}%..={max}% with default {default}%")]
    InvalidZoomRange { min: u32, max: u32, default: u32 },

    #[error("Rotation step must be non-zero")]
    ZeroRotationStep,
}

/// Settings for the zoom slider, rotate buttons and rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Lowest zoom in percent (slider minimum).
    pub zoom_min: u32,
    /// Highest zoom in percent (slider maximum).
    pub zoom_max: u32,
    /// Zoom after loading or clearing.
    pub zoom_default: u32,
    /// Slider tick interval in percent.
    pub zoom_step: u32,
    /// Degrees added by rotate-left and subtracted by rotate-right.
    pub rotate_step: i32,
    /// Resampling filter for preview and export.
    pub interpolation: Interpolation,
    /// Language of status and error text.
    pub locale: Locale,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            zoom_min: 50,
            zoom_max: 200,
            zoom_default: 100,
            zoom_step: 10,
            rotate_step: 45,
            interpolation: Interpolation::Bilinear,
            locale: Locale::Japanese,
        }
    }
}

impl ViewerConfig {
    /// Check that the zoom range is non-empty, positive and contains the
    /// default, and that rotating actually rotates.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.zoom_min == 0
            || self.zoom_min > self.zoom_max
            || !(self.zoom_min..=self.zoom_max).contains(&self.zoom_default)
        {
            return Err(ConfigError::InvalidZoomRange {
                min: self.zoom_min,
                max: self.zoom_max,
                default: self.zoom_default,
            });
        }
        if self.rotate_step == 0 {
            return Err(ConfigError::ZeroRotationStep);
        }
        Ok(())
    }

    /// Clamp a requested zoom into the configured range. On an inverted
    /// range the maximum wins.
    pub fn clamp_zoom(&self, percent: u32) -> u32 {
        percent.max(self.zoom_min).min(self.zoom_max)
    }
}
