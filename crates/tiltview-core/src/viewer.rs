//! Viewer state machine, independent of any UI toolkit.
//!
//! ```text
//!          open/load ok              open/load ok (resets transform)
//!  Empty ───────────────▶ Loaded ◀──────────────────┐
//!    ▲                      │  └────────────────────┘
//!    └──────── clear ───────┘
//! ```
//!
//! A failed open leaves the viewer in whatever state it was in. Zoom and
//! rotate are only valid while an image is loaded.
//!
//! The viewer keeps the decoded original and a [`TransformState`]. Both
//! [`Viewer::preview`] and [`Viewer::export`] recompute from that original
//! on every call; nothing is ever derived from a previously transformed
//! raster.

use std::path::Path;

use log::{debug, info};
use thiserror::Error;

use crate::config::{ConfigError, ViewerConfig};
use crate::decode::{self, DecodeError};
use crate::encode::{self, EncodeError, ExportFormat};
use crate::messages::Label;
use crate::raster::RasterImage;
use crate::transform::{render_export, render_preview, TransformError, TransformState};

/// Errors surfaced by viewer actions. None of them change the viewer state.
#[derive(Debug, Error)]
pub enum ViewerError {
    /// The action needs a loaded image.
    #[error("No image is loaded")]
    NoImage,

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Transform(#[from] TransformError),
}

/// Coarse viewer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerState {
    Empty,
    Loaded,
}

#[derive(Debug, Clone)]
struct Document {
    file_name: String,
    original: RasterImage,
}

/// An image viewer holding at most one image.
#[derive(Debug, Clone)]
pub struct Viewer {
    config: ViewerConfig,
    document: Option<Document>,
    transform: TransformState,
    zoom_percent: u32,
}

impl Default for Viewer {
    fn default() -> Self {
        Self::with_checked_config(ViewerConfig::default())
    }
}

impl Viewer {
    /// Create an empty viewer.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] from [`ViewerConfig::validate`] if the zoom
    /// range or rotation step is unusable.
    pub fn new(config: ViewerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_checked_config(config))
    }

    fn with_checked_config(config: ViewerConfig) -> Self {
        let zoom_percent = config.zoom_default;
        Self {
            transform: TransformState::identity().with_zoom_percent(zoom_percent),
            config,
            document: None,
            zoom_percent,
        }
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn state(&self) -> ViewerState {
        if self.document.is_some() {
            ViewerState::Loaded
        } else {
            ViewerState::Empty
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.document.is_some()
    }

    /// Current rotation and scale.
    pub fn transform(&self) -> TransformState {
        self.transform
    }

    /// Current slider position in percent.
    pub fn zoom_percent(&self) -> u32 {
        self.zoom_percent
    }

    /// File name of the loaded image.
    pub fn file_name(&self) -> Option<&str> {
        self.document.as_ref().map(|d| d.file_name.as_str())
    }

    /// The decoded, untransformed image.
    pub fn original(&self) -> Option<&RasterImage> {
        self.document.as_ref().map(|d| &d.original)
    }

    /// Read and decode `path`, replacing any loaded image.
    ///
    /// On failure the viewer keeps its previous image and transform.
    pub fn open(&mut self, path: &Path) -> Result<(), ViewerError> {
        let image = decode::open_image(path)?;
        self.set_document(&path.to_string_lossy(), image);
        Ok(())
    }

    /// Decode `bytes` loaded from `name`, replacing any loaded image.
    ///
    /// On failure the viewer keeps its previous image and transform.
    pub fn load(&mut self, name: &str, bytes: &[u8]) -> Result<(), ViewerError> {
        let image = decode::decode_named(name, bytes)?;
        self.set_document(name, image);
        Ok(())
    }

    /// Show an already decoded image.
    pub fn load_raster(&mut self, name: &str, image: RasterImage) -> Result<(), ViewerError> {
        if image.is_empty() || !image.is_consistent() {
            return Err(TransformError::InvalidInput("image has no pixel data".to_string()).into());
        }
        self.set_document(name, image);
        Ok(())
    }

    fn set_document(&mut self, name: &str, original: RasterImage) {
        let file_name = decode::file_name(name).to_string();
        info!(
            "loaded {} ({}x{})",
            file_name, original.width, original.height
        );
        self.document = Some(Document {
            file_name,
            original,
        });
        self.reset_transform();
    }

    /// Drop the image and reset zoom and rotation.
    pub fn clear(&mut self) {
        if let Some(doc) = self.document.take() {
            info!("cleared {}", doc.file_name);
        }
        self.reset_transform();
    }

    fn reset_transform(&mut self) {
        self.zoom_percent = self.config.zoom_default;
        self.transform = TransformState::identity().with_zoom_percent(self.zoom_percent);
    }

    /// Set the zoom slider. The value is clamped to the configured range and
    /// the clamped value is returned.
    pub fn set_zoom(&mut self, percent: u32) -> Result<u32, ViewerError> {
        self.require_loaded()?;
        let percent = self.config.clamp_zoom(percent);
        self.zoom_percent = percent;
        self.transform = self.transform.with_zoom_percent(percent);
        debug!("zoom {}%", percent);
        Ok(percent)
    }

    /// Rotate by `delta` degrees (positive = counter-clockwise). Returns the
    /// accumulated angle in [0, 360).
    pub fn rotate(&mut self, delta: i32) -> Result<i32, ViewerError> {
        self.require_loaded()?;
        self.transform = self.transform.rotated(delta);
        debug!(
            "rotate {:+} -> {}",
            delta,
            self.transform.rotation_degrees()
        );
        Ok(self.transform.rotation_degrees())
    }

    /// Rotate counter-clockwise by one step.
    pub fn rotate_left(&mut self) -> Result<i32, ViewerError> {
        self.rotate(self.config.rotate_step)
    }

    /// Rotate clockwise by one step.
    pub fn rotate_right(&mut self) -> Result<i32, ViewerError> {
        self.rotate(-self.config.rotate_step)
    }

    /// The bitmap to show on screen, over an opaque white background.
    pub fn preview(&self) -> Result<RasterImage, ViewerError> {
        let doc = self.require_loaded()?;
        Ok(render_preview(
            &doc.original,
            &self.transform,
            self.config.interpolation,
        )?)
    }

    /// The raster to write to disk: always RGBA, exposed areas transparent.
    pub fn export(&self) -> Result<RasterImage, ViewerError> {
        let doc = self.require_loaded()?;
        Ok(render_export(
            &doc.original,
            &self.transform,
            self.config.interpolation,
        )?)
    }

    /// Encode the export raster.
    pub fn export_bytes(&self, format: ExportFormat) -> Result<Vec<u8>, ViewerError> {
        let image = self.export()?;
        Ok(encode::encode_image(&image, format)?)
    }

    /// Encode the export raster in the format implied by `path` and write it.
    pub fn save(&self, path: &Path) -> Result<ExportFormat, ViewerError> {
        let image = self.export()?;
        Ok(encode::save_image(path, &image)?)
    }

    /// Navigation line under the image.
    pub fn status_text(&self) -> String {
        match &self.document {
            Some(doc) => self.config.locale.showing(&doc.file_name),
            None => self.config.locale.label(Label::OpenPrompt).to_string(),
        }
    }

    /// Text next to the zoom slider.
    pub fn zoom_label(&self) -> String {
        self.config.locale.zoom_label(self.zoom_percent)
    }

    /// Text for the error message box shown after a failed action.
    pub fn error_message(&self, err: &ViewerError) -> String {
        match err {
            ViewerError::Decode(DecodeError::Unreadable {
                file_name,
                cjk_path,
                ..
            }) => self.config.locale.load_error(file_name, *cjk_path),
            other => other.to_string(),
        }
    }

    fn require_loaded(&self) -> Result<&Document, ViewerError> {
        self.document.as_ref().ok_or(ViewerError::NoImage)
    }
}
