//! WASM binding for the viewer state machine.
//!
//! A shell keeps one [`JsViewer`] per window and redraws from `preview()`
//! after every action.
//!
//! ```typescript
//! const viewer = new JsViewer({ locale: 'English' });
//! viewer.load(file.name, new Uint8Array(await file.arrayBuffer()));
//! viewer.rotate_left();
//! viewer.set_zoom(150);
//! draw(viewer.preview());
//! status.textContent = viewer.status_text();
//! ```

use crate::encode::parse_format;
use crate::types::JsRasterImage;
use tiltview_core::config::{ConfigError, ViewerConfig};
use tiltview_core::messages::Label;
use tiltview_core::viewer::{Viewer, ViewerError};
use wasm_bindgen::prelude::*;

/// Image viewer with zoom and 45-degree rotation.
#[wasm_bindgen]
pub struct JsViewer {
    inner: Viewer,
}

#[wasm_bindgen]
impl JsViewer {
    /// Create a viewer. `config` is an optional `ViewerConfig` object; missing
    /// fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the object does not deserialize or the zoom range
    /// is inconsistent.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<JsViewer, JsValue> {
        let config: ViewerConfig = if config.is_undefined() || config.is_null() {
            ViewerConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Invalid viewer config: {}", e)))?
        };
        Self::with_config(config).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Decode and show a file. On failure the previous image stays loaded
    /// and the error is the localized message-box text.
    pub fn load(&mut self, name: &str, bytes: &[u8]) -> Result<(), JsValue> {
        self.inner.load(name, bytes).map_err(|e| self.js_error(e))
    }

    /// Drop the image and reset zoom and rotation.
    pub fn clear(&mut self) {
        self.inner.clear();
    }

    /// Set zoom in percent; returns the clamped value.
    pub fn set_zoom(&mut self, percent: u32) -> Result<u32, JsValue> {
        self.inner.set_zoom(percent).map_err(|e| self.js_error(e))
    }

    /// Rotate by `delta` degrees, positive = counter-clockwise.
    pub fn rotate(&mut self, delta: i32) -> Result<i32, JsValue> {
        self.inner.rotate(delta).map_err(|e| self.js_error(e))
    }

    pub fn rotate_left(&mut self) -> Result<i32, JsValue> {
        self.inner.rotate_left().map_err(|e| self.js_error(e))
    }

    pub fn rotate_right(&mut self) -> Result<i32, JsValue> {
        self.inner.rotate_right().map_err(|e| self.js_error(e))
    }

    /// On-screen raster over a white background.
    pub fn preview(&self) -> Result<JsRasterImage, JsValue> {
        self.inner
            .preview()
            .map(JsRasterImage::from_raster)
            .map_err(|e| self.js_error(e))
    }

    /// RGBA raster with transparent corners, for saving.
    pub fn export(&self) -> Result<JsRasterImage, JsValue> {
        self.inner
            .export()
            .map(JsRasterImage::from_raster)
            .map_err(|e| self.js_error(e))
    }

    /// Encode the export raster as `png`, `jpg` or `bmp`.
    pub fn export_bytes(&self, format: &str) -> Result<Vec<u8>, JsValue> {
        let format = parse_format(format).map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.inner
            .export_bytes(format)
            .map_err(|e| self.js_error(e))
    }

    pub fn status_text(&self) -> String {
        self.inner.status_text()
    }

    pub fn zoom_label(&self) -> String {
        self.inner.zoom_label()
    }

    #[wasm_bindgen(getter)]
    pub fn zoom_percent(&self) -> u32 {
        self.inner.zoom_percent()
    }

    /// Slider minimum in percent.
    #[wasm_bindgen(getter)]
    pub fn zoom_min(&self) -> u32 {
        self.inner.config().zoom_min
    }

    /// Slider maximum in percent.
    #[wasm_bindgen(getter)]
    pub fn zoom_max(&self) -> u32 {
        self.inner.config().zoom_max
    }

    /// Slider tick interval in percent.
    #[wasm_bindgen(getter)]
    pub fn zoom_step(&self) -> u32 {
        self.inner.config().zoom_step
    }

    #[wasm_bindgen(getter)]
    pub fn rotation_degrees(&self) -> i32 {
        self.inner.transform().rotation_degrees()
    }

    #[wasm_bindgen(getter)]
    pub fn is_loaded(&self) -> bool {
        self.inner.is_loaded()
    }

    #[wasm_bindgen(getter)]
    pub fn file_name(&self) -> Option<String> {
        self.inner.file_name().map(str::to_string)
    }

    /// Localized text for a control, e.g. `label("open_button")`.
    pub fn label(&self, name: &str) -> Option<String> {
        label_by_name(name).map(|l| self.inner.config().locale.label(l).to_string())
    }
}

impl JsViewer {
    pub(crate) fn with_config(config: ViewerConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            inner: Viewer::new(config)?,
        })
    }

    fn js_error(&self, err: ViewerError) -> JsValue {
        JsValue::from_str(&self.inner.error_message(&err))
    }
}

fn label_by_name(name: &str) -> Option<Label> {
    let label = match name {
        "window_title" => Label::WindowTitle,
        "open_button" => Label::OpenButton,
        "clear_button" => Label::ClearButton,
        "rotate_left_button" => Label::RotateLeftButton,
        "rotate_right_button" => Label::RotateRightButton,
        "save_button" => Label::SaveButton,
        "open_dialog_title" => Label::OpenDialogTitle,
        "save_dialog_title" => Label::SaveDialogTitle,
        "open_filter" => Label::OpenFilter,
        "save_filter" => Label::SaveFilter,
        "error_title" => Label::ErrorTitle,
        "open_prompt" => Label::OpenPrompt,
        _ => return None,
    };
    Some(label)
}
