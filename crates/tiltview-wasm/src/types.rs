//! WASM-compatible wrapper types for image data.
//!
//! This module provides JavaScript-friendly types that wrap the core Tiltview types,
//! handling the conversion between Rust and JavaScript data representations.

use tiltview_core::raster::{ChannelLayout, Pixel, RasterImage};
use wasm_bindgen::prelude::*;

/// A raster image wrapper for JavaScript.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. When you call `pixels()`, a copy is made
/// to JavaScript memory as a `Uint8Array`. RGBA images can be handed straight to
/// `new ImageData(new Uint8ClampedArray(img.pixels()), img.width, img.height)`.
///
/// The `free()` method can be called to explicitly release WASM memory, but this is
/// optional as wasm-bindgen's finalizer will handle cleanup automatically.
#[wasm_bindgen]
pub struct JsRasterImage {
    width: u32,
    height: u32,
    channels: u8,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsRasterImage {
    /// Create a new JsRasterImage from dimensions and pixel data.
    ///
    /// # Arguments
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    /// * `channels` - 3 for RGB, 4 for RGBA
    /// * `pixels` - Pixel data in row-major order
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, channels: u8, pixels: Vec<u8>) -> JsRasterImage {
        JsRasterImage {
            width,
            height,
            channels,
            pixels,
        }
    }

    /// Get the image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes per pixel: 3 (RGB) or 4 (RGBA)
    #[wasm_bindgen(getter)]
    pub fn channels(&self) -> u8 {
        self.channels
    }

    /// Get the number of bytes in the pixel buffer
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns pixel data as Uint8Array (a copy).
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Returns the pixels as RGBA, adding an opaque alpha channel to RGB
    /// images. Convenient for `ImageData`.
    pub fn rgba_pixels(&self) -> Vec<u8> {
        match self.to_raster() {
            Some(raster) => raster.with_alpha().pixels,
            None => Vec::new(),
        }
    }

    /// Explicitly free WASM memory.
    ///
    /// This is optional - wasm-bindgen's finalizer will handle cleanup automatically.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsRasterImage {
    /// Create a JsRasterImage from a core RasterImage.
    pub(crate) fn from_raster(img: RasterImage) -> Self {
        Self {
            width: img.width,
            height: img.height,
            channels: img.channels() as u8,
            pixels: img.pixels,
        }
    }

    /// Convert back to a core RasterImage. Clones the pixel data.
    ///
    /// Returns `None` for channel counts other than 3 or 4.
    pub(crate) fn to_raster(&self) -> Option<RasterImage> {
        let layout = ChannelLayout::from_channels(self.channels as usize)?;
        Some(RasterImage {
            width: self.width,
            height: self.height,
            layout,
            pixels: self.pixels.clone(),
        })
    }
}

/// Build a fill pixel from a JS array of 3 or 4 bytes.
pub(crate) fn pixel_from_slice(values: &[u8]) -> Option<Pixel> {
    match *values {
        [r, g, b] => Some(Pixel::Rgb([r, g, b])),
        [r, g, b, a] => Some(Pixel::Rgba([r, g, b, a])),
        _ => None,
    }
}
