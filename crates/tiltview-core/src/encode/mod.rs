//! Image encoding for Tiltview exports.
//!
//! This module provides functionality for:
//! - Encoding rasters as PNG, JPEG or BMP
//! - Choosing the format from the save path's extension
//!
//! # Examples
//!
//! ```ignore
//! use tiltview_core::encode::{encode_image, ExportFormat};
//!
//! let png_bytes = encode_image(&raster, ExportFormat::Png)?;
//! println!("Encoded {} bytes", png_bytes.len());
//! ```

mod export;

pub use export::{encode_image, encode_jpeg, save_image, EncodeError, ExportFormat, JPEG_QUALITY};
