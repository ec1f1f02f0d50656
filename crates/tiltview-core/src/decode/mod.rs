//! Image decoding for Tiltview.
//!
//! This module provides functionality for:
//! - Decoding PNG, JPEG, BMP and GIF images from bytes
//! - Applying EXIF orientation so photos display upright
//! - Opening files by path, with read errors kept apart from decode errors
//!
//! # Examples
//!
//! ```ignore
//! use tiltview_core::decode::open_image;
//!
//! let image = open_image(Path::new("photo.jpg"))?;
//! println!("Decoded {}x{} image", image.width, image.height);
//! ```

mod bytes;
mod file;
mod types;

pub use bytes::decode_image;
pub use file::{contains_cjk, decode_named, file_name, is_supported_extension, open_image};
pub use types::{DecodeError, Orientation, OPEN_EXTENSIONS};
