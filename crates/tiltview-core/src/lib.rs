//! Tiltview Core - image viewer library
//!
//! This crate provides everything behind a minimal image viewer except the
//! widgets: decoding, the rotate/scale transform engine, export encoding,
//! the viewer state machine and its localized strings.
//!
//! The transform engine is shared by the on-screen preview and the file
//! export, and both always start from the original decoded image.

pub mod config;
pub mod decode;
pub mod encode;
pub mod messages;
pub mod raster;
pub mod transform;
pub mod viewer;

pub use config::{ConfigError, ViewerConfig};
pub use messages::{Label, Locale};
pub use raster::{ChannelLayout, Pixel, RasterImage};
pub use transform::{apply, compute_canvas_size, Interpolation, TransformError, TransformState};
pub use viewer::{Viewer, ViewerError, ViewerState};
