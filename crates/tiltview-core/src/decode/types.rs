//! Core types for image decoding.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// File extensions the viewer offers in its open dialog.
pub const OPEN_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif"];

/// Error types for image decoding operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The file could not be read at all.
    #[error("I/O error reading '{path}': {message}")]
    Io { path: String, message: String },

    /// The bytes are not a supported image.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// The image header was recognized but the data could not be decoded.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),

    /// A named file exists but does not decode. `cjk_path` is set when the
    /// path contains Japanese or CJK characters, which some decoders and
    /// platforms cannot handle.
    #[error("Cannot load image '{file_name}': {reason}{}", cjk_suffix(.cjk_path))]
    Unreadable {
        file_name: String,
        reason: String,
        cjk_path: bool,
    },
}

fn cjk_suffix(cjk_path: &bool) -> &'static str {
    if *cjk_path {
        " (the file name or path may contain Japanese characters)"
    } else {
        ""
    }
}

impl DecodeError {
    /// True for failures to parse content, as opposed to failures to read it.
    pub fn is_decode_failure(&self) -> bool {
        !matches!(self, DecodeError::Io { .. })
    }
}

/// EXIF orientation values (1-8).
/// See: https://exiftool.org/TagNames/EXIF.html
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Orientation {
    /// Normal (no transformation needed).
    #[default]
    Normal = 1,
    /// Horizontal flip.
    FlipHorizontal = 2,
    /// Rotate 180 degrees.
    Rotate180 = 3,
    /// Vertical flip.
    FlipVertical = 4,
    /// Transpose (flip horizontal + rotate 270 CW).
    Transpose = 5,
    /// Rotate 90 degrees clockwise.
    Rotate90CW = 6,
    /// Transverse (flip horizontal + rotate 90 CW).
    Transverse = 7,
    /// Rotate 270 degrees clockwise (90 CCW).
    Rotate270CW = 8,
}

impl From<u32> for Orientation {
    fn from(value: u32) -> Self {
        match value {
            2 => Orientation::FlipHorizontal,
            3 => Orientation::Rotate180,
            4 => Orientation::FlipVertical,
            5 => Orientation::Transpose,
            6 => Orientation::Rotate90CW,
            7 => Orientation::Transverse,
            8 => Orientation::Rotate270CW,
            _ => Orientation::Normal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation_from_u32() {
        assert_eq!(Orientation::from(1), Orientation::Normal);
        assert_eq!(Orientation::from(6), Orientation::Rotate90CW);
        assert_eq!(Orientation::from(99), Orientation::Normal); // Invalid defaults to Normal
    }

    #[test]
    fn test_decode_error_display() {
        let err = DecodeError::InvalidFormat;
        assert_eq!(err.to_string(), "Invalid or unsupported image format");

        let err = DecodeError::Unreadable {
            file_name: "cat.png".to_string(),
            reason: "bad header".to_string(),
            cjk_path: false,
        };
        assert_eq!(err.to_string(), "Cannot load image 'cat.png': bad header");
    }

    #[test]
    fn test_decode_error_display_with_cjk_hint() {
        let err = DecodeError::Unreadable {
            file_name: "猫.png".to_string(),
            reason: "bad header".to_string(),
            cjk_path: true,
        };
        assert!(err.to_string().contains("may contain Japanese characters"));
    }

    #[test]
    fn test_io_is_not_decode_failure() {
        let err = DecodeError::Io {
            path: "/missing.png".to_string(),
            message: "not found".to_string(),
        };
        assert!(!err.is_decode_failure());
        assert!(DecodeError::InvalidFormat.is_decode_failure());
    }
}
