//! PNG, JPEG and BMP encoding for export.
//!
//! PNG and BMP keep the alpha channel. JPEG has none, so RGBA rasters lose
//! their alpha when exported as JPEG.

use std::io::Cursor;
use std::path::Path;

use image::codecs::bmp::BmpEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::raster::{ChannelLayout, RasterImage};

/// JPEG quality used for export.
pub const JPEG_QUALITY: u8 = 95;

/// Errors that can occur during encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes, got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The target extension is not an export format
    #[error("Unsupported export format: {0}")]
    UnsupportedFormat(String),

    /// Encoder failed
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),

    /// Writing the encoded file failed
    #[error("I/O error writing '{path}': {message}")]
    Io { path: String, message: String },
}

/// Formats offered by the save dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ExportFormat {
    #[default]
    Png,
    Jpeg,
    Bmp,
}

impl ExportFormat {
    /// Look up a format by file extension (case-insensitive, no dot).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(ExportFormat::Png),
            "jpg" | "jpeg" => Some(ExportFormat::Jpeg),
            "bmp" => Some(ExportFormat::Bmp),
            _ => None,
        }
    }

    /// Look up a format from a path's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    /// Canonical file extension.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpeg => "jpg",
            ExportFormat::Bmp => "bmp",
        }
    }

    /// MIME type, for shells that hand the bytes to a browser download.
    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Png => "image/png",
            ExportFormat::Jpeg => "image/jpeg",
            ExportFormat::Bmp => "image/bmp",
        }
    }
}

/// Encode a raster in the given format.
///
/// # Errors
///
/// Returns an error if the raster is empty, its buffer does not match its
/// dimensions, or the encoder fails.
pub fn encode_image(image: &RasterImage, format: ExportFormat) -> Result<Vec<u8>, EncodeError> {
    validate(image)?;

    let mut buffer = Cursor::new(Vec::new());
    let color = color_type(image.layout);

    let result = match format {
        ExportFormat::Png => PngEncoder::new(&mut buffer).write_image(
            &image.pixels,
            image.width,
            image.height,
            color,
        ),
        ExportFormat::Bmp => BmpEncoder::new(&mut buffer).write_image(
            &image.pixels,
            image.width,
            image.height,
            color,
        ),
        ExportFormat::Jpeg => return encode_jpeg(image, JPEG_QUALITY),
    };
    result.map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}

/// Encode a raster as JPEG. Alpha, if present, is dropped.
///
/// `quality` is clamped to 1-100.
pub fn encode_jpeg(image: &RasterImage, quality: u8) -> Result<Vec<u8>, EncodeError> {
    validate(image)?;

    let rgb = image.without_alpha();
    let quality = quality.clamp(1, 100);
    let mut buffer = Cursor::new(Vec::new());

    JpegEncoder::new_with_quality(&mut buffer, quality)
        .write_image(&rgb.pixels, rgb.width, rgb.height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}

/// Encode `image` in the format implied by `path` and write it there.
///
/// Returns the format that was used.
pub fn save_image(path: &Path, image: &RasterImage) -> Result<ExportFormat, EncodeError> {
    let format = ExportFormat::from_path(path).ok_or_else(|| {
        EncodeError::UnsupportedFormat(
            path.extension()
                .map(|e| e.to_string_lossy().into_owned())
                .unwrap_or_default(),
        )
    })?;

    let bytes = encode_image(image, format)?;
    std::fs::write(path, &bytes).map_err(|e| EncodeError::Io {
        path: path.to_string_lossy().into_owned(),
        message: e.to_string(),
    })?;

    info!(
        "saved {}x{} {:?} ({} bytes) to {}",
        image.width,
        image.height,
        format,
        bytes.len(),
        path.display()
    );
    Ok(format)
}

fn validate(image: &RasterImage) -> Result<(), EncodeError> {
    if image.width == 0 || image.height == 0 {
        return Err(EncodeError::InvalidDimensions {
            width: image.width,
            height: image.height,
        });
    }
    let expected = image.pixel_count() * image.channels();
    if image.pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: image.pixels.len(),
        });
    }
    Ok(())
}

fn color_type(layout: ChannelLayout) -> ExtendedColorType {
    match layout {
        ChannelLayout::Rgb => ExtendedColorType::Rgb8,
        ChannelLayout::Rgba => ExtendedColorType::Rgba8,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::Pixel;

    const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn test_encode_png_basic() {
        let img = RasterImage::filled(10, 10, Pixel::WHITE);
        let bytes = encode_image(&img, ExportFormat::Png).unwrap();
        assert_eq!(&bytes[0..8], &PNG_MAGIC);
    }

    #[test]
    fn test_encode_png_rgba() {
        let img = RasterImage::filled(4, 4, Pixel::TRANSPARENT);
        let bytes = encode_image(&img, ExportFormat::Png).unwrap();
        assert_eq!(&bytes[0..8], &PNG_MAGIC);
    }

    #[test]
    fn test_encode_jpeg_basic() {
        let img = RasterImage::filled(100, 100, Pixel::Rgb([128, 128, 128]));
        let jpeg_bytes = encode_image(&img, ExportFormat::Jpeg).unwrap();

        // SOI and EOI markers
        assert_eq!(&jpeg_bytes[0..2], &[0xFF, 0xD8]);
        let len = jpeg_bytes.len();
        assert_eq!(&jpeg_bytes[len - 2..], &[0xFF, 0xD9]);
    }

    #[test]
    fn test_encode_jpeg_drops_alpha() {
        let img = RasterImage::filled(8, 8, Pixel::Rgba([10, 20, 30, 0]));
        let bytes = encode_jpeg(&img, 90).unwrap();

        let decoded = crate::decode::decode_image(&bytes).unwrap();
        assert_eq!(decoded.layout, ChannelLayout::Rgb);
        assert_eq!(decoded.channels(), 3);
        assert_eq!((decoded.width, decoded.height), (8, 8));
    }

    #[test]
    fn test_encode_jpeg_quality_clamping() {
        let img = RasterImage::filled(10, 10, Pixel::WHITE);
        assert!(encode_jpeg(&img, 0).is_ok());
        assert!(encode_jpeg(&img, 255).is_ok());
    }

    #[test]
    fn test_encode_bmp_basic() {
        let img = RasterImage::filled(3, 5, Pixel::Rgb([1, 2, 3]));
        let bytes = encode_image(&img, ExportFormat::Bmp).unwrap();
        assert_eq!(&bytes[0..2], b"BM");
    }

    #[test]
    fn test_encode_zero_dimensions() {
        let img = RasterImage {
            width: 0,
            height: 10,
            layout: ChannelLayout::Rgb,
            pixels: vec![],
        };
        let result = encode_image(&img, ExportFormat::Png);
        assert!(matches!(result, Err(EncodeError::InvalidDimensions { .. })));
    }

    #[test]
    fn test_encode_invalid_pixel_data() {
        let img = RasterImage {
            width: 10,
            height: 10,
            layout: ChannelLayout::Rgba,
            pixels: vec![0; 10 * 10 * 3],
        };
        let result = encode_image(&img, ExportFormat::Png);
        assert!(matches!(result, Err(EncodeError::InvalidPixelData { .. })));
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            ExportFormat::from_path(Path::new("out.PNG")),
            Some(ExportFormat::Png)
        );
        assert_eq!(
            ExportFormat::from_path(Path::new("out.jpeg")),
            Some(ExportFormat::Jpeg)
        );
        assert_eq!(
            ExportFormat::from_path(Path::new("out.bmp")),
            Some(ExportFormat::Bmp)
        );
        assert_eq!(ExportFormat::from_path(Path::new("out.gif")), None);
        assert_eq!(ExportFormat::from_path(Path::new("out")), None);
    }

    #[test]
    fn test_format_metadata() {
        assert_eq!(ExportFormat::Jpeg.extension(), "jpg");
        assert_eq!(ExportFormat::Bmp.mime_type(), "image/bmp");
    }

    #[test]
    fn test_save_image_unsupported_extension() {
        let img = RasterImage::filled(2, 2, Pixel::WHITE);
        let result = save_image(Path::new("/tmp/whatever.tiff"), &img);
        assert!(matches!(result, Err(EncodeError::UnsupportedFormat(ext)) if ext == "tiff"));
    }

    #[test]
    fn test_save_image_writes_file() {
        let dir = std::env::temp_dir().join(format!("tiltview-encode-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("saved.png");

        let img = RasterImage::filled(7, 3, Pixel::TRANSPARENT);
        let format = save_image(&path, &img).unwrap();

        assert_eq!(format, ExportFormat::Png);
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[0..8], &PNG_MAGIC);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
