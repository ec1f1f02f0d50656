//! In-memory raster type shared by decoding, transforms and export.

use serde::{Deserialize, Serialize};

/// Channel layout of a raster, 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ChannelLayout {
    /// Three channels per pixel.
    #[default]
    Rgb,
    /// Four channels per pixel, straight alpha last.
    Rgba,
}

impl ChannelLayout {
    /// Number of bytes per pixel.
    #[inline]
    pub fn channels(self) -> usize {
        match self {
            ChannelLayout::Rgb => 3,
            ChannelLayout::Rgba => 4,
        }
    }

    /// Layout for a channel count, if supported.
    pub fn from_channels(channels: usize) -> Option<Self> {
        match channels {
            3 => Some(ChannelLayout::Rgb),
            4 => Some(ChannelLayout::Rgba),
            _ => None,
        }
    }
}

/// A single pixel value, used as the fill color for exposed background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pixel {
    Rgb([u8; 3]),
    Rgba([u8; 4]),
}

impl Pixel {
    /// Opaque white (RGB).
    pub const WHITE: Pixel = Pixel::Rgb([255, 255, 255]);
    /// Fully transparent black (RGBA).
    pub const TRANSPARENT: Pixel = Pixel::Rgba([0, 0, 0, 0]);

    /// Channel layout this pixel matches.
    pub fn layout(&self) -> ChannelLayout {
        match self {
            Pixel::Rgb(_) => ChannelLayout::Rgb,
            Pixel::Rgba(_) => ChannelLayout::Rgba,
        }
    }

    /// Raw channel bytes.
    pub fn as_slice(&self) -> &[u8] {
        match self {
            Pixel::Rgb(p) => p,
            Pixel::Rgba(p) => p,
        }
    }

    /// Convert to the given layout. RGB gains an opaque alpha; RGBA drops it.
    pub fn to_layout(self, layout: ChannelLayout) -> Pixel {
        match (self, layout) {
            (Pixel::Rgb([r, g, b]), ChannelLayout::Rgba) => Pixel::Rgba([r, g, b, 255]),
            (Pixel::Rgba([r, g, b, _]), ChannelLayout::Rgb) => Pixel::Rgb([r, g, b]),
            (p, _) => p,
        }
    }
}

/// An owned 8-bit raster in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Channel layout of `pixels`.
    pub layout: ChannelLayout,
    /// Pixel data; length should be width * height * layout.channels().
    pub pixels: Vec<u8>,
}

impl RasterImage {
    /// Create a new RasterImage with the given dimensions and pixel data.
    pub fn new(width: u32, height: u32, layout: ChannelLayout, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize * layout.channels(),
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            layout,
            pixels,
        }
    }

    /// Create a raster where every pixel is `fill`.
    pub fn filled(width: u32, height: u32, fill: Pixel) -> Self {
        let count = width as usize * height as usize;
        let pixels = fill.as_slice().repeat(count);
        Self {
            width,
            height,
            layout: fill.layout(),
            pixels,
        }
    }

    /// Create a RasterImage from an image::RgbImage.
    pub fn from_rgb_image(img: image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            layout: ChannelLayout::Rgb,
            pixels: img.into_raw(),
        }
    }

    /// Create a RasterImage from an image::RgbaImage.
    pub fn from_rgba_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            layout: ChannelLayout::Rgba,
            pixels: img.into_raw(),
        }
    }

    /// Convert a decoded image, keeping alpha only when the source has it.
    pub fn from_dynamic(img: image::DynamicImage) -> Self {
        if img.color().has_alpha() {
            Self::from_rgba_image(img.into_rgba8())
        } else {
            Self::from_rgb_image(img.into_rgb8())
        }
    }

    /// Convert to an image::DynamicImage for encoding.
    pub fn to_dynamic(&self) -> Option<image::DynamicImage> {
        match self.layout {
            ChannelLayout::Rgb => {
                image::RgbImage::from_raw(self.width, self.height, self.pixels.clone())
                    .map(image::DynamicImage::ImageRgb8)
            }
            ChannelLayout::Rgba => {
                image::RgbaImage::from_raw(self.width, self.height, self.pixels.clone())
                    .map(image::DynamicImage::ImageRgba8)
            }
        }
    }

    /// Number of channels per pixel.
    #[inline]
    pub fn channels(&self) -> usize {
        self.layout.channels()
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Check if this is an empty/invalid image.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }

    /// True when the buffer length agrees with the dimensions and layout.
    pub fn is_consistent(&self) -> bool {
        self.pixels.len() == self.pixel_count() * self.channels()
    }

    /// Channel bytes of the pixel at (x, y).
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> &[u8] {
        let c = self.channels();
        let idx = (y as usize * self.width as usize + x as usize) * c;
        &self.pixels[idx..idx + c]
    }

    /// Return a copy with an opaque alpha channel added. RGBA input is cloned.
    pub fn with_alpha(&self) -> RasterImage {
        match self.layout {
            ChannelLayout::Rgba => self.clone(),
            ChannelLayout::Rgb => {
                let mut pixels = Vec::with_capacity(self.pixel_count() * 4);
                for px in self.pixels.chunks_exact(3) {
                    pixels.extend_from_slice(px);
                    pixels.push(255);
                }
                RasterImage {
                    width: self.width,
                    height: self.height,
                    layout: ChannelLayout::Rgba,
                    pixels,
                }
            }
        }
    }

    /// Return a copy with the alpha channel dropped. RGB input is cloned.
    pub fn without_alpha(&self) -> RasterImage {
        match self.layout {
            ChannelLayout::Rgb => self.clone(),
            ChannelLayout::Rgba => {
                let mut pixels = Vec::with_capacity(self.pixel_count() * 3);
                for px in self.pixels.chunks_exact(4) {
                    pixels.extend_from_slice(&px[..3]);
                }
                RasterImage {
                    width: self.width,
                    height: self.height,
                    layout: ChannelLayout::Rgb,
                    pixels,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raster_creation() {
        let img = RasterImage::new(100, 50, ChannelLayout::Rgb, vec![0u8; 100 * 50 * 3]);

        assert_eq!(img.width, 100);
        assert_eq!(img.height, 50);
        assert_eq!(img.pixel_count(), 5000);
        assert!(img.is_consistent());
        assert!(!img.is_empty());
    }

    #[test]
    fn test_raster_empty() {
        let img = RasterImage::new(0, 0, ChannelLayout::Rgb, vec![]);
        assert!(img.is_empty());
    }

    #[test]
    fn test_filled() {
        let img = RasterImage::filled(3, 2, Pixel::TRANSPARENT);
        assert_eq!(img.layout, ChannelLayout::Rgba);
        assert_eq!(img.pixels.len(), 3 * 2 * 4);
        assert!(img.pixels.iter().all(|&v| v == 0));
    }

    #[test]
    fn test_with_alpha_adds_opaque_channel() {
        let img = RasterImage::new(2, 1, ChannelLayout::Rgb, vec![1, 2, 3, 4, 5, 6]);
        let rgba = img.with_alpha();

        assert_eq!(rgba.layout, ChannelLayout::Rgba);
        assert_eq!(rgba.pixels, vec![1, 2, 3, 255, 4, 5, 6, 255]);
    }

    #[test]
    fn test_without_alpha_round_trip() {
        let img = RasterImage::new(2, 1, ChannelLayout::Rgb, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(img.with_alpha().without_alpha(), img);
    }

    #[test]
    fn test_pixel_accessor() {
        let img = RasterImage::new(2, 2, ChannelLayout::Rgb, (0..12).collect());
        assert_eq!(img.pixel(1, 1), &[9, 10, 11]);
    }

    #[test]
    fn test_pixel_to_layout() {
        assert_eq!(
            Pixel::WHITE.to_layout(ChannelLayout::Rgba),
            Pixel::Rgba([255, 255, 255, 255])
        );
        assert_eq!(
            Pixel::TRANSPARENT.to_layout(ChannelLayout::Rgb),
            Pixel::Rgb([0, 0, 0])
        );
        assert_eq!(Pixel::WHITE.to_layout(ChannelLayout::Rgb), Pixel::WHITE);
    }

    #[test]
    fn test_dynamic_conversion_keeps_alpha() {
        let rgba = image::RgbaImage::from_pixel(2, 2, image::Rgba([1, 2, 3, 4]));
        let img = RasterImage::from_dynamic(image::DynamicImage::ImageRgba8(rgba));
        assert_eq!(img.layout, ChannelLayout::Rgba);

        let rgb = image::RgbImage::from_pixel(2, 2, image::Rgb([1, 2, 3]));
        let img = RasterImage::from_dynamic(image::DynamicImage::ImageRgb8(rgb));
        assert_eq!(img.layout, ChannelLayout::Rgb);
        assert!(img.to_dynamic().is_some());
    }
}
