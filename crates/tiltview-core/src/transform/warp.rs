//! Rotation + scale about the image center with canvas expansion.
//!
//! # Algorithm
//!
//! 1. Build the center-preserving rotation/scale matrix.
//! 2. Size the output canvas to the bounding box of the transformed image:
//!    ```text
//!    new_w = round(h * |sin| + w * |cos|)
//!    new_h = round(h * |cos| + w * |sin|)
//!    ```
//!    where `cos`/`sin` come from the matrix and already include the scale.
//! 3. Shift the matrix by `((new_w - w) / 2, (new_h - h) / 2)` so the content
//!    is centered on the new canvas.
//! 4. Inverse-map every output pixel into the source and interpolate.
//!    Coordinates outside the source pixel footprint receive the fill color.

use log::debug;

use super::affine::Affine;
use super::types::{Interpolation, TransformError, TransformState};
use crate::raster::{Pixel, RasterImage};

/// Compute the canvas that exactly bounds a rotated and scaled image.
///
/// # Example
///
/// ```
/// use tiltview_core::transform::compute_canvas_size;
///
/// // 90-degree rotation swaps dimensions
/// assert_eq!(compute_canvas_size(100, 50, 90, 1.0)?, (50, 100));
///
/// // Scale applies to both axes
/// assert_eq!(compute_canvas_size(100, 50, 0, 2.0)?, (200, 100));
/// ```
///
/// # Errors
///
/// Returns [`TransformError::InvalidInput`] if either side exceeds `u32::MAX`.
pub fn compute_canvas_size(
    width: u32,
    height: u32,
    angle_degrees: i32,
    scale: f64,
) -> Result<(u32, u32), TransformError> {
    let m = Affine::rotation_about(0.0, 0.0, angle_degrees, scale);
    canvas_for(&m, width, height)
}

/// Build the full forward matrix used by [`apply`]: center rotation/scale
/// followed by the recentering translation for the expanded canvas.
pub fn rotation_matrix(
    width: u32,
    height: u32,
    angle_degrees: i32,
    scale: f64,
) -> Result<Affine, TransformError> {
    forward_transform(width, height, angle_degrees, scale).map(|(m, _)| m)
}

/// Forward matrix together with the canvas size it targets.
fn forward_transform(
    width: u32,
    height: u32,
    angle_degrees: i32,
    scale: f64,
) -> Result<(Affine, (u32, u32)), TransformError> {
    let (cx, cy) = image_center(width, height);
    let m = Affine::rotation_about(cx, cy, angle_degrees, scale);
    let (new_w, new_h) = canvas_for(&m, width, height)?;
    let m = m.then_translate(
        (new_w as f64 - width as f64) / 2.0,
        (new_h as f64 - height as f64) / 2.0,
    );
    Ok((m, (new_w, new_h)))
}

/// Rotate `source` about its center by `angle_degrees` (counter-clockwise)
/// and scale it by `scale`, using bilinear interpolation.
///
/// The output canvas is sized to bound the transformed content; areas not
/// covered by the source are set to `fill`.
///
/// # Errors
///
/// Returns [`TransformError::InvalidInput`] if the source is empty or its
/// buffer does not match its dimensions, if `scale` is not a positive finite
/// number, or if `fill` has a different channel count than the source.
pub fn apply(
    source: &RasterImage,
    angle_degrees: i32,
    scale: f64,
    fill: Pixel,
) -> Result<RasterImage, TransformError> {
    apply_filtered(source, angle_degrees, scale, fill, Interpolation::Bilinear)
}

/// Same as [`apply`], taking the transform as a [`TransformState`] value.
pub fn apply_with(
    source: &RasterImage,
    state: &TransformState,
    fill: Pixel,
    filter: Interpolation,
) -> Result<RasterImage, TransformError> {
    apply_filtered(
        source,
        state.rotation_degrees(),
        state.scale(),
        fill,
        filter,
    )
}

/// Same as [`apply`] with an explicit interpolation filter.
pub fn apply_filtered(
    source: &RasterImage,
    angle_degrees: i32,
    scale: f64,
    fill: Pixel,
    filter: Interpolation,
) -> Result<RasterImage, TransformError> {
    validate(source, scale, fill)?;

    let (forward, (dst_w, dst_h)) =
        forward_transform(source.width, source.height, angle_degrees, scale)?;
    let len = buffer_len(dst_w, dst_h, source.channels())?;
    let inverse = forward.invert().ok_or_else(|| {
        TransformError::InvalidInput(format!("scale {} gives a singular transform", scale))
    })?;

    debug!(
        "transform {}x{} angle={} scale={} -> {}x{}",
        source.width, source.height, angle_degrees, scale, dst_w, dst_h
    );

    let mut output = Vec::new();
    output.try_reserve_exact(len).map_err(|_| {
        TransformError::InvalidInput(format!("cannot allocate a {}x{} canvas", dst_w, dst_h))
    })?;
    output.resize(len, 0);

    Ok(warp(source, &inverse, dst_w, dst_h, output, fill, filter))
}

fn validate(source: &RasterImage, scale: f64, fill: Pixel) -> Result<(), TransformError> {
    if source.is_empty() {
        return Err(TransformError::InvalidInput(
            "source image is empty".to_string(),
        ));
    }
    if !source.is_consistent() {
        return Err(TransformError::InvalidInput(format!(
            "pixel buffer has {} bytes, expected {}",
            source.pixels.len(),
            source.pixel_count() * source.channels()
        )));
    }
    if !scale.is_finite() || scale <= 0.0 {
        return Err(TransformError::InvalidInput(format!(
            "scale must be positive, got {}",
            scale
        )));
    }
    if fill.layout() != source.layout {
        return Err(TransformError::InvalidInput(format!(
            "fill has {} channels, source has {}",
            fill.layout().channels(),
            source.channels()
        )));
    }
    Ok(())
}

/// Center of the pixel grid in pixel-index coordinates.
#[inline]
fn image_center(width: u32, height: u32) -> (f64, f64) {
    ((width as f64 - 1.0) / 2.0, (height as f64 - 1.0) / 2.0)
}

fn canvas_for(m: &Affine, width: u32, height: u32) -> Result<(u32, u32), TransformError> {
    let (cos, sin) = m.abs_cos_sin();
    let w = width as f64;
    let h = height as f64;
    let new_w = (h * sin + w * cos).round().max(1.0);
    let new_h = (h * cos + w * sin).round().max(1.0);
    if new_w > u32::MAX as f64 || new_h > u32::MAX as f64 {
        return Err(TransformError::InvalidInput(format!(
            "canvas too large: {}x{}",
            new_w, new_h
        )));
    }
    Ok((new_w as u32, new_h as u32))
}

/// Byte length of a `width x height` canvas, if it fits in memory addressing.
fn buffer_len(width: u32, height: u32, channels: usize) -> Result<usize, TransformError> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(channels))
        .ok_or_else(|| {
            TransformError::InvalidInput(format!("canvas too large: {}x{}", width, height))
        })
}

/// Resample `source` onto a `dst_w x dst_h` canvas through `inverse`
/// (destination -> source coordinates). `output` is the zeroed canvas buffer.
fn warp(
    source: &RasterImage,
    inverse: &Affine,
    dst_w: u32,
    dst_h: u32,
    mut output: Vec<u8>,
    fill: Pixel,
    filter: Interpolation,
) -> RasterImage {
    let channels = source.channels();
    let fill = fill.as_slice();
    let max_x = source.width as f64 - 0.5;
    let max_y = source.height as f64 - 0.5;

    for (dst_y, row) in output
        .chunks_exact_mut(dst_w as usize * channels)
        .enumerate()
    {
        for (dst_x, out) in row.chunks_exact_mut(channels).enumerate() {
            let (src_x, src_y) = inverse.apply(dst_x as f64, dst_y as f64);

            if src_x < -0.5 || src_x >= max_x || src_y < -0.5 || src_y >= max_y {
                out.copy_from_slice(fill);
                continue;
            }

            match filter {
                Interpolation::Nearest => sample_nearest(source, src_x, src_y, out),
                Interpolation::Bilinear => sample_bilinear(source, src_x, src_y, out),
            }
        }
    }

    RasterImage {
        width: dst_w,
        height: dst_h,
        layout: source.layout,
        pixels: output,
    }
}

/// Sample the closest source pixel. Coordinates are clamped to the grid.
fn sample_nearest(image: &RasterImage, x: f64, y: f64, out: &mut [u8]) {
    let px = x.round().clamp(0.0, (image.width - 1) as f64) as u32;
    let py = y.round().clamp(0.0, (image.height - 1) as f64) as u32;
    out.copy_from_slice(image.pixel(px, py));
}

/// Sample a pixel using bilinear interpolation.
///
/// Bilinear interpolation considers the 4 nearest pixels and weights
/// their contribution based on distance. Edge pixels are replicated so
/// the half-pixel border of the footprint stays solid.
fn sample_bilinear(image: &RasterImage, x: f64, y: f64, out: &mut [u8]) {
    let x = x.clamp(0.0, (image.width - 1) as f64);
    let y = y.clamp(0.0, (image.height - 1) as f64);

    let x0 = x.floor() as u32;
    let y0 = y.floor() as u32;
    let x1 = (x0 + 1).min(image.width - 1);
    let y1 = (y0 + 1).min(image.height - 1);

    // Fractional distances
    let fx = x - x0 as f64;
    let fy = y - y0 as f64;

    let p00 = image.pixel(x0, y0);
    let p10 = image.pixel(x1, y0);
    let p01 = image.pixel(x0, y1);
    let p11 = image.pixel(x1, y1);

    for (i, o) in out.iter_mut().enumerate() {
        let v = p00[i] as f64 * (1.0 - fx) * (1.0 - fy)
            + p10[i] as f64 * fx * (1.0 - fy)
            + p01[i] as f64 * (1.0 - fx) * fy
            + p11[i] as f64 * fx * fy;
        *o = v.clamp(0.0, 255.0).round() as u8;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::ChannelLayout;

    /// Create a simple test image with a gradient pattern.
    fn test_image(width: u32, height: u32) -> RasterImage {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(((x * 7) % 256) as u8); // R
                pixels.push(((y * 5) % 256) as u8); // G
                pixels.push(((x + y) % 256) as u8); // B
            }
        }
        RasterImage::new(width, height, ChannelLayout::Rgb, pixels)
    }

    #[test]
    fn test_identity_is_pixel_exact() {
        let img = test_image(37, 21);
        let result = apply(&img, 0, 1.0, Pixel::WHITE).unwrap();
        assert_eq!(result, img);
    }

    #[test]
    fn test_full_turns_are_pixel_exact() {
        let img = test_image(20, 13);
        for angle in [360, -360, 720] {
            let result = apply(&img, angle, 1.0, Pixel::WHITE).unwrap();
            assert_eq!(result, img, "angle {}", angle);
        }
    }

    #[test]
    fn test_quarter_turn_permutes_pixels() {
        let img = test_image(5, 3);
        let result = apply(&img, 90, 1.0, Pixel::WHITE).unwrap();

        assert_eq!((result.width, result.height), (3, 5));
        // Counter-clockwise: source (x, y) lands at (y, w - 1 - x).
        for y in 0..3 {
            for x in 0..5 {
                assert_eq!(result.pixel(y, 4 - x), img.pixel(x, y));
            }
        }
    }

    #[test]
    fn test_four_quarter_turns_restore_source() {
        let img = test_image(9, 4);
        let mut current = img.clone();
        for _ in 0..4 {
            current = apply(&current, 90, 1.0, Pixel::WHITE).unwrap();
        }
        assert_eq!(current, img);
    }

    #[test]
    fn test_half_turn_is_pixel_exact() {
        let img = test_image(6, 4);
        let result = apply(&img, 180, 1.0, Pixel::WHITE).unwrap();
        assert_eq!((result.width, result.height), (6, 4));
        assert_eq!(result.pixel(0, 0), img.pixel(5, 3));
        assert_eq!(result.pixel(5, 3), img.pixel(0, 0));
    }

    #[test]
    fn test_45_degree_square_scenario() {
        let img = RasterImage::filled(100, 100, Pixel::Rgb([10, 20, 30]));
        let result = apply(&img, 45, 1.0, Pixel::WHITE).unwrap();

        // 100 * sqrt(2) = 141.42
        assert_eq!((result.width, result.height), (141, 141));

        let last = result.width - 1;
        for (x, y) in [(0, 0), (last, 0), (0, last), (last, last)] {
            assert_eq!(result.pixel(x, y), &[255, 255, 255], "corner ({}, {})", x, y);
        }
        let center = result.width / 2;
        assert_eq!(result.pixel(center, center), &[10, 20, 30]);
    }

    #[test]
    fn test_output_matches_canvas_formula() {
        let img = test_image(64, 30);
        for angle in (0..360).step_by(45) {
            for scale in [0.5, 1.0, 1.3, 2.0] {
                let result = apply(&img, angle, scale, Pixel::WHITE).unwrap();
                let (cos, sin) = super::super::affine::exact_cos_sin(angle);
                let (cos, sin) = ((cos * scale).abs(), (sin * scale).abs());
                let w = (30.0 * sin + 64.0 * cos).round() as u32;
                let h = (30.0 * cos + 64.0 * sin).round() as u32;
                assert_eq!((result.width, result.height), (w, h), "angle {} scale {}", angle, scale);
                assert!(result.is_consistent());
            }
        }
    }

    #[test]
    fn test_scale_doubles_canvas() {
        let img = test_image(10, 6);
        let result = apply(&img, 0, 2.0, Pixel::WHITE).unwrap();
        assert_eq!((result.width, result.height), (20, 12));
        // Zooming in without rotation never exposes background
        assert!(result
            .pixels
            .chunks_exact(3)
            .all(|p| p != [255u8, 255, 255].as_slice()));
    }

    #[test]
    fn test_scale_half_shrinks_canvas() {
        let img = test_image(40, 20);
        let result = apply(&img, 0, 0.5, Pixel::WHITE).unwrap();
        assert_eq!((result.width, result.height), (20, 10));
    }

    #[test]
    fn test_four_45s_and_one_90_bounds_symmetry() {
        // 45 four times (180) and 90 once give the same box on a square
        assert_eq!(
            compute_canvas_size(80, 80, 45 * 4, 1.0).unwrap(),
            compute_canvas_size(80, 80, 90, 1.0).unwrap()
        );
    }

    #[test]
    fn test_nearest_filter_identity() {
        let img = test_image(11, 7);
        let result =
            apply_filtered(&img, 0, 1.0, Pixel::WHITE, Interpolation::Nearest).unwrap();
        assert_eq!(result, img);
    }

    #[test]
    fn test_nearest_and_bilinear_same_dimensions() {
        let img = test_image(30, 30);
        let a = apply_filtered(&img, 135, 1.5, Pixel::WHITE, Interpolation::Nearest).unwrap();
        let b = apply_filtered(&img, 135, 1.5, Pixel::WHITE, Interpolation::Bilinear).unwrap();
        assert_eq!((a.width, a.height), (b.width, b.height));
    }

    #[test]
    fn test_rgba_source_with_rgba_fill() {
        let img = RasterImage::filled(10, 10, Pixel::Rgba([1, 2, 3, 255]));
        let result = apply(&img, 45, 1.0, Pixel::TRANSPARENT).unwrap();
        assert_eq!(result.layout, ChannelLayout::Rgba);
        assert_eq!(result.pixel(0, 0), &[0, 0, 0, 0]);
    }

    #[test]
    fn test_source_is_not_mutated() {
        let img = test_image(12, 8);
        let before = img.clone();
        let _ = apply(&img, 45, 1.7, Pixel::WHITE).unwrap();
        assert_eq!(img, before);
    }

    #[test]
    fn test_apply_with_state() {
        let img = test_image(16, 9);
        let state = TransformState::new(-90, 1.0);
        let result = apply_with(&img, &state, Pixel::WHITE, Interpolation::Bilinear).unwrap();
        assert_eq!((result.width, result.height), (9, 16));
    }

    #[test]
    fn test_1x1_image_rotation() {
        let img = RasterImage::new(1, 1, ChannelLayout::Rgb, vec![128, 128, 128]);
        let result = apply(&img, 45, 1.0, Pixel::WHITE).unwrap();
        assert!(result.width >= 1);
        assert!(result.height >= 1);
        assert!(result.is_consistent());
    }

    #[test]
    fn test_tiny_scale_never_zero_sized() {
        let img = test_image(3, 3);
        let result = apply(&img, 45, 0.01, Pixel::WHITE).unwrap();
        assert_eq!((result.width, result.height), (1, 1));
    }

    #[test]
    fn test_empty_source_is_invalid() {
        let img = RasterImage::new(0, 0, ChannelLayout::Rgb, vec![]);
        let err = apply(&img, 0, 1.0, Pixel::WHITE).unwrap_err();
        assert!(matches!(err, TransformError::InvalidInput(_)));
    }

    #[test]
    fn test_non_positive_scale_is_invalid() {
        let img = test_image(4, 4);
        for scale in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(apply(&img, 0, scale, Pixel::WHITE).is_err(), "scale {}", scale);
        }
    }

    #[test]
    fn test_fill_layout_mismatch_is_invalid() {
        let img = test_image(4, 4);
        assert!(apply(&img, 45, 1.0, Pixel::TRANSPARENT).is_err());
    }

    #[test]
    fn test_inconsistent_buffer_is_invalid() {
        let img = RasterImage {
            width: 4,
            height: 4,
            layout: ChannelLayout::Rgb,
            pixels: vec![0; 10],
        };
        assert!(apply(&img, 0, 1.0, Pixel::WHITE).is_err());
    }

    #[test]
    fn test_canvas_size_examples() {
        assert_eq!(compute_canvas_size(100, 50, 0, 1.0).unwrap(), (100, 50));
        assert_eq!(compute_canvas_size(100, 50, 90, 1.0).unwrap(), (50, 100));
        assert_eq!(compute_canvas_size(100, 50, 180, 1.0).unwrap(), (100, 50));
        assert_eq!(compute_canvas_size(100, 50, 270, 1.0).unwrap(), (50, 100));
        assert_eq!(compute_canvas_size(100, 100, 45, 1.0).unwrap(), (141, 141));
        assert_eq!(
            compute_canvas_size(100, 50, -45, 1.0).unwrap(),
            compute_canvas_size(100, 50, 45, 1.0).unwrap()
        );
    }

    #[test]
    fn test_canvas_wider_than_u32_is_invalid() {
        // 1000 * 1e7 = 1e10 pixels per side
        assert!(matches!(
            compute_canvas_size(1000, 1000, 0, 1e7),
            Err(TransformError::InvalidInput(_))
        ));

        let img = test_image(1000, 1000);
        let err = apply(&img, 0, 1e7, Pixel::WHITE).unwrap_err();
        assert!(err.to_string().contains("canvas too large"));
    }

    #[test]
    fn test_canvas_buffer_overflow_is_invalid() {
        // Each side fits in u32, but w * h * 3 does not fit in usize.
        let img = test_image(1, 1);
        let scale = 4.0e9;
        assert_eq!(
            compute_canvas_size(1, 1, 0, scale).unwrap(),
            (4_000_000_000, 4_000_000_000)
        );
        let err = apply(&img, 0, scale, Pixel::WHITE).unwrap_err();
        assert!(matches!(err, TransformError::InvalidInput(_)));
    }

    #[test]
    fn test_rotation_matrix_keeps_center_centered() {
        let m = rotation_matrix(100, 100, 45, 1.0).unwrap();
        let (x, y) = m.apply(49.5, 49.5);
        // new canvas is 141 x 141, centre (70, 70)
        assert!((x - 70.0).abs() < 1e-9 && (y - 70.0).abs() < 1e-9, "({}, {})", x, y);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
