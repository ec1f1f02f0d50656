//! 2x3 affine matrices for center-preserving rotation and scale.
//!
//! The matrix maps source pixel coordinates to destination coordinates:
//! ```text
//! x' = m[0][0] * x + m[0][1] * y + m[0][2]
//! y' = m[1][0] * x + m[1][1] * y + m[1][2]
//! ```
//!
//! Pixel centers sit on integer coordinates, so the center of a `w x h`
//! image is `((w - 1) / 2, (h - 1) / 2)`. Positive angles rotate
//! counter-clockwise on screen (y axis pointing down).

/// A 2D affine transform stored as its top two rows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine {
    pub m: [[f64; 3]; 2],
}

impl Affine {
    pub const IDENTITY: Affine = Affine {
        m: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
    };

    /// Rotate by `angle_degrees` and scale by `scale` about `(cx, cy)`.
    ///
    /// ```text
    /// a = scale * cos(angle), b = scale * sin(angle)
    /// | a  b  (1 - a) * cx - b * cy |
    /// | -b a  b * cx + (1 - a) * cy |
    /// ```
    pub fn rotation_about(cx: f64, cy: f64, angle_degrees: i32, scale: f64) -> Self {
        let (cos, sin) = exact_cos_sin(angle_degrees);
        let a = scale * cos;
        let b = scale * sin;
        Affine {
            m: [
                [a, b, (1.0 - a) * cx - b * cy],
                [-b, a, b * cx + (1.0 - a) * cy],
            ],
        }
    }

    /// Return this transform followed by a translation.
    pub fn then_translate(mut self, dx: f64, dy: f64) -> Self {
        self.m[0][2] += dx;
        self.m[1][2] += dy;
        self
    }

    /// Map a point.
    #[inline]
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        let [r0, r1] = self.m;
        (
            r0[0] * x + r0[1] * y + r0[2],
            r1[0] * x + r1[1] * y + r1[2],
        )
    }

    /// Inverse transform, or `None` if the linear part is singular.
    pub fn invert(&self) -> Option<Affine> {
        let [[a, b, tx], [c, d, ty]] = self.m;
        let det = a * d - b * c;
        if det.abs() < f64::EPSILON || !det.is_finite() {
            return None;
        }
        let ia = d / det;
        let ib = -b / det;
        let ic = -c / det;
        let id = a / det;
        Some(Affine {
            m: [
                [ia, ib, -(ia * tx + ib * ty)],
                [ic, id, -(ic * tx + id * ty)],
            ],
        })
    }

    /// `(|cos|, |sin|)` of the linear part, already multiplied by the scale.
    pub fn abs_cos_sin(&self) -> (f64, f64) {
        (self.m[0][0].abs(), self.m[0][1].abs())
    }
}

/// Cosine and sine of an integer angle, exact at multiples of 90 degrees.
pub(crate) fn exact_cos_sin(angle_degrees: i32) -> (f64, f64) {
    match angle_degrees.rem_euclid(360) {
        0 => (1.0, 0.0),
        90 => (0.0, 1.0),
        180 => (-1.0, 0.0),
        270 => (0.0, -1.0),
        a => {
            let rad = (a as f64).to_radians();
            (rad.cos(), rad.sin())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: (f64, f64), b: (f64, f64)) {
        assert!(
            (a.0 - b.0).abs() < 1e-9 && (a.1 - b.1).abs() < 1e-9,
            "{:?} != {:?}",
            a,
            b
        );
    }

    #[test]
    fn test_zero_angle_unit_scale_is_identity() {
        let m = Affine::rotation_about(49.5, 24.5, 0, 1.0);
        assert_eq!(m, Affine::IDENTITY);
    }

    #[test]
    fn test_full_turn_is_exact_identity() {
        let m = Affine::rotation_about(10.0, 10.0, 360, 1.0);
        assert_eq!(m, Affine::IDENTITY);
        let m = Affine::rotation_about(10.0, 10.0, -720, 1.0);
        assert_eq!(m, Affine::IDENTITY);
    }

    #[test]
    fn test_center_is_fixed_point() {
        for angle in [45, 90, 135, 180, 225, 270, 315] {
            let m = Affine::rotation_about(12.5, 7.0, angle, 1.7);
            assert_close(m.apply(12.5, 7.0), (12.5, 7.0));
        }
    }

    #[test]
    fn test_quarter_turn_is_counter_clockwise() {
        let m = Affine::rotation_about(0.0, 0.0, 90, 1.0);
        // A point to the right of the center moves up (negative y).
        assert_close(m.apply(1.0, 0.0), (0.0, -1.0));
    }

    #[test]
    fn test_invert_round_trip() {
        let m = Affine::rotation_about(30.0, 20.0, 45, 0.5).then_translate(3.0, -2.0);
        let inv = m.invert().unwrap();
        let (x, y) = m.apply(4.0, 9.0);
        assert_close(inv.apply(x, y), (4.0, 9.0));
    }

    #[test]
    fn test_invert_singular() {
        let m = Affine::rotation_about(0.0, 0.0, 45, 0.0);
        assert!(m.invert().is_none());
    }

    #[test]
    fn test_abs_cos_sin_includes_scale() {
        let m = Affine::rotation_about(0.0, 0.0, 90, 2.0);
        assert_eq!(m.abs_cos_sin(), (0.0, 2.0));
    }

    #[test]
    fn test_exact_cos_sin_negative_angles() {
        assert_eq!(exact_cos_sin(-90), (0.0, -1.0));
        assert_eq!(exact_cos_sin(-180), (-1.0, 0.0));
    }
}
