use crate::transform::PointTransform;

/// A 2D affine transform.
///
/// Maps (x, y) to (x', y'):
///   x' = a * x + b * y + c
///   y' = d * x + e * y + f
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Affine {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Affine {
    pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, b, c, d, e, f }
    }

    pub fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 0.0, 1.0, 0.0)
    }

    /// Axis-aligned scaling about the origin. Negative factors mirror the axis.
    pub fn scale(sx: f64, sy: f64) -> Self {
        Self::new(sx, 0.0, 0.0, 0.0, sy, 0.0)
    }

    /// Apply the forward transform: (x, y) -> (x', y').
    pub fn forward(&self, x: f64, y: f64) -> (f64, f64) {
        let xp = self.a * x + self.b * y + self.c;
        let yp = self.d * x + self.e * y + self.f;
        (xp, yp)
    }
}

impl PointTransform for Affine {
    fn transform_point(&self, x: f64, y: f64) -> (f64, f64) {
        self.forward(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_forward_identity() {
        let aff = Affine::identity();
        let (x, y) = aff.forward(5.0, 10.0);
        assert_relative_eq!(x, 5.0);
        assert_relative_eq!(y, 10.0);
    }

    #[test]
    fn test_forward_with_offset_and_scale() {
        let aff = Affine::new(10.0, 0.0, 500000.0, 0.0, -10.0, 6000000.0);
        let (x, y) = aff.forward(0.0, 0.0);
        assert_relative_eq!(x, 500000.0);
        assert_relative_eq!(y, 6000000.0);

        let (x, y) = aff.forward(100.0, 100.0);
        assert_relative_eq!(x, 501000.0);
        assert_relative_eq!(y, 5999000.0);
    }

    #[test]
    fn test_negation() {
        let neg = Affine::scale(-1.0, -1.0);
        let (x, y) = neg.transform_point(3.0, -7.5);
        assert_relative_eq!(x, -3.0);
        assert_relative_eq!(y, 7.5);
    }

    #[test]
    fn test_batch_matches_single() {
        let aff = Affine::new(0.5, 0.25, -3.0, -0.25, 0.5, 2.0);
        let mut coords = vec![(1.0, 2.0), (-4.0, 8.0)];
        aff.transform_batch(&mut coords).unwrap();
        for (&(x, y), (bx, by)) in [(1.0, 2.0), (-4.0, 8.0)].iter().zip(coords) {
            let (ex, ey) = aff.forward(x, y);
            assert_relative_eq!(bx, ex);
            assert_relative_eq!(by, ey);
        }
    }
}
