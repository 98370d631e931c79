//! Valid coordinate ranges of target projections.

use crate::error::ExtentError;
use crate::extent::Bounds;
use crate::proj::ellipsoid::WGS84;

/// Share of the x-limits above which a clipped extent snaps to the full
/// x-range. Extents that nearly wrap the globe are treated as wrapping it.
const FULL_WIDTH_SNAP: f64 = 0.9;

/// Coordinate limits of a target projection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TargetLimits {
    pub x: (f64, f64),
    pub y: (f64, f64),
}

impl TargetLimits {
    pub fn new(x: (f64, f64), y: (f64, f64)) -> Result<Self, ExtentError> {
        let ok = |(lo, hi): (f64, f64)| lo.is_finite() && hi.is_finite() && lo < hi;
        if !ok(x) || !ok(y) {
            return Err(ExtentError::InvalidRegion(format!(
                "limits must be finite with min < max, got x={x:?}, y={y:?}"
            )));
        }
        Ok(Self { x, y })
    }

    /// EPSG:3857 square.
    pub fn web_mercator() -> Self {
        let e = WGS84.half_circumference();
        Self {
            x: (-e, e),
            y: (-e, e),
        }
    }

    /// WGS84 Plate Carrée / EPSG:4087.
    pub fn plate_carree() -> Self {
        let e = WGS84.half_circumference();
        Self {
            x: (-e, e),
            y: (-e / 2.0, e / 2.0),
        }
    }

    /// Geographic degrees.
    pub fn geographic() -> Self {
        Self {
            x: (-180.0, 180.0),
            y: (-90.0, 90.0),
        }
    }
}

impl Bounds {
    /// Clamp into `limits`, snapping to the full x-range when the clamped
    /// extent covers more than 90% of it.
    pub fn clip_to(&self, limits: &TargetLimits) -> Bounds {
        let (lx0, lx1) = limits.x;
        let (ly0, ly1) = limits.y;
        let mut clipped = Bounds {
            x_min: self.x_min.clamp(lx0, lx1),
            x_max: self.x_max.clamp(lx0, lx1),
            y_min: self.y_min.clamp(ly0, ly1),
            y_max: self.y_max.clamp(ly0, ly1),
        };
        if clipped.width() / (lx1 - lx0) > FULL_WIDTH_SNAP {
            clipped.x_min = lx0;
            clipped.x_max = lx1;
        }
        clipped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn bounds(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Bounds {
        Bounds {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    #[test]
    fn test_clamps_each_bound() {
        let limits = TargetLimits::geographic();
        let clipped = bounds(-200.0, 10.0, -95.0, 30.0).clip_to(&limits);
        assert_eq!(clipped, bounds(-180.0, 10.0, -90.0, 30.0));
    }

    #[test]
    fn test_inside_is_untouched() {
        let limits = TargetLimits::geographic();
        let b = bounds(-20.0, 40.0, -10.0, 10.0);
        assert_eq!(b.clip_to(&limits), b);
    }

    #[test]
    fn test_near_full_width_snaps() {
        let limits = TargetLimits::geographic();
        let clipped = bounds(-170.0, 170.0, 0.0, 1.0).clip_to(&limits);
        assert_relative_eq!(clipped.x_min, -180.0);
        assert_relative_eq!(clipped.x_max, 180.0);

        // 90% exactly does not snap
        let clipped = bounds(-162.0, 162.0, 0.0, 1.0).clip_to(&limits);
        assert_relative_eq!(clipped.x_min, -162.0);
    }

    #[test]
    fn test_new_validates() {
        assert!(TargetLimits::new((0.0, 1.0), (0.0, 1.0)).is_ok());
        assert!(TargetLimits::new((1.0, 1.0), (0.0, 1.0)).is_err());
        assert!(TargetLimits::new((0.0, 1.0), (f64::NEG_INFINITY, 1.0)).is_err());
    }

    #[test]
    fn test_projection_limits() {
        let wm = TargetLimits::web_mercator();
        assert_relative_eq!(wm.x.1, 20_037_508.342_789_244, epsilon = 1e-6);
        assert_eq!(wm.x, wm.y);
        let pc = TargetLimits::plate_carree();
        assert_relative_eq!(pc.y.1 * 2.0, pc.x.1);
    }
}
