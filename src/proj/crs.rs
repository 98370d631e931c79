use proj4rs::Proj;

use crate::error::ProjError;
use crate::transform::PointTransform;

/// Thin wrapper around proj4rs that handles radians/degrees conversion transparently.
///
/// proj4rs uses radians for geographic CRS, while callers pass degrees for
/// EPSG:4326-like CRS. This wrapper auto-converts.
pub struct CrsTransform {
    src: Proj,
    dst: Proj,
    src_is_geo: bool,
    dst_is_geo: bool,
}

impl CrsTransform {
    /// Create a new CRS transform from source and destination CRS strings.
    ///
    /// Accepts EPSG codes ("EPSG:4326") or PROJ strings ("+proj=utm +zone=33 ...").
    pub fn new(src_crs: &str, dst_crs: &str) -> Result<Self, ProjError> {
        let src = Proj::from_user_string(src_crs)
            .map_err(|e| ProjError::UnknownCrs(format!("{src_crs}: {e}")))?;
        let dst = Proj::from_user_string(dst_crs)
            .map_err(|e| ProjError::UnknownCrs(format!("{dst_crs}: {e}")))?;
        let src_is_geo = src.is_latlong();
        let dst_is_geo = dst.is_latlong();
        Ok(Self {
            src,
            dst,
            src_is_geo,
            dst_is_geo,
        })
    }

    /// Transform a single point from source CRS to destination CRS.
    ///
    /// Input/output coordinates are in CRS native units (degrees for geographic,
    /// metres for projected). The radians conversion is handled internally.
    pub fn transform(&self, x: f64, y: f64) -> Result<(f64, f64), ProjError> {
        let mut point = if self.src_is_geo {
            (x.to_radians(), y.to_radians())
        } else {
            (x, y)
        };

        proj4rs::transform::transform(&self.src, &self.dst, &mut point)
            .map_err(|e| ProjError::TransformFailed(e.to_string()))?;

        if self.dst_is_geo {
            Ok((point.0.to_degrees(), point.1.to_degrees()))
        } else {
            Ok(point)
        }
    }
}

impl PointTransform for CrsTransform {
    fn transform_point(&self, x: f64, y: f64) -> (f64, f64) {
        // A failed point becomes NaN without failing the rest of the batch
        self.transform(x, y).unwrap_or((f64::NAN, f64::NAN))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_roundtrip_4326_to_32633() {
        // Oslo, Norway: ~10.75°E, ~59.91°N
        let fwd = CrsTransform::new("EPSG:4326", "EPSG:32633").unwrap();
        let inv = CrsTransform::new("EPSG:32633", "EPSG:4326").unwrap();

        let lon = 10.75;
        let lat = 59.91;

        let (e, n) = fwd.transform(lon, lat).unwrap();
        // UTM zone 33 easting should be near 500000 + offset, northing near 6.6M
        assert!(e > 200_000.0 && e < 800_000.0, "easting out of range: {e}");
        assert!(
            n > 6_000_000.0 && n < 7_000_000.0,
            "northing out of range: {n}"
        );

        let (lon2, lat2) = inv.transform(e, n).unwrap();
        assert_relative_eq!(lon2, lon, epsilon = 1e-8);
        assert_relative_eq!(lat2, lat, epsilon = 1e-8);
    }

    #[test]
    fn test_invalid_crs() {
        let result = CrsTransform::new("EPSG:99999", "EPSG:4326");
        assert!(matches!(result, Err(ProjError::UnknownCrs(_))));
    }

    #[test]
    fn test_batch_transform() {
        let ct = CrsTransform::new("EPSG:32633", "EPSG:4326").unwrap();

        let mut coords = vec![(500000.0, 6600000.0), (510000.0, 6610000.0)];
        ct.transform_batch(&mut coords).unwrap();

        // Results should be in degrees (geographic target)
        for (lon, lat) in &coords {
            assert!(*lon > 5.0 && *lon < 20.0, "lon out of range: {lon}");
            assert!(*lat > 55.0 && *lat < 65.0, "lat out of range: {lat}");
        }
    }

    #[test]
    fn test_projected_to_projected() {
        let ct = CrsTransform::new("EPSG:32633", "EPSG:3857").unwrap();
        let (x, y) = ct.transform_point(500000.0, 6600000.0);
        assert!(x.abs() < 20_037_509.0, "x out of range: {x}");
        assert!(y.abs() < 20_037_509.0, "y out of range: {y}");
    }
}
