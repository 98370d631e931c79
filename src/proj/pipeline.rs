//! CRS-to-CRS forward transform chain that dispatches between
//! native pure-Rust projections and proj4rs fallback.

use crate::error::ProjError;
use crate::proj::crs::CrsTransform;
use crate::proj::equirectangular::Equirectangular;
use crate::proj::mercator::WebMercator;
use crate::proj::Projection;
use crate::transform::PointTransform;

/// Describes a CRS endpoint in the pipeline.
pub enum CrsEndpoint {
    /// Geographic CRS: coordinates are in degrees externally, radians internally.
    Geographic,
    /// Projected CRS: coordinates are in metres.
    Projected(Box<dyn Projection>),
}

/// A source-to-target CRS transform pipeline.
///
/// For supported EPSG codes, uses native pure-Rust projection math.
/// Falls back to proj4rs for anything else.
pub enum Pipeline {
    /// Both src and dst are native endpoints.
    Native { src: CrsEndpoint, dst: CrsEndpoint },
    /// Fallback to proj4rs for unsupported CRSes.
    Proj4rs(Box<CrsTransform>),
}

impl Pipeline {
    /// Create a Pipeline from source and destination CRS strings.
    ///
    /// Tries to parse both as EPSG codes and create native projections.
    /// Falls back to proj4rs if either is unrecognized.
    pub fn new(src_crs: &str, dst_crs: &str) -> Result<Self, ProjError> {
        let src = parse_epsg(src_crs);
        let dst = parse_epsg(dst_crs);

        if let (Some(src_ep), Some(dst_ep)) = (src, dst) {
            Ok(Pipeline::from_endpoints(src_ep, dst_ep))
        } else {
            let ct = CrsTransform::new(src_crs, dst_crs)?;
            Ok(Pipeline::Proj4rs(Box::new(ct)))
        }
    }

    /// Build a native pipeline from explicit endpoints, e.g. a Plate Carrée
    /// with a non-zero central meridian.
    pub fn from_endpoints(src: CrsEndpoint, dst: CrsEndpoint) -> Self {
        Pipeline::Native { src, dst }
    }

    /// Transform a single point from source CRS to destination CRS.
    ///
    /// Input/output coordinates are in CRS native units (degrees for geographic,
    /// metres for projected).
    pub fn transform(&self, x: f64, y: f64) -> Result<(f64, f64), ProjError> {
        match self {
            Pipeline::Native { src, dst } => {
                // Step 1: src coords → (lon_rad, lat_rad)
                let (lon, lat) = match src {
                    CrsEndpoint::Geographic => (x.to_radians(), y.to_radians()),
                    CrsEndpoint::Projected(proj) => proj.inverse(x, y)?,
                };

                // Step 2: (lon_rad, lat_rad) → dst coords
                match dst {
                    CrsEndpoint::Geographic => Ok((lon.to_degrees(), lat.to_degrees())),
                    CrsEndpoint::Projected(proj) => proj.forward(lon, lat),
                }
            }
            Pipeline::Proj4rs(ct) => ct.transform(x, y),
        }
    }
}

impl PointTransform for Pipeline {
    fn transform_point(&self, x: f64, y: f64) -> (f64, f64) {
        self.transform(x, y).unwrap_or((f64::NAN, f64::NAN))
    }

    fn transform_batch(&self, coords: &mut [(f64, f64)]) -> Result<(), ProjError> {
        match self {
            Pipeline::Native { .. } => {
                for c in coords.iter_mut() {
                    *c = self.transform_point(c.0, c.1);
                }
                Ok(())
            }
            Pipeline::Proj4rs(ct) => ct.transform_batch(coords),
        }
    }
}

/// Try to parse an EPSG code and return a `CrsEndpoint`.
fn parse_epsg(crs: &str) -> Option<CrsEndpoint> {
    let code = crs
        .strip_prefix("EPSG:")
        .or_else(|| crs.strip_prefix("epsg:"))?
        .parse::<u32>()
        .ok()?;

    match code {
        // Geographic CRS is an identity pass-through (degrees ↔ radians handled by Pipeline)
        4326 => Some(CrsEndpoint::Geographic),

        // Web Mercator
        3857 => Some(CrsEndpoint::Projected(Box::new(WebMercator::new()))),

        // World Equidistant Cylindrical
        4087 => Some(CrsEndpoint::Projected(Box::new(Equirectangular::epsg_4087()))),

        _ => None,
    }
}
