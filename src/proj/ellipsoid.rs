/// Reference ellipsoid parameters.
#[derive(Clone, Copy, Debug)]
pub struct Ellipsoid {
    /// Semi-major axis (metres)
    pub a: f64,
}

impl Ellipsoid {
    pub const fn new(a: f64) -> Self {
        Self { a }
    }

    /// Half the equatorial circumference, the x-limit of cylindrical
    /// projections centred on their central meridian.
    pub fn half_circumference(&self) -> f64 {
        self.a * std::f64::consts::PI
    }
}

pub const WGS84: Ellipsoid = Ellipsoid::new(6_378_137.0);
