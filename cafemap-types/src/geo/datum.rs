/// Reference ellipsoid of a coordinate reference system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Datum {
    name: &'static str,
    semimajor: f64,
}

impl Datum {
    /// WGS 84 ellipsoid.
    pub const WGS84: Self = Datum {
        name: "WGS84",
        semimajor: 6_378_137.0,
    };

    /// Semi-major axis in meters.
    pub fn semimajor(&self) -> f64 {
        self.semimajor
    }

    /// Ellipsoid name in the form understood by the `geodesy` operator parser.
    pub fn ellps_name(&self) -> &'static str {
        self.name
    }
}

impl Default for Datum {
    fn default() -> Self {
        Self::WGS84
    }
}
