use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::cartesian::{NewCartesianPoint2d, Point2d};
use crate::error::CafemapTypesError;
use crate::geo::datum::Datum;
use crate::geo::point::{GeoPoint2d, NewGeoPoint};
use crate::geo::projection::{
    ChainProjection, GeographicIdentity, InvertedProjection, Projection, WebMercator,
};

/// Coordinate reference system.
///
/// A CRS is identified by its EPSG code and defines how the coordinates of the points map to positions on the
/// Earth.
#[derive(Debug, Clone, PartialEq)]
pub struct Crs {
    epsg_code: u32,
    datum: Datum,
    projection_type: ProjectionType,
}

/// Method of projecting geographic coordinates onto a plane.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ProjectionType {
    /// Geographic CRS: longitude is used as `x` and latitude as `y`.
    None,
    /// Spherical Web Mercator.
    WebMercator,
    /// Transverse Mercator with the given parameters.
    TransverseMercator {
        /// Latitude of origin, degrees.
        lat_0: f64,
        /// Central meridian, degrees.
        lon_0: f64,
        /// Scale factor on the central meridian.
        k_0: f64,
        /// False easting, meters.
        x_0: f64,
        /// False northing, meters.
        y_0: f64,
    },
}

impl Crs {
    /// WGS84 geographic coordinates (EPSG:4326).
    pub const WGS84: Crs = Crs {
        epsg_code: 4326,
        datum: Datum::WGS84,
        projection_type: ProjectionType::None,
    };

    /// Web Mercator (EPSG:3857), used by web map tiles.
    pub const EPSG3857: Crs = Crs {
        epsg_code: 3857,
        datum: Datum::WGS84,
        projection_type: ProjectionType::WebMercator,
    };

    /// CR05 / CRTM05 (EPSG:5367), the official projected CRS of Costa Rica.
    pub const EPSG5367: Crs = Crs {
        epsg_code: 5367,
        datum: Datum::WGS84,
        projection_type: ProjectionType::TransverseMercator {
            lat_0: 0.0,
            lon_0: -84.0,
            k_0: 0.9999,
            x_0: 500_000.0,
            y_0: 0.0,
        },
    };

    /// Parses a CRS identifier.
    ///
    /// Accepted forms are `EPSG:<code>`, `urn:ogc:def:crs:EPSG::<code>` (also with a version between the colons)
    /// and the `CRS84` aliases of WGS84. Only the built-in systems are recognized.
    pub fn from_code(code: &str) -> Result<Self, CafemapTypesError> {
        let normalized = code.trim().to_ascii_uppercase();
        if normalized == "CRS84"
            || normalized == "OGC:CRS84"
            || (normalized.starts_with("URN:OGC:DEF:CRS:OGC:") && normalized.ends_with(":CRS84"))
        {
            return Ok(Self::WGS84);
        }

        let number = normalized
            .strip_prefix("URN:OGC:DEF:CRS:EPSG:")
            .and_then(|rest| rest.rsplit(':').next())
            .or_else(|| normalized.strip_prefix("EPSG:"))
            .and_then(|number| number.parse::<u32>().ok())
            .ok_or_else(|| CafemapTypesError::UnknownCrs(code.to_string()))?;

        match number {
            4326 => Ok(Self::WGS84),
            3857 => Ok(Self::EPSG3857),
            5367 => Ok(Self::EPSG5367),
            _ => Err(CafemapTypesError::UnknownCrs(code.to_string())),
        }
    }

    /// Returns true if the coordinates of the CRS are longitude and latitude.
    pub fn is_geographic(&self) -> bool {
        self.projection_type == ProjectionType::None
    }

    /// Returns the projection from geographic coordinates into the coordinates of this CRS.
    pub fn get_projection<In, Out>(
        &self,
    ) -> Result<Box<dyn Projection<InPoint = In, OutPoint = Out>>, CafemapTypesError>
    where
        In: NewGeoPoint + 'static,
        Out: NewCartesianPoint2d + 'static,
    {
        match &self.projection_type {
            ProjectionType::None => Ok(Box::new(GeographicIdentity::<In, Out>::new())),
            ProjectionType::WebMercator => Ok(Box::new(WebMercator::<In, Out>::new(self.datum))),
            ProjectionType::TransverseMercator {
                lat_0,
                lon_0,
                k_0,
                x_0,
                y_0,
            } => self.geodesy_projection(&format!(
                "tmerc lat_0={lat_0} lon_0={lon_0} k_0={k_0} x_0={x_0} y_0={y_0} ellps={}",
                self.datum.ellps_name()
            )),
        }
    }

    /// Returns the transformation of points in this CRS into the `target` CRS.
    pub fn transformation_to(
        &self,
        target: &Crs,
    ) -> Result<Box<dyn Projection<InPoint = Point2d, OutPoint = Point2d>>, CafemapTypesError>
    {
        let source = self.get_projection::<GeoPoint2d, Point2d>()?;
        let target = target.get_projection::<GeoPoint2d, Point2d>()?;

        Ok(Box::new(ChainProjection::new(
            InvertedProjection::new(source),
            target,
        )))
    }

    #[cfg(feature = "geodesy")]
    fn geodesy_projection<In, Out>(
        &self,
        definition: &str,
    ) -> Result<Box<dyn Projection<InPoint = In, OutPoint = Out>>, CafemapTypesError>
    where
        In: NewGeoPoint + 'static,
        Out: NewCartesianPoint2d + 'static,
    {
        Ok(Box::new(
            crate::geo::projection::GeodesyProjection::<In, Out>::new(definition)?,
        ))
    }

    #[cfg(not(feature = "geodesy"))]
    fn geodesy_projection<In, Out>(
        &self,
        definition: &str,
    ) -> Result<Box<dyn Projection<InPoint = In, OutPoint = Out>>, CafemapTypesError>
    where
        In: NewGeoPoint + 'static,
        Out: NewCartesianPoint2d + 'static,
    {
        Err(CafemapTypesError::Projection(format!(
            "'{definition}' requires the `geodesy` feature"
        )))
    }
}

impl Display for Crs {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "EPSG:{}", self.epsg_code)
    }
}

impl FromStr for Crs {
    type Err = CafemapTypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s)
    }
}

impl Default for Crs {
    fn default() -> Self {
        Self::WGS84
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn parse_codes() {
        assert_eq!(Crs::from_code("EPSG:4326").ok(), Some(Crs::WGS84));
        assert_eq!(Crs::from_code("epsg:5367").ok(), Some(Crs::EPSG5367));
        assert_eq!(
            Crs::from_code("urn:ogc:def:crs:EPSG::3857").ok(),
            Some(Crs::EPSG3857)
        );
        assert_eq!(
            Crs::from_code("urn:ogc:def:crs:EPSG:9.8.15:5367").ok(),
            Some(Crs::EPSG5367)
        );
        assert_eq!(
            Crs::from_code("urn:ogc:def:crs:OGC:1.3:CRS84").ok(),
            Some(Crs::WGS84)
        );
        assert_eq!(" EPSG:4326 ".parse::<Crs>().ok(), Some(Crs::WGS84));
    }

    #[test]
    fn parse_unknown_code() {
        assert_matches!(
            Crs::from_code("EPSG:32616"),
            Err(CafemapTypesError::UnknownCrs(_))
        );
        assert_matches!(
            Crs::from_code("mercator"),
            Err(CafemapTypesError::UnknownCrs(_))
        );
    }

    #[test]
    fn display_is_epsg_code() {
        assert_eq!(Crs::WGS84.to_string(), "EPSG:4326");
        assert_eq!(Crs::EPSG5367.to_string(), "EPSG:5367");
    }

    #[test]
    fn geographic_projection_is_identity() {
        let projection = Crs::WGS84
            .get_projection::<GeoPoint2d, Point2d>()
            .expect("built-in");
        let projected = projection
            .project(&GeoPoint2d::latlon(10.0, -84.0))
            .expect("valid point");

        assert_eq!(projected, Point2d::new(-84.0, 10.0));
        assert!(Crs::WGS84.is_geographic());
        assert!(!Crs::EPSG5367.is_geographic());
    }

    #[test]
    fn transformation_between_projected_systems() {
        let to_mercator = Crs::EPSG5367
            .transformation_to(&Crs::EPSG3857)
            .expect("built-in");
        let from_mercator = Crs::EPSG3857
            .transformation_to(&Crs::EPSG5367)
            .expect("built-in");

        let point = Point2d::new(480_000.0, 1_100_000.0);
        let mercator = to_mercator.project(&point).expect("valid point");
        let back = from_mercator.project(&mercator).expect("valid point");

        assert_abs_diff_eq!(back, point, epsilon = 1e-3);
    }
}
