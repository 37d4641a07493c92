use std::marker::PhantomData;

use geodesy::prelude::*;

use crate::cartesian::NewCartesianPoint2d;
use crate::error::CafemapTypesError;
use crate::geo::point::NewGeoPoint;
use crate::geo::projection::Projection;

/// Projection backed by a `geodesy` operator pipeline, e.g. `tmerc lon_0=-84 k_0=0.9999 x_0=500000`.
pub struct GeodesyProjection<In, Out> {
    context: Minimal,
    op: OpHandle,
    phantom_in: PhantomData<In>,
    phantom_out: PhantomData<Out>,
}

impl<In, Out> GeodesyProjection<In, Out> {
    /// Parses the operator definition.
    pub fn new(definition: &str) -> Result<Self, CafemapTypesError> {
        let mut context = Minimal::new();
        let op = context.op(definition).map_err(|err| {
            CafemapTypesError::Projection(format!("invalid definition '{definition}': {err}"))
        })?;

        Ok(Self {
            context,
            op,
            phantom_in: Default::default(),
            phantom_out: Default::default(),
        })
    }
}

impl<In: NewGeoPoint<f64>, Out: NewCartesianPoint2d<f64>> Projection
    for GeodesyProjection<In, Out>
{
    type InPoint = In;
    type OutPoint = Out;

    fn project(&self, input: &Self::InPoint) -> Option<Self::OutPoint> {
        let mut data = [Coor2D::geo(input.lat(), input.lon())];
        self.context.apply(self.op, Fwd, &mut data).ok()?;

        let [x, y] = data[0].0;
        if !x.is_finite() || !y.is_finite() {
            return None;
        }

        Some(Out::new(x, y))
    }

    fn unproject(&self, input: &Self::OutPoint) -> Option<Self::InPoint> {
        let mut data = [Coor2D([input.x(), input.y()])];
        self.context.apply(self.op, Inv, &mut data).ok()?;

        let [lon, lat] = data[0].0;
        if !lon.is_finite() || !lat.is_finite() {
            return None;
        }

        Some(In::latlon(lat.to_degrees(), lon.to_degrees()))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::cartesian::Point2d;
    use crate::geo::{GeoPoint, GeoPoint2d};

    const CRTM05: &str = "tmerc lat_0=0 lon_0=-84 k_0=0.9999 x_0=500000 y_0=0 ellps=WGS84";

    #[test]
    fn central_meridian_maps_to_false_easting() {
        let projection = GeodesyProjection::<GeoPoint2d, Point2d>::new(CRTM05).expect("valid");
        let projected = projection
            .project(&GeoPoint2d::latlon(0.0, -84.0))
            .expect("valid point");

        assert_abs_diff_eq!(projected.x, 500_000.0, epsilon = 1e-3);
        assert_abs_diff_eq!(projected.y, 0.0, epsilon = 1e-3);
    }

    #[test]
    fn round_trip() {
        let projection = GeodesyProjection::<GeoPoint2d, Point2d>::new(CRTM05).expect("valid");
        let point = GeoPoint2d::latlon(9.93, -84.08);
        let projected = projection.project(&point).expect("valid point");
        let unprojected = projection.unproject(&projected).expect("valid point");

        assert_abs_diff_eq!(unprojected.lat(), point.lat(), epsilon = 1e-7);
        assert_abs_diff_eq!(unprojected.lon(), point.lon(), epsilon = 1e-7);
    }

    #[test]
    fn invalid_definition() {
        assert!(GeodesyProjection::<GeoPoint2d, Point2d>::new("no_such_operator").is_err());
    }
}
