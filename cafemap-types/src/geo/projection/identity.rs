use std::marker::PhantomData;

use crate::cartesian::NewCartesianPoint2d;
use crate::geo::point::NewGeoPoint;
use crate::geo::projection::Projection;

/// Projection of a geographic CRS onto its own coordinates: longitude becomes `x`, latitude becomes `y`.
#[derive(Debug, Clone, Copy)]
pub struct GeographicIdentity<In, Out> {
    phantom_in: PhantomData<In>,
    phantom_out: PhantomData<Out>,
}

impl<In, Out> GeographicIdentity<In, Out> {
    /// Creates a new instance.
    pub fn new() -> Self {
        Self {
            phantom_in: Default::default(),
            phantom_out: Default::default(),
        }
    }
}

impl<In, Out> Default for GeographicIdentity<In, Out> {
    fn default() -> Self {
        Self::new()
    }
}

impl<In: NewGeoPoint<f64>, Out: NewCartesianPoint2d<f64>> Projection for GeographicIdentity<In, Out> {
    type InPoint = In;
    type OutPoint = Out;

    fn project(&self, input: &Self::InPoint) -> Option<Self::OutPoint> {
        Some(Out::new(input.lon(), input.lat()))
    }

    fn unproject(&self, input: &Self::OutPoint) -> Option<Self::InPoint> {
        Some(In::latlon(input.y(), input.x()))
    }
}
