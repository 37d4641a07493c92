//! Conversion of points between coordinate spaces.

mod identity;
mod web_mercator;

#[cfg(feature = "geodesy")]
mod geodesy;

pub use identity::GeographicIdentity;
pub use web_mercator::WebMercator;

#[cfg(feature = "geodesy")]
pub use self::geodesy::GeodesyProjection;

/// Projection converts points from one coordinate space into another and back.
pub trait Projection {
    /// Type of the input point.
    type InPoint;
    /// Type of the output point.
    type OutPoint;

    /// Projects a point. Returns `None` if the point cannot be projected.
    fn project(&self, input: &Self::InPoint) -> Option<Self::OutPoint>;
    /// Projects a point back. Returns `None` if the point cannot be unprojected.
    fn unproject(&self, input: &Self::OutPoint) -> Option<Self::InPoint>;
}

impl<T: Projection + ?Sized> Projection for Box<T> {
    type InPoint = T::InPoint;
    type OutPoint = T::OutPoint;

    fn project(&self, input: &Self::InPoint) -> Option<Self::OutPoint> {
        (**self).project(input)
    }

    fn unproject(&self, input: &Self::OutPoint) -> Option<Self::InPoint> {
        (**self).unproject(input)
    }
}

/// Projection that swaps the direction of the wrapped one.
pub struct InvertedProjection<P> {
    inner: P,
}

impl<P> InvertedProjection<P> {
    /// Wraps the projection.
    pub fn new(inner: P) -> Self {
        Self { inner }
    }
}

impl<P: Projection> Projection for InvertedProjection<P> {
    type InPoint = P::OutPoint;
    type OutPoint = P::InPoint;

    fn project(&self, input: &Self::InPoint) -> Option<Self::OutPoint> {
        self.inner.unproject(input)
    }

    fn unproject(&self, input: &Self::OutPoint) -> Option<Self::InPoint> {
        self.inner.project(input)
    }
}

/// Applies `first` and then `second` projection.
pub struct ChainProjection<First, Second> {
    first: First,
    second: Second,
}

impl<First, Second> ChainProjection<First, Second> {
    /// Creates a new chain.
    pub fn new(first: First, second: Second) -> Self {
        Self { first, second }
    }
}

impl<First, Second> Projection for ChainProjection<First, Second>
where
    First: Projection,
    Second: Projection<InPoint = First::OutPoint>,
{
    type InPoint = First::InPoint;
    type OutPoint = Second::OutPoint;

    fn project(&self, input: &Self::InPoint) -> Option<Self::OutPoint> {
        self.second.project(&self.first.project(input)?)
    }

    fn unproject(&self, input: &Self::OutPoint) -> Option<Self::InPoint> {
        self.first.unproject(&self.second.unproject(input)?)
    }
}
