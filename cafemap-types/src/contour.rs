//! Contour is a sequence of points.
//!
//! Contours can be **open** (a road) or **closed** (a shoreline). Unlike an OGC `LineString`, a closed contour does
//! not repeat its first point at the end: the segment between the last and the first point is implied. Polygons
//! consist only of [`ClosedContour`]s.

use num_traits::{Float, One, Zero};
use serde::{Deserialize, Serialize};

use crate::cartesian::{CartesianPoint2d, Rect};
use crate::geo::Projection;
use crate::geometry::{Geom, Geometry};

/// Sequence of points, either open or closed.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Contour<P> {
    points: Vec<P>,
    is_closed: bool,
}

impl<P> Contour<P> {
    /// Creates a new contour.
    pub fn new(points: Vec<P>, is_closed: bool) -> Self {
        Self { points, is_closed }
    }

    /// Whether the last point is connected to the first one.
    pub fn is_closed(&self) -> bool {
        self.is_closed
    }

    /// Points of the contour.
    pub fn points(&self) -> &[P] {
        &self.points
    }
}

impl<P> Geometry for Contour<P> {
    type Point = P;

    fn project<Proj>(&self, projection: &Proj) -> Option<Geom<Proj::OutPoint>>
    where
        Proj: Projection<InPoint = Self::Point> + ?Sized,
    {
        Some(Geom::Contour(Contour::new(
            project_points(&self.points, projection)?,
            self.is_closed,
        )))
    }
}

impl<P: CartesianPoint2d<Num = f64>> Contour<P> {
    /// Bounding rectangle of the contour.
    pub fn bounding_rect(&self) -> Option<Rect> {
        Rect::from_points(self.points.iter())
    }
}

/// A closed contour (ring). See module documentation for details.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ClosedContour<P> {
    /// Points of the ring, the first point is not repeated at the end.
    pub points: Vec<P>,
}

impl<P> ClosedContour<P> {
    /// Creates a new ring.
    pub fn new(points: Vec<P>) -> Self {
        Self { points }
    }

    /// Iterates over the points, repeating the first point at the end.
    pub fn iter_points_closing(&self) -> impl Iterator<Item = &P> {
        self.points.iter().chain(self.points.first())
    }

    /// Projects all points of the ring.
    pub fn project_points<Proj>(&self, projection: &Proj) -> Option<ClosedContour<Proj::OutPoint>>
    where
        Proj: Projection<InPoint = P> + ?Sized,
    {
        Some(ClosedContour::new(project_points(&self.points, projection)?))
    }
}

impl<P: CartesianPoint2d> ClosedContour<P> {
    /// Signed area of the ring (shoelace formula). Positive for counter-clockwise rings.
    pub fn area_signed(&self) -> P::Num {
        let mut iter = self.iter_points_closing();
        let Some(mut prev) = iter.next() else {
            return P::Num::zero();
        };

        let mut aggr = P::Num::zero();
        for p in iter {
            aggr = aggr + prev.x() * p.y() - p.x() * prev.y();
            prev = p;
        }

        aggr / (P::Num::one() + P::Num::one())
    }

    /// Area of the ring regardless of its orientation.
    pub fn area(&self) -> P::Num {
        self.area_signed().abs()
    }
}

impl<P: CartesianPoint2d<Num = f64>> ClosedContour<P> {
    /// Bounding rectangle of the ring.
    pub fn bounding_rect(&self) -> Option<Rect> {
        Rect::from_points(self.points.iter())
    }
}

impl<P> From<ClosedContour<P>> for Contour<P> {
    fn from(value: ClosedContour<P>) -> Self {
        Self::new(value.points, true)
    }
}

pub(crate) fn project_points<P, Proj>(points: &[P], projection: &Proj) -> Option<Vec<Proj::OutPoint>>
where
    Proj: Projection<InPoint = P> + ?Sized,
{
    points.iter().map(|p| projection.project(p)).collect()
}
