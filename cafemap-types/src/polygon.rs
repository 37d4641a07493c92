use serde::{Deserialize, Serialize};

use crate::cartesian::{CartesianPoint2d, Rect};
use crate::contour::ClosedContour;
use crate::geo::Projection;
use crate::geometry::{Geom, Geometry};

/// Polygon geometry. Polygon consists of one outer contour, and zero or more inner contours (holes).
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Polygon<P> {
    /// Outer contour.
    pub outer_contour: ClosedContour<P>,
    /// Inner contours.
    pub inner_contours: Vec<ClosedContour<P>>,
}

impl<P> Polygon<P> {
    /// Creates a new polygon.
    pub fn new(outer_contour: ClosedContour<P>, inner_contours: Vec<ClosedContour<P>>) -> Self {
        Self {
            outer_contour,
            inner_contours,
        }
    }

    /// Iterates over all contours of the polygon starting with the outer one.
    pub fn iter_contours(&self) -> impl Iterator<Item = &ClosedContour<P>> {
        std::iter::once(&self.outer_contour).chain(self.inner_contours.iter())
    }
}

impl<P: CartesianPoint2d<Num = f64>> Polygon<P> {
    /// Planar area: area of the outer contour minus the areas of the holes.
    ///
    /// Orientation of the contours is ignored.
    pub fn area(&self) -> f64 {
        let holes: f64 = self.inner_contours.iter().map(ClosedContour::area).sum();
        self.outer_contour.area() - holes
    }

    /// Bounding rectangle of the outer contour.
    pub fn bounding_rect(&self) -> Option<Rect> {
        self.outer_contour.bounding_rect()
    }
}

impl<P> Geometry for Polygon<P> {
    type Point = P;

    fn project<Proj>(&self, projection: &Proj) -> Option<Geom<Proj::OutPoint>>
    where
        Proj: Projection<InPoint = Self::Point> + ?Sized,
    {
        self.project_polygon(projection).map(Geom::Polygon)
    }
}

impl<P> Polygon<P> {
    pub(crate) fn project_polygon<Proj>(&self, projection: &Proj) -> Option<Polygon<Proj::OutPoint>>
    where
        Proj: Projection<InPoint = P> + ?Sized,
    {
        Some(Polygon {
            outer_contour: self.outer_contour.project_points(projection)?,
            inner_contours: self
                .inner_contours
                .iter()
                .map(|c| c.project_points(projection))
                .collect::<Option<Vec<_>>>()?,
        })
    }
}

impl<P> From<ClosedContour<P>> for Polygon<P> {
    fn from(value: ClosedContour<P>) -> Self {
        Self {
            outer_contour: value,
            inner_contours: vec![],
        }
    }
}

impl<P> From<Vec<P>> for Polygon<P> {
    fn from(value: Vec<P>) -> Self {
        ClosedContour::new(value).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cartesian::Point2d;

    fn square(x: f64, y: f64, size: f64) -> ClosedContour<Point2d> {
        ClosedContour::new(vec![
            Point2d::new(x, y),
            Point2d::new(x + size, y),
            Point2d::new(x + size, y + size),
            Point2d::new(x, y + size),
        ])
    }

    #[test]
    fn area_with_hole() {
        let polygon = Polygon::new(square(0.0, 0.0, 10.0), vec![square(2.0, 2.0, 3.0)]);
        assert_eq!(polygon.area(), 91.0);
    }

    #[test]
    fn area_ignores_orientation() {
        let mut reversed = square(0.0, 0.0, 10.0);
        reversed.points.reverse();

        assert_eq!(Polygon::from(reversed).area(), 100.0);
    }

    #[test]
    fn bounding_rect() {
        let polygon = Polygon::new(square(1.0, 2.0, 3.0), vec![square(1.5, 2.5, 1.0)]);
        assert_eq!(polygon.bounding_rect(), Some(Rect::new(1.0, 2.0, 4.0, 5.0)));
    }
}
