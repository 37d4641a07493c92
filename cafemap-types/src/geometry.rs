use serde::{Deserialize, Serialize};

use crate::cartesian::{CartesianPoint2d, Rect};
use crate::contour::Contour;
use crate::geo::Projection;
use crate::multi::{MultiContour, MultiPoint, MultiPolygon};
use crate::polygon::Polygon;

/// Any of the supported geometries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Geom<P> {
    /// Point.
    Point(P),
    /// Set of points.
    MultiPoint(MultiPoint<P>),
    /// Line.
    Contour(Contour<P>),
    /// Set of lines.
    MultiContour(MultiContour<P>),
    /// Polygon.
    Polygon(Polygon<P>),
    /// Set of polygons.
    MultiPolygon(MultiPolygon<P>),
}

/// Geometry that can be projected into a different coordinate space.
pub trait Geometry {
    /// Type of the points of the geometry.
    type Point;

    /// Projects every point of the geometry. Returns `None` if any of the points cannot be projected.
    fn project<Proj>(&self, projection: &Proj) -> Option<Geom<Proj::OutPoint>>
    where
        Proj: Projection<InPoint = Self::Point> + ?Sized;
}

impl<P> Geometry for Geom<P> {
    type Point = P;

    fn project<Proj>(&self, projection: &Proj) -> Option<Geom<Proj::OutPoint>>
    where
        Proj: Projection<InPoint = P> + ?Sized,
    {
        match self {
            Geom::Point(v) => Some(Geom::Point(projection.project(v)?)),
            Geom::MultiPoint(v) => v.project(projection),
            Geom::Contour(v) => v.project(projection),
            Geom::MultiContour(v) => v.project(projection),
            Geom::Polygon(v) => v.project(projection),
            Geom::MultiPolygon(v) => v.project(projection),
        }
    }
}

impl<P: CartesianPoint2d<Num = f64>> Geom<P> {
    /// Bounding rectangle of the geometry. `None` for empty geometries.
    pub fn bounding_rect(&self) -> Option<Rect> {
        match self {
            Geom::Point(v) => Some(Rect::from_point(v)),
            Geom::MultiPoint(v) => v.bounding_rect(),
            Geom::Contour(v) => v.bounding_rect(),
            Geom::MultiContour(v) => v.bounding_rect(),
            Geom::Polygon(v) => v.bounding_rect(),
            Geom::MultiPolygon(v) => v.bounding_rect(),
        }
    }

    /// Planar area of the geometry in the units of its coordinates squared. Zero for points and lines.
    pub fn area(&self) -> f64 {
        match self {
            Geom::Polygon(v) => v.area(),
            Geom::MultiPolygon(v) => v.area(),
            _ => 0.0,
        }
    }
}

impl<P> From<Contour<P>> for Geom<P> {
    fn from(value: Contour<P>) -> Self {
        Self::Contour(value)
    }
}

impl<P> From<Polygon<P>> for Geom<P> {
    fn from(value: Polygon<P>) -> Self {
        Self::Polygon(value)
    }
}

impl<P> From<MultiPolygon<P>> for Geom<P> {
    fn from(value: MultiPolygon<P>) -> Self {
        Self::MultiPolygon(value)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::cartesian::Point2d;
    use crate::geo::Crs;
    use crate::ClosedContour;

    fn square(x: f64, y: f64, size: f64) -> Polygon<Point2d> {
        Polygon::from(vec![
            Point2d::new(x, y),
            Point2d::new(x + size, y),
            Point2d::new(x + size, y + size),
            Point2d::new(x, y + size),
        ])
    }

    #[test]
    fn kilometer_square_area() {
        let geom: Geom<Point2d> = square(500_000.0, 1_100_000.0, 1_000.0).into();
        assert_eq!(geom.area() / 1_000_000.0, 1.0);
    }

    #[test]
    fn multipolygon_area_and_bounds() {
        let geom: Geom<Point2d> =
            MultiPolygon::from(vec![square(0.0, 0.0, 2.0), square(5.0, 5.0, 1.0)]).into();

        assert_eq!(geom.area(), 5.0);
        assert_eq!(geom.bounding_rect(), Some(Rect::new(0.0, 0.0, 6.0, 6.0)));
    }

    #[test]
    fn points_and_lines_have_no_area() {
        let point: Geom<Point2d> = Geom::Point(Point2d::new(1.0, 2.0));
        let line: Geom<Point2d> =
            Contour::new(vec![Point2d::new(0.0, 0.0), Point2d::new(3.0, 4.0)], false).into();

        assert_eq!(point.area(), 0.0);
        assert_eq!(line.area(), 0.0);
        assert_eq!(point.bounding_rect(), Some(Rect::new(1.0, 2.0, 1.0, 2.0)));
        assert_eq!(line.bounding_rect(), Some(Rect::new(0.0, 0.0, 3.0, 4.0)));
    }

    #[test]
    fn empty_geometry_has_no_bounds() {
        let geom: Geom<Point2d> = MultiPolygon::default().into();
        assert_eq!(geom.bounding_rect(), None);
    }

    #[test]
    fn projected_area_of_geographic_square() {
        // 0.01 x 0.01 degrees near the central meridian of CRTM05 at 10N.
        let geom: Geom<Point2d> = Polygon::from(ClosedContour::new(vec![
            Point2d::new(-84.0, 10.0),
            Point2d::new(-83.99, 10.0),
            Point2d::new(-83.99, 10.01),
            Point2d::new(-84.0, 10.01),
        ]))
        .into();

        let transformation = Crs::WGS84
            .transformation_to(&Crs::EPSG5367)
            .expect("built-in");
        let projected = geom.project(&*transformation).expect("projectable");

        assert_abs_diff_eq!(projected.area() / 1_000_000.0, 1.2125, epsilon = 0.01);
    }
}
