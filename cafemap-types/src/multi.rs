//! Collections of simple geometries.

use serde::{Deserialize, Serialize};

use crate::cartesian::{CartesianPoint2d, Rect};
use crate::contour::{project_points, Contour};
use crate::geo::Projection;
use crate::geometry::{Geom, Geometry};
use crate::polygon::Polygon;

/// Set of points.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct MultiPoint<P> {
    /// Points of the set.
    pub points: Vec<P>,
}

/// Set of contours.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct MultiContour<P> {
    /// Contours of the set.
    pub contours: Vec<Contour<P>>,
}

/// Set of polygons.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct MultiPolygon<P> {
    /// Polygons of the set.
    pub parts: Vec<Polygon<P>>,
}

impl<P> From<Vec<P>> for MultiPoint<P> {
    fn from(points: Vec<P>) -> Self {
        Self { points }
    }
}

impl<P> From<Vec<Contour<P>>> for MultiContour<P> {
    fn from(contours: Vec<Contour<P>>) -> Self {
        Self { contours }
    }
}

impl<P> From<Vec<Polygon<P>>> for MultiPolygon<P> {
    fn from(parts: Vec<Polygon<P>>) -> Self {
        Self { parts }
    }
}

impl<P> Geometry for MultiPoint<P> {
    type Point = P;

    fn project<Proj>(&self, projection: &Proj) -> Option<Geom<Proj::OutPoint>>
    where
        Proj: Projection<InPoint = Self::Point> + ?Sized,
    {
        Some(Geom::MultiPoint(project_points(&self.points, projection)?.into()))
    }
}

impl<P> Geometry for MultiContour<P> {
    type Point = P;

    fn project<Proj>(&self, projection: &Proj) -> Option<Geom<Proj::OutPoint>>
    where
        Proj: Projection<InPoint = Self::Point> + ?Sized,
    {
        let contours = self
            .contours
            .iter()
            .map(|c| {
                Some(Contour::new(
                    project_points(c.points(), projection)?,
                    c.is_closed(),
                ))
            })
            .collect::<Option<Vec<_>>>()?;

        Some(Geom::MultiContour(contours.into()))
    }
}

impl<P> Geometry for MultiPolygon<P> {
    type Point = P;

    fn project<Proj>(&self, projection: &Proj) -> Option<Geom<Proj::OutPoint>>
    where
        Proj: Projection<InPoint = Self::Point> + ?Sized,
    {
        let parts = self
            .parts
            .iter()
            .map(|p| p.project_polygon(projection))
            .collect::<Option<Vec<_>>>()?;

        Some(Geom::MultiPolygon(parts.into()))
    }
}

impl<P: CartesianPoint2d<Num = f64>> MultiPoint<P> {
    /// Bounding rectangle of the points.
    pub fn bounding_rect(&self) -> Option<Rect> {
        Rect::from_points(self.points.iter())
    }
}

impl<P: CartesianPoint2d<Num = f64>> MultiContour<P> {
    /// Bounding rectangle of all contours.
    pub fn bounding_rect(&self) -> Option<Rect> {
        Rect::merge_all(self.contours.iter().filter_map(Contour::bounding_rect))
    }
}

impl<P: CartesianPoint2d<Num = f64>> MultiPolygon<P> {
    /// Bounding rectangle of all polygons.
    pub fn bounding_rect(&self) -> Option<Rect> {
        Rect::merge_all(self.parts.iter().filter_map(Polygon::bounding_rect))
    }

    /// Sum of the areas of all polygons.
    pub fn area(&self) -> f64 {
        self.parts.iter().map(Polygon::area).sum()
    }
}
