//! Conversion between GeoJSON geometries and [`Geom`].
//!
//! Coordinates are kept as they are: the first element of a position becomes `x`, the second one `y`. Extra
//! dimensions are dropped. Closed GeoJSON rings repeat their first position at the end, the repeated position is
//! removed when converting into [`ClosedContour`] and added back when converting into GeoJSON.

use geojson::{LineStringType, PolygonType, Position, Value};

use crate::cartesian::{CartesianPoint2d, Point2d};
use crate::contour::{ClosedContour, Contour};
use crate::error::CafemapTypesError;
use crate::geometry::Geom;
use crate::multi::{MultiContour, MultiPoint, MultiPolygon};
use crate::polygon::Polygon;

impl TryFrom<&geojson::Geometry> for Geom<Point2d> {
    type Error = CafemapTypesError;

    fn try_from(value: &geojson::Geometry) -> Result<Self, Self::Error> {
        Self::try_from(&value.value)
    }
}

impl TryFrom<&Value> for Geom<Point2d> {
    type Error = CafemapTypesError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        Ok(match value {
            Value::Point(p) => Geom::Point(convert_position(p)?),
            Value::MultiPoint(points) => {
                Geom::MultiPoint(MultiPoint::from(convert_positions(points)?))
            }
            Value::LineString(line) => Geom::Contour(convert_contour(line)?),
            Value::MultiLineString(lines) => Geom::MultiContour(MultiContour::from(
                lines
                    .iter()
                    .map(convert_contour)
                    .collect::<Result<Vec<_>, _>>()?,
            )),
            Value::Polygon(polygon) => Geom::Polygon(convert_polygon(polygon)?),
            Value::MultiPolygon(mp) => Geom::MultiPolygon(MultiPolygon::from(
                mp.iter()
                    .map(convert_polygon)
                    .collect::<Result<Vec<_>, _>>()?,
            )),
            Value::GeometryCollection(_) => {
                return Err(CafemapTypesError::Conversion(
                    "geometry collections are not supported".to_string(),
                ))
            }
        })
    }
}

impl<P: CartesianPoint2d<Num = f64>> From<&Geom<P>> for Value {
    fn from(geom: &Geom<P>) -> Self {
        match geom {
            Geom::Point(p) => Value::Point(position(p)),
            Geom::MultiPoint(points) => {
                Value::MultiPoint(points.points.iter().map(position).collect())
            }
            Geom::Contour(contour) => Value::LineString(line_string(contour)),
            Geom::MultiContour(contours) => {
                Value::MultiLineString(contours.contours.iter().map(line_string).collect())
            }
            Geom::Polygon(polygon) => Value::Polygon(polygon_rings(polygon)),
            Geom::MultiPolygon(mp) => {
                Value::MultiPolygon(mp.parts.iter().map(polygon_rings).collect())
            }
        }
    }
}

fn convert_position(position: &Position) -> Result<Point2d, CafemapTypesError> {
    match position.as_slice() {
        [x, y, ..] => Ok(Point2d::new(*x, *y)),
        _ => Err(CafemapTypesError::Conversion(
            "point must contain at least 2 dimensions".to_string(),
        )),
    }
}

fn convert_positions(positions: &[Position]) -> Result<Vec<Point2d>, CafemapTypesError> {
    positions.iter().map(convert_position).collect()
}

fn convert_contour(line_string: &LineStringType) -> Result<Contour<Point2d>, CafemapTypesError> {
    let is_closed = line_string.len() > 2 && line_string.first() == line_string.last();
    let mut points = convert_positions(line_string)?;
    if is_closed {
        points.pop();
    }

    Ok(Contour::new(points, is_closed))
}

fn convert_ring(ring: &LineStringType) -> Result<ClosedContour<Point2d>, CafemapTypesError> {
    let mut points = convert_positions(ring)?;
    if points.len() > 1 && points.first() == points.last() {
        points.pop();
    }

    Ok(ClosedContour::new(points))
}

fn convert_polygon(polygon: &PolygonType) -> Result<Polygon<Point2d>, CafemapTypesError> {
    let Some((outer, inner)) = polygon.split_first() else {
        return Err(CafemapTypesError::Conversion(
            "polygon must have an outer ring".to_string(),
        ));
    };

    Ok(Polygon::new(
        convert_ring(outer)?,
        inner.iter().map(convert_ring).collect::<Result<Vec<_>, _>>()?,
    ))
}

fn position(point: &impl CartesianPoint2d<Num = f64>) -> Position {
    vec![point.x(), point.y()]
}

fn line_string<P: CartesianPoint2d<Num = f64>>(contour: &Contour<P>) -> LineStringType {
    let mut positions: Vec<Position> = contour.points().iter().map(position).collect();
    if contour.is_closed() {
        if let Some(first) = positions.first().cloned() {
            positions.push(first);
        }
    }

    positions
}

fn ring<P: CartesianPoint2d<Num = f64>>(contour: &ClosedContour<P>) -> LineStringType {
    contour.iter_points_closing().map(position).collect()
}

fn polygon_rings<P: CartesianPoint2d<Num = f64>>(polygon: &Polygon<P>) -> PolygonType {
    polygon.iter_contours().map(ring).collect()
}
