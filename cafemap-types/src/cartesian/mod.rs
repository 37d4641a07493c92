//! Geometries and measurements in 2d cartesian coordinates.

mod point;
mod rect;

pub use point::{CartesianPoint2d, NewCartesianPoint2d, Point2d};
pub use rect::Rect;
