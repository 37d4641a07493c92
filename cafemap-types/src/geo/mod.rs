//! Geometries in geographic coordinates (latitude and longitude) (see [`GeoPoint`]) and conversion between different
//! coordinate reference systems (see [`Crs`] and [`Projection`]).

mod crs;
mod datum;
mod point;
pub mod projection;

pub use crs::Crs;
pub use datum::Datum;
pub use point::{GeoPoint, GeoPoint2d, NewGeoPoint};
pub use projection::Projection;
