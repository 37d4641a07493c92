//! Geometry types for the cafemap dashboard.
//!
//! Geometries are generic over the point type. Geographic points ([`GeoPoint2d`](geo::GeoPoint2d))
//! and cartesian points ([`Point2d`](cartesian::Point2d)) are converted into each other with
//! [projections](geo::Projection), which are obtained from a [coordinate reference system](geo::Crs).
//!
//! Planar measurements (bounding rectangles, areas) are only defined for geometries with cartesian
//! points, so to measure a geometry in geographic coordinates it must first be projected into a
//! suitable CRS:
//!
//! ```
//! use cafemap_types::cartesian::Point2d;
//! use cafemap_types::geo::Crs;
//! use cafemap_types::{ClosedContour, Geom, Geometry, Polygon};
//!
//! let square: Geom<Point2d> = Polygon::from(ClosedContour::new(vec![
//!     Point2d::new(-84.0, 10.0),
//!     Point2d::new(-83.99, 10.0),
//!     Point2d::new(-83.99, 10.01),
//!     Point2d::new(-84.0, 10.01),
//! ]))
//! .into();
//!
//! let transformation = Crs::WGS84.transformation_to(&Crs::EPSG5367)?;
//! let projected = square.project(&*transformation).expect("projectable");
//! assert!(projected.area() > 1_000_000.0);
//! # Ok::<(), cafemap_types::error::CafemapTypesError>(())
//! ```

pub mod cartesian;
mod contour;
pub mod error;
pub mod geo;
mod geometry;
#[cfg(feature = "geojson")]
pub mod geojson;
mod multi;
mod polygon;

pub use contour::{ClosedContour, Contour};
pub use geometry::{Geom, Geometry};
pub use multi::{MultiContour, MultiPoint, MultiPolygon};
pub use polygon::Polygon;
