use nalgebra::Scalar;
use num_traits::Float;
use serde::{Deserialize, Serialize};

use crate::cartesian::{CartesianPoint2d, NewCartesianPoint2d};

/// Axis-aligned rectangle, used as a bounding envelope of geometries.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rect<N = f64> {
    /// Minimum x coordinate.
    pub x_min: N,
    /// Minimum y coordinate.
    pub y_min: N,
    /// Maximum x coordinate.
    pub x_max: N,
    /// Maximum y coordinate.
    pub y_max: N,
}

impl<N: Float + Scalar> Rect<N> {
    /// Creates a new rectangle.
    pub fn new(x_min: N, y_min: N, x_max: N, y_max: N) -> Self {
        Self {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    /// Returns the smallest rectangle containing both `self` and `other`.
    pub fn merge(&self, other: Self) -> Self {
        Self {
            x_min: self.x_min.min(other.x_min),
            y_min: self.y_min.min(other.y_min),
            x_max: self.x_max.max(other.x_max),
            y_max: self.y_max.max(other.y_max),
        }
    }

    /// Merges all the rectangles of the iterator. Returns `None` if the iterator is empty.
    pub fn merge_all(rects: impl IntoIterator<Item = Self>) -> Option<Self> {
        rects.into_iter().reduce(|acc, rect| acc.merge(rect))
    }

    /// Rectangle of zero size at the given point.
    pub fn from_point(p: &impl CartesianPoint2d<Num = N>) -> Self {
        Self {
            x_min: p.x(),
            x_max: p.x(),
            y_min: p.y(),
            y_max: p.y(),
        }
    }

    /// Bounding rectangle of the given points. Returns `None` if there are no points.
    pub fn from_points<'a, P: CartesianPoint2d<Num = N> + 'a>(
        points: impl IntoIterator<Item = &'a P>,
    ) -> Option<Self> {
        let mut points = points.into_iter();
        let first = Self::from_point(points.next()?);

        Some(points.fold(first, |rect, p| Self {
            x_min: rect.x_min.min(p.x()),
            y_min: rect.y_min.min(p.y()),
            x_max: rect.x_max.max(p.x()),
            y_max: rect.y_max.max(p.y()),
        }))
    }

    /// Midpoint of the rectangle on each axis.
    pub fn center<P: NewCartesianPoint2d<N>>(&self) -> P {
        let two = N::one() + N::one();
        P::new(
            (self.x_min + self.x_max) / two,
            (self.y_min + self.y_max) / two,
        )
    }
}
