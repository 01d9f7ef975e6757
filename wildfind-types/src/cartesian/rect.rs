use nalgebra::{Point2, Scalar};
use num_traits::{FromPrimitive, Num};
use serde::{Deserialize, Serialize};

use super::point::CartesianPoint2d;

/// Axis aligned rectangle. Used as the extent of features, selection boxes and raster overlays.
///
/// Boundaries are inclusive: a point lying exactly on an edge is contained in the rectangle.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rect<N = f64> {
    /// Minimal X coordinate (west edge in projected CRS).
    pub x_min: N,
    /// Minimal Y coordinate (south edge in projected CRS).
    pub y_min: N,
    /// Maximal X coordinate (east edge in projected CRS).
    pub x_max: N,
    /// Maximal Y coordinate (north edge in projected CRS).
    pub y_max: N,
}

impl<N: Num + Copy + PartialOrd + Scalar + FromPrimitive> Rect<N> {
    /// Creates a new rectangle. The coordinates are not normalized, use [`Rect::from_corners`] if
    /// the order of the corners is not known.
    pub fn new(x_min: N, y_min: N, x_max: N, y_max: N) -> Self {
        Self {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    /// Creates a rectangle spanning two arbitrary opposite corners.
    pub fn from_corners(
        a: &impl CartesianPoint2d<Num = N>,
        b: &impl CartesianPoint2d<Num = N>,
    ) -> Self {
        let (x_min, x_max) = if a.x() <= b.x() {
            (a.x(), b.x())
        } else {
            (b.x(), a.x())
        };
        let (y_min, y_max) = if a.y() <= b.y() {
            (a.y(), b.y())
        } else {
            (b.y(), a.y())
        };

        Self::new(x_min, y_min, x_max, y_max)
    }

    /// Zero sized rectangle at the given point.
    pub fn from_point(p: &impl CartesianPoint2d<Num = N>) -> Self {
        Self {
            x_min: p.x(),
            x_max: p.x(),
            y_min: p.y(),
            y_max: p.y(),
        }
    }

    /// Smallest rectangle containing all the points. Returns `None` for an empty iterator.
    pub fn from_points<'a, P: CartesianPoint2d<Num = N> + 'a>(
        points: impl IntoIterator<Item = &'a P>,
    ) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let mut rect = Self::from_point(first);

        for p in points {
            rect = rect.merge(Self::from_point(p));
        }

        Some(rect)
    }

    /// Minimal X coordinate.
    pub fn x_min(&self) -> N {
        self.x_min
    }

    /// Maximal X coordinate.
    pub fn x_max(&self) -> N {
        self.x_max
    }

    /// Minimal Y coordinate.
    pub fn y_min(&self) -> N {
        self.y_min
    }

    /// Maximal Y coordinate.
    pub fn y_max(&self) -> N {
        self.y_max
    }

    /// Width of the rectangle.
    pub fn width(&self) -> N {
        self.x_max - self.x_min
    }

    /// Height of the rectangle.
    pub fn height(&self) -> N {
        self.y_max - self.y_min
    }

    /// Smallest rectangle containing both `self` and `other`.
    pub fn merge(&self, other: Self) -> Self {
        Self {
            x_min: if self.x_min < other.x_min {
                self.x_min
            } else {
                other.x_min
            },
            y_min: if self.y_min < other.y_min {
                self.y_min
            } else {
                other.y_min
            },
            x_max: if self.x_max > other.x_max {
                self.x_max
            } else {
                other.x_max
            },
            y_max: if self.y_max > other.y_max {
                self.y_max
            } else {
                other.y_max
            },
        }
    }

    /// Returns true if the point is inside the rectangle or on its boundary.
    pub fn contains(&self, point: &impl CartesianPoint2d<Num = N>) -> bool {
        self.x_min <= point.x()
            && self.x_max >= point.x()
            && self.y_min <= point.y()
            && self.y_max >= point.y()
    }

    /// Rectangle grown by `amount` in every direction.
    pub fn expand(&self, amount: N) -> Self {
        Self {
            x_min: self.x_min - amount,
            x_max: self.x_max + amount,
            y_min: self.y_min - amount,
            y_max: self.y_max + amount,
        }
    }

    /// Center point of the rectangle.
    pub fn center(&self) -> Point2<N> {
        let two = N::one() + N::one();
        Point2::new(
            (self.x_min + self.x_max) / two,
            (self.y_min + self.y_max) / two,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cartesian::Point2d;

    #[test]
    fn contains_includes_boundary() {
        let rect = Rect::new(0.0, 0.0, 10.0, 5.0);
        assert!(rect.contains(&Point2d::new(0.0, 0.0)));
        assert!(rect.contains(&Point2d::new(10.0, 5.0)));
        assert!(rect.contains(&Point2d::new(3.0, 2.0)));
        assert!(!rect.contains(&Point2d::new(10.1, 2.0)));
        assert!(!rect.contains(&Point2d::new(3.0, -0.1)));
    }

    #[test]
    fn from_corners_normalizes() {
        let rect = Rect::from_corners(&Point2d::new(5.0, -1.0), &Point2d::new(-2.0, 3.0));
        assert_eq!(rect, Rect::new(-2.0, -1.0, 5.0, 3.0));
    }

    #[test]
    fn from_points() {
        let points = [
            Point2d::new(1.0, 1.0),
            Point2d::new(-3.0, 4.0),
            Point2d::new(2.0, -5.0),
        ];
        assert_eq!(
            Rect::from_points(points.iter()),
            Some(Rect::new(-3.0, -5.0, 2.0, 4.0))
        );
        assert_eq!(Rect::<f64>::from_points(std::iter::empty::<&Point2d>()), None);
    }

    #[test]
    fn merge_and_center() {
        let a = Rect::new(0.0, 0.0, 1.0, 1.0);
        let b = Rect::new(2.0, -1.0, 3.0, 0.5);
        let merged = a.merge(b);
        assert_eq!(merged, Rect::new(0.0, -1.0, 3.0, 1.0));
        assert_eq!(merged.center(), Point2d::new(1.5, 0.0));
        assert_eq!(merged.width(), 3.0);
        assert_eq!(merged.height(), 2.0);
    }
}
