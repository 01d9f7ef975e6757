use nalgebra::{Point2, Scalar, Vector2};
use num_traits::{Bounded, FromPrimitive, Num};

/// Point in projected coordinates with `f64` components.
pub type Point2d = Point2<f64>;

/// A point in 2d cartesian space.
pub trait CartesianPoint2d {
    /// Numeric type of the coordinates.
    type Num: Num + Copy + PartialOrd + Bounded + Scalar + FromPrimitive;

    /// X coordinate.
    fn x(&self) -> Self::Num;
    /// Y coordinate.
    fn y(&self) -> Self::Num;

    /// Vector from `other` to `self`.
    fn sub(&self, other: &impl CartesianPoint2d<Num = Self::Num>) -> Vector2<Self::Num> {
        Vector2::new(self.x() - other.x(), self.y() - other.y())
    }

    /// Squared euclidean distance.
    fn distance_sq(&self, other: &impl CartesianPoint2d<Num = Self::Num>) -> Self::Num {
        let v = self.sub(other);
        v.x * v.x + v.y * v.y
    }

    /// Sum of absolute coordinate differences. Used as a cheap distance for gesture thresholds.
    fn taxicab_distance(&self, other: &impl CartesianPoint2d<Num = Self::Num>) -> Self::Num {
        let dx = if self.x() >= other.x() {
            self.x() - other.x()
        } else {
            other.x() - self.x()
        };
        let dy = if self.y() >= other.y() {
            self.y() - other.y()
        } else {
            other.y() - self.y()
        };

        dx + dy
    }
}

/// A cartesian point type that can be constructed from its coordinates.
pub trait NewCartesianPoint2d<N = f64>: CartesianPoint2d<Num = N> {
    /// Creates a new point.
    fn new(x: N, y: N) -> Self;
}

impl<N: Num + Copy + PartialOrd + Bounded + Scalar + FromPrimitive> CartesianPoint2d for Point2<N> {
    type Num = N;

    fn x(&self) -> N {
        self.x
    }

    fn y(&self) -> N {
        self.y
    }
}

impl<N: Num + Copy + PartialOrd + Bounded + Scalar + FromPrimitive> NewCartesianPoint2d<N>
    for Point2<N>
{
    fn new(x: N, y: N) -> Self {
        Point2::new(x, y)
    }
}
