/// Conversion between two coordinate systems.
pub trait Projection {
    /// Type of the input point.
    type InPoint;
    /// Type of the output point.
    type OutPoint;

    /// Projects a point. Returns `None` if the point cannot be represented in the output system.
    fn project(&self, input: &Self::InPoint) -> Option<Self::OutPoint>;
    /// Inverse of [`Projection::project`].
    fn unproject(&self, input: &Self::OutPoint) -> Option<Self::InPoint>;
}
