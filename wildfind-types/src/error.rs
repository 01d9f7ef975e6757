//! Error type used by the crate.

use thiserror::Error;

/// Error enum.
#[derive(Debug, Error, PartialEq)]
pub enum WildfindTypesError {
    /// Coordinates cannot be represented in the target coordinate system.
    #[error("cannot project coordinate ({x}, {y}) into {target}")]
    Projection {
        /// First coordinate of the input point.
        x: f64,
        /// Second coordinate of the input point.
        y: f64,
        /// Name of the target CRS.
        target: String,
    },
}
