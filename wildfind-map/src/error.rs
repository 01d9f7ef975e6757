//! Error types used by the crate.

use thiserror::Error;
use wildfind_types::error::WildfindTypesError;

/// Map view error type.
#[derive(Debug, Error)]
pub enum MapError {
    /// An argument given by the host is out of the allowed range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// Item not found.
    #[error("item not found")]
    NotFound,
    /// [`MapView::initialize`](crate::MapView::initialize) was called more than once.
    #[error("map view is already initialized")]
    AlreadyInitialized,
    /// I/O error (network or file).
    #[error("failed to load data: {0}")]
    IO(String),
    /// Image decoding error.
    #[error("image decode error: {0:?}")]
    ImageDecode(#[from] image::ImageError),
    /// Configuration could not be read or is inconsistent.
    #[error("invalid configuration: {0}")]
    Config(String),
    /// Generic error - details are inside.
    #[error("{0}")]
    Generic(String),
}

impl From<WildfindTypesError> for MapError {
    fn from(value: WildfindTypesError) -> Self {
        Self::InvalidArgument(value.to_string())
    }
}

impl From<serde_json::Error> for MapError {
    fn from(value: serde_json::Error) -> Self {
        Self::Config(value.to_string())
    }
}

impl From<std::io::Error> for MapError {
    fn from(value: std::io::Error) -> Self {
        Self::IO(value.to_string())
    }
}

#[cfg(feature = "native-loader")]
impl From<reqwest::Error> for MapError {
    fn from(value: reqwest::Error) -> Self {
        Self::IO(value.to_string())
    }
}
