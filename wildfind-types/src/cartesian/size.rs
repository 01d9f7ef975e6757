use serde::{Deserialize, Serialize};

/// Width and height of a screen area in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    width: f64,
    height: f64,
}

impl Size {
    /// Creates a new size.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Horizontal extent.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Vertical extent.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Distance from the left edge to the center.
    pub fn half_width(&self) -> f64 {
        self.width / 2.0
    }

    /// Distance from the top edge to the center.
    pub fn half_height(&self) -> f64 {
        self.height / 2.0
    }

    /// An area with no pixels cannot show anything.
    pub fn is_zero(&self) -> bool {
        self.width == 0.0 || self.height == 0.0
    }
}
