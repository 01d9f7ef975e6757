//! Visual styles of the overlay features.

use crate::color::Color;

/// Z-index of a selected location, so it is drawn above the unselected ones.
pub const SELECTED_Z_INDEX: i32 = 99;

/// Style of a point feature drawn as a regular shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointSymbol {
    /// Fill color of the shape.
    pub fill: Color,
    /// Outline color.
    pub stroke: Color,
    /// Outline width in pixels.
    pub stroke_width: f64,
    /// Radius of the shape in pixels.
    pub radius: f64,
    /// Number of vertices. `None` for a circle.
    pub points: Option<u32>,
    /// Drawing order among the features of the same layer.
    pub z_index: i32,
}

impl PointSymbol {
    /// Style of an unselected signal location.
    pub const LOCATION: PointSymbol = PointSymbol {
        fill: Color::from_hex("#FF6000"),
        stroke: Color::BLACK.with_alpha(51),
        stroke_width: 0.5,
        radius: 5.0,
        points: None,
        z_index: 0,
    };

    /// Style of a selected signal location.
    pub const LOCATION_SELECTED: PointSymbol = PointSymbol {
        fill: Color::from_hex("#FFA066"),
        stroke: Color::BLACK.with_alpha(51),
        stroke_width: 2.0,
        radius: 5.0,
        points: None,
        z_index: SELECTED_Z_INDEX,
    };

    /// Style of the tracker marker: a white triangle.
    pub const TRACKER: PointSymbol = PointSymbol {
        fill: Color::WHITE,
        stroke: Color::BLACK.with_alpha(51),
        stroke_width: 2.0,
        radius: 8.0,
        points: Some(3),
        z_index: 0,
    };

    /// Style of a location with the given selection state.
    pub fn location(selected: bool) -> Self {
        if selected {
            Self::LOCATION_SELECTED
        } else {
            Self::LOCATION
        }
    }
}

/// Style of a line feature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSymbol {
    /// Line color.
    pub color: Color,
    /// Line width in pixels.
    pub width: f64,
}

impl LineSymbol {
    /// Style of the travelled track.
    pub const TRACK: LineSymbol = LineSymbol {
        color: Color::from_hex("#DD6300"),
        width: 3.0,
    };

    /// Outline of the drag box while the user is selecting.
    pub const DRAG_BOX: LineSymbol = LineSymbol {
        color: Color::from_hex("#003D99"),
        width: 1.0,
    };
}
