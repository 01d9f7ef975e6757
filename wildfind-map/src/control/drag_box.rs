use wildfind_types::cartesian::{Point2d, Rect};

use crate::layer::symbol::LineSymbol;
use crate::view::Viewport;

/// Rectangle drawn by the user with a shift-drag to select locations.
///
/// Exists only while the gesture is in progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionBox {
    start: Point2d,
    end: Point2d,
}

impl SelectionBox {
    /// Starts a box at the given screen position.
    pub fn new(start: Point2d) -> Self {
        Self { start, end: start }
    }

    /// Moves the free corner of the box.
    pub fn update(&mut self, end: Point2d) {
        self.end = end;
    }

    /// Screen position where the gesture started.
    pub fn start(&self) -> Point2d {
        self.start
    }

    /// Current position of the free corner.
    pub fn end(&self) -> Point2d {
        self.end
    }

    /// Box in screen pixels.
    pub fn screen_rect(&self) -> Rect {
        Rect::from_corners(&self.start, &self.end)
    }

    /// Outline style of the box.
    pub fn symbol(&self) -> &LineSymbol {
        &LineSymbol::DRAG_BOX
    }

    /// Extent covered by the box in the working projection of the given view.
    pub fn extent(&self, view: &Viewport) -> Rect {
        Rect::from_corners(&view.screen_to_map(self.start), &view.screen_to_map(self.end))
    }
}
