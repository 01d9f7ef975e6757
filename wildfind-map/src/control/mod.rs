//! User interaction handling.
//!
//! Raw input from the embedding window is given to the map view as [`RawUserEvent`]s. The
//! [`EventProcessor`] keeps track of pressed buttons, modifiers and the pointer position and
//! converts raw events into [`UserEvent`]s (clicks and drags), which the map view then turns into
//! panning, zooming, popups and drag-box selections.

use wildfind_types::cartesian::{Point2d, Vector2};

mod drag_box;
mod event_processor;

pub use drag_box::SelectionBox;
pub use event_processor::EventProcessor;

/// Input event as delivered by the window system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawUserEvent {
    /// Button went down.
    ButtonPressed(MouseButton),
    /// Button went up.
    ButtonReleased(MouseButton),
    /// Pointer is now at the given screen pixel position.
    PointerMoved(Point2d),
    /// Wheel or touch pad scroll, in lines. Positive values zoom in.
    Scroll(f64),
    /// Shift (or another tracked modifier) went down or up.
    ModifiersChanged(Modifiers),
}

/// Gesture recognized by the [`EventProcessor`], with the input state at the moment it happened.
#[derive(Debug, Clone, PartialEq)]
pub enum UserEvent {
    /// Button went down.
    ButtonPressed(MouseButton, MouseEvent),
    /// Button went up.
    ButtonReleased(MouseButton, MouseEvent),
    /// Button went down and up without the pointer leaving the drag threshold.
    Click(MouseButton, MouseEvent),
    /// Pointer moved.
    PointerMoved(MouseEvent),
    /// Pointer left the drag threshold with one button down. Carries the position where the
    /// button went down.
    DragStarted(MouseButton, MouseEvent),
    /// Pointer moved during a drag by the given number of screen pixels.
    Drag(MouseButton, Vector2<f64>, MouseEvent),
    /// Button went up, ending a drag.
    DragEnded(MouseButton, MouseEvent),
    /// Scroll by the given number of lines.
    Scroll(f64, MouseEvent),
}

/// Pointer button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    /// Primary button.
    Left,
    /// Wheel button.
    Middle,
    /// Secondary button.
    Right,
    /// Anything else. Never starts a drag.
    Other,
}

/// Keyboard modifiers relevant to the map.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Shift is held. Turns a left drag into a box selection.
    pub shift: bool,
}

/// Input state attached to every [`UserEvent`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseEvent {
    /// Pointer position in pixels from the top-left corner of the map.
    pub screen_pointer_position: Point2d,
    /// Buttons held down.
    pub buttons: PressedButtons,
    /// Modifiers held down.
    pub modifiers: Modifiers,
}

/// Set of buttons currently held down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PressedButtons {
    /// Primary button.
    pub left: bool,
    /// Wheel button.
    pub middle: bool,
    /// Secondary button.
    pub right: bool,
}

impl PressedButtons {
    pub(crate) fn set(&mut self, button: MouseButton, pressed: bool) {
        match button {
            MouseButton::Left => self.left = pressed,
            MouseButton::Middle => self.middle = pressed,
            MouseButton::Right => self.right = pressed,
            MouseButton::Other => {}
        }
    }

    /// The button held down, if exactly one is.
    pub fn single(&self) -> Option<MouseButton> {
        match (self.left, self.middle, self.right) {
            (true, false, false) => Some(MouseButton::Left),
            (false, true, false) => Some(MouseButton::Middle),
            (false, false, true) => Some(MouseButton::Right),
            _ => None,
        }
    }
}
