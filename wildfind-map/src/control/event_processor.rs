use wildfind_types::cartesian::{CartesianPoint2d, Point2d};

use super::{Modifiers, MouseEvent, PressedButtons, RawUserEvent, UserEvent};

const DRAG_THRESHOLD: f64 = 3.0;

/// Converts raw input into click and drag events.
#[derive(Debug, Default)]
pub struct EventProcessor {
    pointer_position: Point2d,
    pointer_pressed_position: Point2d,
    buttons: PressedButtons,
    modifiers: Modifiers,
    is_dragging: bool,
}

impl EventProcessor {
    /// Current pointer position in screen pixels.
    pub fn pointer_position(&self) -> Point2d {
        self.pointer_position
    }

    /// Current keyboard modifiers.
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Updates the input state and returns the resulting user events.
    pub fn process(&mut self, event: RawUserEvent) -> Vec<UserEvent> {
        match event {
            RawUserEvent::ButtonPressed(button) => {
                self.buttons.set(button, true);
                self.pointer_pressed_position = self.pointer_position;

                vec![UserEvent::ButtonPressed(button, self.mouse_event())]
            }
            RawUserEvent::ButtonReleased(button) => {
                self.buttons.set(button, false);
                let mut events = vec![UserEvent::ButtonReleased(button, self.mouse_event())];

                if self.is_dragging {
                    self.is_dragging = false;
                    events.push(UserEvent::DragEnded(button, self.mouse_event()));
                } else {
                    events.push(UserEvent::Click(button, self.mouse_event()));
                }

                events
            }
            RawUserEvent::PointerMoved(position) => {
                let prev_position = self.pointer_position;
                self.pointer_position = position;

                let mut events = vec![UserEvent::PointerMoved(self.mouse_event())];
                if let Some(button) = self.buttons.single() {
                    if !self.is_dragging
                        && position.taxicab_distance(&self.pointer_pressed_position)
                            > DRAG_THRESHOLD
                    {
                        self.is_dragging = true;
                        events.push(UserEvent::DragStarted(
                            button,
                            self.mouse_event_at(self.pointer_pressed_position),
                        ));
                        events.push(UserEvent::Drag(
                            button,
                            position - self.pointer_pressed_position,
                            self.mouse_event(),
                        ));
                    } else if self.is_dragging {
                        events.push(UserEvent::Drag(
                            button,
                            position - prev_position,
                            self.mouse_event(),
                        ));
                    }
                }

                events
            }
            RawUserEvent::Scroll(delta) => vec![UserEvent::Scroll(delta, self.mouse_event())],
            RawUserEvent::ModifiersChanged(modifiers) => {
                self.modifiers = modifiers;
                vec![]
            }
        }
    }

    fn mouse_event(&self) -> MouseEvent {
        self.mouse_event_at(self.pointer_position)
    }

    fn mouse_event_at(&self, screen_pointer_position: Point2d) -> MouseEvent {
        MouseEvent {
            screen_pointer_position,
            buttons: self.buttons,
            modifiers: self.modifiers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::MouseButton;
    use assert_matches::assert_matches;

    #[test]
    fn press_release_is_click() {
        let mut processor = EventProcessor::default();
        processor.process(RawUserEvent::PointerMoved(Point2d::new(10.0, 10.0)));
        processor.process(RawUserEvent::ButtonPressed(MouseButton::Left));
        processor.process(RawUserEvent::PointerMoved(Point2d::new(11.0, 11.0)));
        let events = processor.process(RawUserEvent::ButtonReleased(MouseButton::Left));

        assert_eq!(events.len(), 2);
        assert_matches!(events[1], UserEvent::Click(MouseButton::Left, _));
    }

    #[test]
    fn drag_sequence() {
        let mut processor = EventProcessor::default();
        processor.process(RawUserEvent::PointerMoved(Point2d::new(10.0, 10.0)));
        processor.process(RawUserEvent::ButtonPressed(MouseButton::Left));

        let events = processor.process(RawUserEvent::PointerMoved(Point2d::new(20.0, 10.0)));
        assert_eq!(events.len(), 3);
        assert_matches!(
            &events[1],
            UserEvent::DragStarted(MouseButton::Left, e) if e.screen_pointer_position == Point2d::new(10.0, 10.0)
        );
        assert_matches!(&events[2], UserEvent::Drag(_, delta, _) if delta.x == 10.0 && delta.y == 0.0);

        let events = processor.process(RawUserEvent::PointerMoved(Point2d::new(25.0, 12.0)));
        assert_matches!(&events[1], UserEvent::Drag(_, delta, _) if delta.x == 5.0 && delta.y == 2.0);

        let events = processor.process(RawUserEvent::ButtonReleased(MouseButton::Left));
        assert_matches!(events[1], UserEvent::DragEnded(MouseButton::Left, _));
    }

    #[test]
    fn modifiers_are_attached() {
        let mut processor = EventProcessor::default();
        processor.process(RawUserEvent::ModifiersChanged(Modifiers { shift: true }));
        let events = processor.process(RawUserEvent::ButtonPressed(MouseButton::Left));

        assert_matches!(&events[0], UserEvent::ButtonPressed(_, e) if e.modifiers.shift);
        assert!(processor.modifiers().shift);
    }

    #[test]
    fn moving_without_buttons_is_not_drag() {
        let mut processor = EventProcessor::default();
        let events = processor.process(RawUserEvent::PointerMoved(Point2d::new(100.0, 100.0)));
        assert_eq!(events.len(), 1);
        assert_eq!(processor.pointer_position(), Point2d::new(100.0, 100.0));
    }
}
