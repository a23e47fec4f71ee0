//! Divider position and drag gesture state.

use crate::slider::position::{Bounds, clamp_percent};
use log::debug;

/// A single active contact point, in window coordinates (logical px).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub id: u64,
    pub x: f64,
    pub y: f64,
}

/// What started the current drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragSource {
    Pointer,
    /// Index into the active touch list, fixed when the touch started.
    Touch { index: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Gesture {
    #[default]
    Idle,
    Dragging(DragSource),
}

/// Input that drives the gesture state machine.
#[derive(Debug, Clone, Copy)]
pub enum GestureEvent<'a> {
    /// Pointer pressed over the overlay.
    PointerDown { x: f64 },
    PointerMove { x: f64 },
    PointerUp,
    /// Touch started over the overlay; `touches` is the full active list.
    TouchStart { touches: &'a [TouchPoint] },
    TouchMove { touches: &'a [TouchPoint] },
    TouchEnd,
}

/// Per-instance widget state.
#[derive(Debug, Clone, PartialEq)]
pub struct SliderState {
    position: f64,
    gesture: Gesture,
}

impl SliderState {
    pub fn new(position: f64) -> Self {
        Self {
            position: clamp_percent(position),
            gesture: Gesture::Idle,
        }
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn dragging(&self) -> bool {
        matches!(self.gesture, Gesture::Dragging(_))
    }

    /// Touch index followed by the current drag, if it is a touch drag.
    pub fn active_touch_index(&self) -> Option<usize> {
        match self.gesture {
            Gesture::Dragging(DragSource::Touch { index }) => Some(index),
            _ => None,
        }
    }

    /// Moves the divider to an externally supplied position.
    pub fn set_position(&mut self, position: f64) -> bool {
        let position = clamp_percent(position);
        let changed = position != self.position;
        self.position = position;
        changed
    }

    /// Feeds one event through the state machine.
    ///
    /// `bounds` is only called when a position has to be computed. Returns
    /// true if the position or the drag state changed.
    pub fn apply(&mut self, event: GestureEvent<'_>, bounds: impl Fn() -> Bounds) -> bool {
        let before = (self.position, self.gesture);

        match event {
            GestureEvent::PointerDown { x } => {
                self.gesture = Gesture::Dragging(DragSource::Pointer);
                self.track(x, bounds());
            }
            GestureEvent::PointerMove { x } => {
                if self.gesture == Gesture::Dragging(DragSource::Pointer) {
                    self.track(x, bounds());
                }
            }
            GestureEvent::TouchStart { touches } => {
                // Most recent contact wins on multi-touch devices.
                if let Some(index) = touches.len().checked_sub(1) {
                    self.gesture = Gesture::Dragging(DragSource::Touch { index });
                    self.track(touches[index].x, bounds());
                }
            }
            GestureEvent::TouchMove { touches } => {
                if let Some(index) = self.active_touch_index() {
                    match touches.get(index) {
                        Some(touch) => self.track(touch.x, bounds()),
                        None => debug!("Tracked touch index {} no longer active", index),
                    }
                }
            }
            GestureEvent::PointerUp | GestureEvent::TouchEnd => {
                self.gesture = Gesture::Idle;
            }
        }

        (self.position, self.gesture) != before
    }

    fn track(&mut self, x: f64, bounds: Bounds) {
        if let Some(position) = bounds.percent_at(x) {
            self.position = position;
        }
    }
}

impl Default for SliderState {
    fn default() -> Self {
        Self::new(crate::slider::position::DEFAULT_PERCENT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> Bounds {
        Bounds::new(0.0, 0.0, 200.0, 100.0)
    }

    fn touch(id: u64, x: f64) -> TouchPoint {
        TouchPoint { id, x, y: 10.0 }
    }

    #[test]
    fn starts_idle_at_default_position() {
        let state = SliderState::default();
        assert_eq!(state.position(), 50.0);
        assert!(!state.dragging());
        assert_eq!(state.active_touch_index(), None);
    }

    #[test]
    fn initial_position_is_clamped() {
        assert_eq!(SliderState::new(150.0).position(), 100.0);
        assert_eq!(SliderState::new(-5.0).position(), 0.0);
        assert_eq!(SliderState::new(f64::NAN).position(), 50.0);
    }

    #[test]
    fn pointer_down_starts_drag_and_positions() {
        let mut state = SliderState::default();
        assert!(state.apply(GestureEvent::PointerDown { x: 50.0 }, bounds));
        assert!(state.dragging());
        assert_eq!(state.position(), 25.0);
    }

    #[test]
    fn drag_then_release_keeps_last_position() {
        let mut state = SliderState::default();
        state.apply(GestureEvent::PointerDown { x: 20.0 }, bounds);
        state.apply(GestureEvent::PointerMove { x: 150.0 }, bounds);
        state.apply(GestureEvent::PointerMove { x: 500.0 }, bounds);
        assert_eq!(state.position(), 100.0);

        assert!(state.apply(GestureEvent::PointerUp, bounds));
        assert!(!state.dragging());
        assert_eq!(state.position(), 100.0);

        assert!(!state.apply(GestureEvent::PointerMove { x: 10.0 }, bounds));
        assert_eq!(state.position(), 100.0);
    }

    #[test]
    fn moves_while_idle_are_ignored() {
        let mut state = SliderState::default();
        assert!(!state.apply(GestureEvent::PointerMove { x: 10.0 }, bounds));
        assert!(!state.apply(GestureEvent::TouchMove { touches: &[touch(1, 10.0)] }, bounds));
        assert_eq!(state.position(), 50.0);
    }

    #[test]
    fn bounds_are_not_queried_when_idle() {
        let mut state = SliderState::default();
        state.apply(GestureEvent::PointerMove { x: 10.0 }, || {
            panic!("bounds queried while idle")
        });
    }

    #[test]
    fn touch_start_selects_last_touch() {
        let mut state = SliderState::default();
        let touches = [touch(7, 180.0), touch(9, 40.0)];
        state.apply(GestureEvent::TouchStart { touches: &touches }, bounds);
        assert_eq!(state.active_touch_index(), Some(1));
        assert_eq!(state.position(), 20.0);
    }

    #[test]
    fn touch_move_follows_tracked_finger_only() {
        let mut state = SliderState::default();
        let touches = [touch(7, 180.0), touch(9, 40.0)];
        state.apply(GestureEvent::TouchStart { touches: &touches }, bounds);

        // the other finger moves; tracked finger stays put
        let moved_other = [touch(7, 10.0), touch(9, 40.0)];
        assert!(!state.apply(GestureEvent::TouchMove { touches: &moved_other }, bounds));
        assert_eq!(state.position(), 20.0);

        let moved_tracked = [touch(7, 10.0), touch(9, 100.0)];
        assert!(state.apply(GestureEvent::TouchMove { touches: &moved_tracked }, bounds));
        assert_eq!(state.position(), 50.0);
    }

    #[test]
    fn touch_move_with_missing_index_is_ignored() {
        let mut state = SliderState::default();
        let touches = [touch(1, 100.0), touch(2, 60.0)];
        state.apply(GestureEvent::TouchStart { touches: &touches }, bounds);
        assert!(!state.apply(GestureEvent::TouchMove { touches: &[touch(1, 0.0)] }, bounds));
        assert_eq!(state.position(), 30.0);
    }

    #[test]
    fn touch_end_returns_to_idle() {
        let mut state = SliderState::default();
        state.apply(GestureEvent::TouchStart { touches: &[touch(1, 150.0)] }, bounds);
        assert!(state.apply(GestureEvent::TouchEnd, bounds));
        assert!(!state.dragging());
        assert_eq!(state.active_touch_index(), None);
        assert_eq!(state.position(), 75.0);
    }

    #[test]
    fn pointer_moves_do_not_drive_touch_drag() {
        let mut state = SliderState::default();
        state.apply(GestureEvent::TouchStart { touches: &[touch(1, 150.0)] }, bounds);
        assert!(!state.apply(GestureEvent::PointerMove { x: 0.0 }, bounds));
        assert_eq!(state.position(), 75.0);
    }

    #[test]
    fn empty_touch_start_is_ignored() {
        let mut state = SliderState::default();
        assert!(!state.apply(GestureEvent::TouchStart { touches: &[] }, bounds));
        assert!(!state.dragging());
    }

    #[test]
    fn zero_width_bounds_keep_position() {
        let mut state = SliderState::new(30.0);
        state.apply(GestureEvent::PointerDown { x: 10.0 }, || {
            Bounds::new(0.0, 0.0, 0.0, 0.0)
        });
        assert!(state.dragging());
        assert_eq!(state.position(), 30.0);
    }

    #[test]
    fn set_position_clamps_and_reports_change() {
        let mut state = SliderState::default();
        assert!(state.set_position(120.0));
        assert_eq!(state.position(), 100.0);
        assert!(!state.set_position(100.0));
    }
}
