//! Window-level input listeners.
//!
//! Drags must keep tracking after the pointer leaves the widget, so widgets
//! subscribe to input for the whole window while they are mounted. The
//! returned [`Subscription`] unregisters the listener when dropped.

use crate::slider::TouchPoint;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Raw input as delivered by the windowing backend, in logical px.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawInput {
    CursorMoved { x: f64, y: f64 },
    LeftPressed,
    LeftReleased,
    Touch {
        id: u64,
        phase: TouchPhase,
        x: f64,
        y: f64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Started,
    Moved,
    Ended,
    Cancelled,
}

/// Input broadcast to every subscribed widget.
#[derive(Debug, Clone, PartialEq)]
pub enum WindowInput {
    PointerMoved { x: f64, y: f64 },
    PointerPressed { x: f64, y: f64 },
    PointerReleased,
    /// `touches` is the active list in contact order, including the new touch.
    TouchStarted { id: u64, touches: Vec<TouchPoint> },
    TouchMoved { id: u64, touches: Vec<TouchPoint> },
    /// `touches` is the list that remains after the touch lifted.
    TouchEnded { id: u64, touches: Vec<TouchPoint> },
}

type Listener = Rc<dyn Fn(&WindowInput)>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
}

/// Broadcasts window input to subscribed widgets.
#[derive(Clone, Default)]
pub struct WindowListeners {
    registry: Rc<RefCell<Registry>>,
}

impl WindowListeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, listener: impl Fn(&WindowInput) + 'static) -> Subscription {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.listeners.push((id, Rc::new(listener)));
        Subscription {
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Delivers one input to every current listener.
    ///
    /// Listeners may subscribe or unsubscribe while being called; changes
    /// take effect from the next dispatch.
    pub fn dispatch(&self, input: &WindowInput) {
        let listeners: Vec<Listener> = self
            .registry
            .borrow()
            .listeners
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in listeners {
            listener(input);
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.registry.borrow().listeners.len()
    }
}

/// Keeps a listener registered; dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes the listener"]
pub struct Subscription {
    id: u64,
    registry: Weak<RefCell<Registry>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry
                .borrow_mut()
                .listeners
                .retain(|(id, _)| *id != self.id);
        }
    }
}

/// Turns raw backend input into [`WindowInput`].
///
/// Remembers the cursor position, since button events carry none, and the
/// ordered list of active touches.
#[derive(Debug, Default)]
pub struct InputTracker {
    cursor: Option<(f64, f64)>,
    touches: Vec<TouchPoint>,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn touches(&self) -> &[TouchPoint] {
        &self.touches
    }

    pub fn translate(&mut self, input: RawInput) -> Option<WindowInput> {
        match input {
            RawInput::CursorMoved { x, y } => {
                self.cursor = Some((x, y));
                Some(WindowInput::PointerMoved { x, y })
            }
            RawInput::LeftPressed => {
                let (x, y) = self.cursor?;
                Some(WindowInput::PointerPressed { x, y })
            }
            RawInput::LeftReleased => Some(WindowInput::PointerReleased),
            RawInput::Touch { id, phase, x, y } => self.touch(id, phase, x, y),
        }
    }

    fn touch(&mut self, id: u64, phase: TouchPhase, x: f64, y: f64) -> Option<WindowInput> {
        let point = TouchPoint { id, x, y };
        match phase {
            TouchPhase::Started => {
                self.touches.retain(|t| t.id != id);
                self.touches.push(point);
                Some(WindowInput::TouchStarted {
                    id,
                    touches: self.touches.clone(),
                })
            }
            TouchPhase::Moved => {
                let touch = self.touches.iter_mut().find(|t| t.id == id)?;
                *touch = point;
                Some(WindowInput::TouchMoved {
                    id,
                    touches: self.touches.clone(),
                })
            }
            TouchPhase::Ended | TouchPhase::Cancelled => {
                self.touches.retain(|t| t.id != id);
                Some(WindowInput::TouchEnded {
                    id,
                    touches: self.touches.clone(),
                })
            }
        }
    }
}
