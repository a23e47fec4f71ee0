//! Event handlers for window input and UI callbacks.
//!
//! Pointer and touch input is taken from the winit window event hook rather
//! than from a Slint TouchArea, so drags keep tracking after the pointer
//! leaves the slider and every touch contact is visible.

use crate::config::SliderConfig;
use crate::runtime::{InputTracker, RawInput, SliderHandle, TouchPhase, WindowListeners};
use crate::ui::surface::SlintSurface;
use i_slint_backend_winit::WinitWindowAccessor;
use i_slint_backend_winit::winit::event::{
    ElementState, MouseButton, TouchPhase as WinitTouchPhase, WindowEvent,
};
use i_slint_backend_winit::EventResult;
use log::{debug, warn};
use slint::ComponentHandle;
use std::cell::RefCell;
use std::rc::Weak;
use std::sync::mpsc::Receiver;

/// Converts a winit event into backend-neutral input in logical pixels.
fn raw_input(event: &WindowEvent, scale_factor: f64) -> Option<RawInput> {
    match event {
        WindowEvent::CursorMoved { position, .. } => Some(RawInput::CursorMoved {
            x: position.x / scale_factor,
            y: position.y / scale_factor,
        }),
        WindowEvent::MouseInput {
            state,
            button: MouseButton::Left,
            ..
        } => Some(match state {
            ElementState::Pressed => RawInput::LeftPressed,
            ElementState::Released => RawInput::LeftReleased,
        }),
        WindowEvent::Touch(touch) => Some(RawInput::Touch {
            id: touch.id,
            phase: match touch.phase {
                WinitTouchPhase::Started => TouchPhase::Started,
                WinitTouchPhase::Moved => TouchPhase::Moved,
                WinitTouchPhase::Ended => TouchPhase::Ended,
                WinitTouchPhase::Cancelled => TouchPhase::Cancelled,
            },
            x: touch.location.x / scale_factor,
            y: touch.location.y / scale_factor,
        }),
        _ => None,
    }
}

/// Forwards the window's pointer and touch events to the listener registry.
///
/// Events are always propagated, Slint still sees them.
pub fn setup_window_listeners(ui: &crate::AppWindow, listeners: WindowListeners) {
    let tracker = RefCell::new(InputTracker::new());

    ui.window().on_winit_window_event(move |window, event| {
        let scale_factor = window.scale_factor() as f64;
        if let Some(raw) = raw_input(event, scale_factor) {
            let input = tracker.borrow_mut().translate(raw);
            if let Some(input) = input {
                listeners.dispatch(&input);
            }
        }
        EventResult::Propagate
    });
}

/// Applies configs delivered by the reload watcher.
///
/// The watcher thread sends new configs through `receiver` and then invokes
/// the `config-reloaded` callback; only the newest pending config is applied.
pub fn setup_config_reload_handler(
    ui: &crate::AppWindow,
    slider: Weak<SliderHandle<SlintSurface>>,
    receiver: Receiver<SliderConfig>,
) {
    ui.on_config_reloaded(move || {
        let Some(config) = receiver.try_iter().last() else {
            return;
        };
        match slider.upgrade() {
            Some(slider) => {
                debug!("Applying reloaded configuration");
                slider.update_config(config);
            }
            None => warn!("Configuration reloaded after the slider was destroyed"),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use i_slint_backend_winit::winit::dpi::PhysicalPosition;
    use i_slint_backend_winit::winit::event::{DeviceId, Touch};

    fn device() -> DeviceId {
        // SAFETY: the id is only compared, never handed to the platform
        unsafe { DeviceId::dummy() }
    }

    #[test]
    fn cursor_positions_are_converted_to_logical_px() {
        let event = WindowEvent::CursorMoved {
            device_id: device(),
            position: PhysicalPosition::new(300.0, 150.0),
        };
        assert_eq!(
            raw_input(&event, 2.0),
            Some(RawInput::CursorMoved { x: 150.0, y: 75.0 })
        );
    }

    #[test]
    fn only_the_left_button_is_forwarded() {
        let press = |button| WindowEvent::MouseInput {
            device_id: device(),
            state: ElementState::Pressed,
            button,
        };
        assert_eq!(raw_input(&press(MouseButton::Left), 1.0), Some(RawInput::LeftPressed));
        assert_eq!(raw_input(&press(MouseButton::Right), 1.0), None);
        assert_eq!(raw_input(&press(MouseButton::Middle), 1.0), None);

        let release = WindowEvent::MouseInput {
            device_id: device(),
            state: ElementState::Released,
            button: MouseButton::Left,
        };
        assert_eq!(raw_input(&release, 1.0), Some(RawInput::LeftReleased));
    }

    #[test]
    fn touches_keep_id_and_phase() {
        let event = WindowEvent::Touch(Touch {
            device_id: device(),
            phase: WinitTouchPhase::Moved,
            location: PhysicalPosition::new(90.0, 45.0),
            force: None,
            id: 7,
        });
        assert_eq!(
            raw_input(&event, 1.5),
            Some(RawInput::Touch {
                id: 7,
                phase: TouchPhase::Moved,
                x: 60.0,
                y: 30.0,
            })
        );
    }

    #[test]
    fn unrelated_events_are_ignored() {
        assert_eq!(raw_input(&WindowEvent::Focused(true), 1.0), None);
    }
}
