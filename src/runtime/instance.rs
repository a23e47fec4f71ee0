//! Mounted slider instances.
//!
//! An instance owns its [`SliderState`], listens to window input while
//! mounted and renders into a [`SliderSurface`]. State changes only mark the
//! instance dirty; the actual render runs from the [`Scheduler`], so several
//! changes inside one event coalesce into a single update. Each render pushes
//! only the parts whose derived values differ from what the surface shows.

use crate::config::SliderConfig;
use crate::runtime::listeners::{Subscription, WindowInput, WindowListeners};
use crate::runtime::scheduler::Scheduler;
use crate::slider::{
    Bounds, Decoration, Geometry, GestureEvent, HandleType, SliderState, Style,
};
use log::{debug, info};
use std::cell::RefCell;
use std::rc::Rc;

/// The view a slider renders into.
pub trait SliderSurface {
    /// Current rectangle of the interactive overlay, in window coordinates.
    fn bounds(&self) -> Bounds;
    fn set_geometry(&self, geometry: &Geometry);
    fn set_decoration(&self, decoration: Option<Decoration>);
    fn set_captions(&self, before: Option<&str>, after: Option<&str>);
    fn set_sources(&self, before: &str, after: &str);
    fn set_dragging(&self, dragging: bool);
    /// Clears the view when the instance is destroyed.
    fn unmount(&self) {}
}

/// What the surface currently shows.
#[derive(Default)]
struct Rendered {
    geometry: Option<Geometry>,
    handle: Option<HandleType>,
    captions: Option<(String, String)>,
    sources: Option<(String, String)>,
    dragging: Option<bool>,
}

struct Instance<S> {
    state: SliderState,
    config: SliderConfig,
    style: Style,
    surface: S,
    rendered: Rendered,
    scheduled: bool,
}

impl<S: SliderSurface> Instance<S> {
    fn new(surface: S, config: SliderConfig) -> Self {
        Self {
            state: SliderState::new(config.initial_position()),
            style: config.style(),
            config,
            surface,
            rendered: Rendered::default(),
            scheduled: false,
        }
    }

    fn on_input(&mut self, input: &WindowInput) -> bool {
        let surface = &self.surface;
        let event = match input {
            WindowInput::PointerPressed { x, y } => {
                if !surface.bounds().contains(*x, *y) {
                    return false;
                }
                GestureEvent::PointerDown { x: *x }
            }
            WindowInput::PointerMoved { x, .. } => GestureEvent::PointerMove { x: *x },
            WindowInput::PointerReleased => GestureEvent::PointerUp,
            WindowInput::TouchStarted { id, touches } => {
                let Some(touch) = touches.iter().find(|t| t.id == *id) else {
                    return false;
                };
                if !surface.bounds().contains(touch.x, touch.y) {
                    return false;
                }
                GestureEvent::TouchStart { touches }
            }
            WindowInput::TouchMoved { touches, .. } => GestureEvent::TouchMove { touches },
            WindowInput::TouchEnded { .. } => GestureEvent::TouchEnd,
        };
        self.state.apply(event, || surface.bounds())
    }

    fn apply_config(&mut self, config: SliderConfig) -> bool {
        if config == self.config {
            return false;
        }
        if config.slider_percent != self.config.slider_percent {
            self.state.set_position(config.initial_position());
        }
        self.style = config.style();
        self.config = config;
        true
    }

    fn render(&mut self) {
        self.scheduled = false;

        let geometry = Geometry::derive(self.state.position(), &self.style);
        if self.rendered.geometry != Some(geometry) {
            self.surface.set_geometry(&geometry);
            self.rendered.geometry = Some(geometry);
        }

        let dragging = self.state.dragging();
        if self.rendered.dragging != Some(dragging) {
            self.surface.set_dragging(dragging);
            self.rendered.dragging = Some(dragging);
        }

        let handle = self.config.handle_type;
        if self.rendered.handle != Some(handle) {
            debug!("Switching handle decoration to {}", handle);
            self.surface.set_decoration(handle.decoration());
            self.rendered.handle = Some(handle);
        }

        let captions = (self.config.caption1.clone(), self.config.caption2.clone());
        if self.rendered.captions.as_ref() != Some(&captions) {
            let (before, after) = self.config.captions();
            self.surface.set_captions(before, after);
            self.rendered.captions = Some(captions);
        }

        let sources = (self.config.src1.clone(), self.config.src2.clone());
        if self.rendered.sources.as_ref() != Some(&sources) {
            self.surface.set_sources(&sources.0, &sources.1);
            self.rendered.sources = Some(sources);
        }
    }
}

/// Owner of a mounted slider. Dropping it unsubscribes from window input.
pub struct SliderHandle<S: SliderSurface + 'static> {
    instance: Rc<RefCell<Instance<S>>>,
    scheduler: Rc<dyn Scheduler>,
    _subscription: Subscription,
}

/// Creates a slider, renders it once and starts listening to window input.
pub fn mount<S: SliderSurface + 'static>(
    surface: S,
    config: SliderConfig,
    listeners: &WindowListeners,
    scheduler: Rc<dyn Scheduler>,
) -> SliderHandle<S> {
    let instance = Rc::new(RefCell::new(Instance::new(surface, config)));
    instance.borrow_mut().render();

    let subscription = listeners.subscribe({
        let weak = Rc::downgrade(&instance);
        let scheduler = scheduler.clone();
        move |input| {
            let Some(instance) = weak.upgrade() else {
                return;
            };
            let changed = instance.borrow_mut().on_input(input);
            if changed {
                invalidate(&instance, &scheduler);
            }
        }
    });

    info!(
        "Slider mounted at {:.1}%",
        instance.borrow().state.position()
    );

    SliderHandle {
        instance,
        scheduler,
        _subscription: subscription,
    }
}

/// Marks the instance dirty and schedules a render unless one is pending.
fn invalidate<S: SliderSurface + 'static>(
    instance: &Rc<RefCell<Instance<S>>>,
    scheduler: &Rc<dyn Scheduler>,
) {
    {
        let mut inner = instance.borrow_mut();
        if inner.scheduled {
            return;
        }
        inner.scheduled = true;
    }

    let weak = Rc::downgrade(instance);
    scheduler.schedule(Box::new(move || {
        if let Some(instance) = weak.upgrade() {
            instance.borrow_mut().render();
        }
    }));
}

impl<S: SliderSurface + 'static> SliderHandle<S> {
    #[cfg(test)]
    pub fn state(&self) -> SliderState {
        self.instance.borrow().state.clone()
    }

    pub fn position(&self) -> f64 {
        self.instance.borrow().state.position()
    }

    #[cfg(test)]
    pub fn dragging(&self) -> bool {
        self.instance.borrow().state.dragging()
    }

    /// Moves the divider programmatically.
    #[cfg(test)]
    pub fn set_position(&self, position: f64) {
        let changed = self.instance.borrow_mut().state.set_position(position);
        if changed {
            invalidate(&self.instance, &self.scheduler);
        }
    }

    /// Applies externally changed configuration.
    ///
    /// The divider only moves if `slider_percent` itself changed, so editing
    /// an unrelated option does not undo the user's last drag.
    pub fn update_config(&self, config: SliderConfig) {
        let changed = self.instance.borrow_mut().apply_config(config);
        if changed {
            info!("Slider configuration updated");
            invalidate(&self.instance, &self.scheduler);
        }
    }

    /// Unmounts the slider. Pending renders become no-ops.
    pub fn destroy(self) {
        self.instance.borrow().surface.unmount();
        info!("Slider destroyed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::scheduler::ManualScheduler;
    use crate::slider::TouchPoint;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Geometry(Geometry),
        Decoration(Option<Decoration>),
        Captions(Option<String>, Option<String>),
        Sources(String, String),
        Dragging(bool),
        Unmount,
    }

    #[derive(Clone)]
    struct FakeSurface {
        bounds: Rc<RefCell<Bounds>>,
        calls: Rc<RefCell<Vec<Call>>>,
    }

    impl FakeSurface {
        fn new() -> Self {
            Self {
                bounds: Rc::new(RefCell::new(Bounds::new(0.0, 0.0, 200.0, 100.0))),
                calls: Rc::default(),
            }
        }

        fn take_calls(&self) -> Vec<Call> {
            std::mem::take(&mut *self.calls.borrow_mut())
        }

        fn geometry_calls(calls: &[Call]) -> Vec<Geometry> {
            calls
                .iter()
                .filter_map(|c| match c {
                    Call::Geometry(g) => Some(*g),
                    _ => None,
                })
                .collect()
        }
    }

    impl SliderSurface for FakeSurface {
        fn bounds(&self) -> Bounds {
            *self.bounds.borrow()
        }
        fn set_geometry(&self, geometry: &Geometry) {
            self.calls.borrow_mut().push(Call::Geometry(*geometry));
        }
        fn set_decoration(&self, decoration: Option<Decoration>) {
            self.calls.borrow_mut().push(Call::Decoration(decoration));
        }
        fn set_captions(&self, before: Option<&str>, after: Option<&str>) {
            self.calls.borrow_mut().push(Call::Captions(
                before.map(str::to_string),
                after.map(str::to_string),
            ));
        }
        fn set_sources(&self, before: &str, after: &str) {
            self.calls
                .borrow_mut()
                .push(Call::Sources(before.to_string(), after.to_string()));
        }
        fn set_dragging(&self, dragging: bool) {
            self.calls.borrow_mut().push(Call::Dragging(dragging));
        }
        fn unmount(&self) {
            self.calls.borrow_mut().push(Call::Unmount);
        }
    }

    fn config() -> SliderConfig {
        SliderConfig {
            src1: "before.png".into(),
            src2: "after.png".into(),
            caption1: "Before".into(),
            ..SliderConfig::default()
        }
    }

    struct Harness {
        surface: FakeSurface,
        listeners: WindowListeners,
        scheduler: Rc<ManualScheduler>,
        handle: SliderHandle<FakeSurface>,
    }

    fn harness(config: SliderConfig) -> Harness {
        let surface = FakeSurface::new();
        let listeners = WindowListeners::new();
        let scheduler = Rc::new(ManualScheduler::new());
        let handle = mount(surface.clone(), config, &listeners, scheduler.clone());
        Harness {
            surface,
            listeners,
            scheduler,
            handle,
        }
    }

    #[test]
    fn mount_renders_everything_once() {
        let h = harness(config());
        let calls = h.surface.take_calls();
        assert_eq!(FakeSurface::geometry_calls(&calls).len(), 1);
        assert!(calls.contains(&Call::Dragging(false)));
        assert!(calls.contains(&Call::Decoration(None)));
        assert!(calls.contains(&Call::Captions(Some("Before".into()), None)));
        assert!(calls.contains(&Call::Sources("before.png".into(), "after.png".into())));
        assert_eq!(h.listeners.len(), 1);
        assert_eq!(h.handle.position(), 50.0);
    }

    #[test]
    fn renders_are_deferred_and_coalesced() {
        let h = harness(config());
        h.surface.take_calls();

        h.listeners
            .dispatch(&WindowInput::PointerPressed { x: 50.0, y: 10.0 });
        h.listeners
            .dispatch(&WindowInput::PointerMoved { x: 100.0, y: 10.0 });
        h.listeners
            .dispatch(&WindowInput::PointerMoved { x: 150.0, y: 10.0 });

        assert!(h.surface.take_calls().is_empty());
        assert_eq!(h.scheduler.pending(), 1);
        assert_eq!(h.handle.position(), 75.0);

        h.scheduler.run_pending();
        let calls = h.surface.take_calls();
        let geometries = FakeSurface::geometry_calls(&calls);
        assert_eq!(geometries.len(), 1);
        assert_eq!(geometries[0].handle_left_percent, 75.0);
        assert!(calls.contains(&Call::Dragging(true)));
        // nothing else changed
        assert_eq!(calls.len(), 2);
    }

    #[test]
    fn press_outside_bounds_is_ignored() {
        let h = harness(config());
        h.listeners
            .dispatch(&WindowInput::PointerPressed { x: 50.0, y: 150.0 });
        assert!(!h.handle.dragging());
        assert_eq!(h.scheduler.pending(), 0);
    }

    #[test]
    fn drag_continues_outside_bounds_and_release_stops_it() {
        let h = harness(config());
        h.listeners
            .dispatch(&WindowInput::PointerPressed { x: 20.0, y: 10.0 });
        h.listeners
            .dispatch(&WindowInput::PointerMoved { x: -40.0, y: 500.0 });
        assert_eq!(h.handle.position(), 0.0);

        h.listeners.dispatch(&WindowInput::PointerReleased);
        h.listeners
            .dispatch(&WindowInput::PointerMoved { x: 100.0, y: 10.0 });
        assert!(!h.handle.dragging());
        assert_eq!(h.handle.position(), 0.0);
    }

    #[test]
    fn bounds_are_read_live() {
        let h = harness(config());
        h.listeners
            .dispatch(&WindowInput::PointerPressed { x: 50.0, y: 10.0 });
        assert_eq!(h.handle.position(), 25.0);

        *h.surface.bounds.borrow_mut() = Bounds::new(0.0, 0.0, 100.0, 100.0);
        h.listeners
            .dispatch(&WindowInput::PointerMoved { x: 50.0, y: 10.0 });
        assert_eq!(h.handle.position(), 50.0);
    }

    #[test]
    fn touch_drag_tracks_most_recent_finger() {
        let h = harness(config());
        let first = TouchPoint {
            id: 1,
            x: 180.0,
            y: 10.0,
        };
        let second = TouchPoint {
            id: 2,
            x: 40.0,
            y: 10.0,
        };
        h.listeners.dispatch(&WindowInput::TouchStarted {
            id: 2,
            touches: vec![first, second],
        });
        assert_eq!(h.handle.state().active_touch_index(), Some(1));
        assert_eq!(h.handle.position(), 20.0);

        h.listeners.dispatch(&WindowInput::TouchMoved {
            id: 1,
            touches: vec![TouchPoint { x: 0.0, ..first }, second],
        });
        assert_eq!(h.handle.position(), 20.0);

        h.listeners.dispatch(&WindowInput::TouchMoved {
            id: 2,
            touches: vec![first, TouchPoint { x: 120.0, ..second }],
        });
        assert_eq!(h.handle.position(), 60.0);

        h.listeners.dispatch(&WindowInput::TouchEnded {
            id: 2,
            touches: vec![first],
        });
        assert!(!h.handle.dragging());
    }

    #[test]
    fn touch_starting_outside_bounds_is_ignored() {
        let h = harness(config());
        h.listeners.dispatch(&WindowInput::TouchStarted {
            id: 3,
            touches: vec![TouchPoint {
                id: 3,
                x: 300.0,
                y: 10.0,
            }],
        });
        assert!(!h.handle.dragging());
    }

    #[test]
    fn handle_type_change_replaces_decoration_only() {
        let h = harness(config());
        h.surface.take_calls();

        h.handle.update_config(SliderConfig {
            handle_type: HandleType::Circle,
            ..config()
        });
        h.scheduler.run_pending();
        assert_eq!(
            h.surface.take_calls(),
            vec![Call::Decoration(HandleType::Circle.decoration())]
        );
    }

    #[test]
    fn style_change_rerenders_geometry_but_keeps_position() {
        let h = harness(config());
        h.handle.set_position(30.0);
        h.scheduler.run_pending();
        h.surface.take_calls();

        h.handle.update_config(SliderConfig {
            separator_width: 10.0,
            ..config()
        });
        h.scheduler.run_pending();
        let geometries = FakeSurface::geometry_calls(&h.surface.take_calls());
        assert_eq!(geometries.len(), 1);
        assert_eq!(geometries[0].separator_width, 10.0);
        assert_eq!(h.handle.position(), 30.0);
    }

    #[test]
    fn changed_slider_percent_moves_divider() {
        let h = harness(config());
        h.handle.update_config(SliderConfig {
            slider_percent: 80.0,
            ..config()
        });
        assert_eq!(h.handle.position(), 80.0);
    }

    #[test]
    fn identical_config_does_nothing() {
        let h = harness(config());
        h.handle.update_config(config());
        assert_eq!(h.scheduler.pending(), 0);
    }

    #[test]
    fn destroy_unsubscribes_and_cancels_pending_render() {
        let h = harness(config());
        h.listeners
            .dispatch(&WindowInput::PointerPressed { x: 10.0, y: 10.0 });
        assert_eq!(h.scheduler.pending(), 1);
        h.surface.take_calls();

        h.handle.destroy();
        assert_eq!(h.listeners.len(), 0);
        assert_eq!(h.scheduler.run_pending(), 1);
        assert_eq!(h.surface.take_calls(), vec![Call::Unmount]);
    }
}
