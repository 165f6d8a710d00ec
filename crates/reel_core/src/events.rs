//! Event dispatch system
//!
//! Input events as delivered by the host environment (wheel, touch, pointer,
//! resize) and a dispatcher that routes them to registered listeners.

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

/// Event type identifier
pub type EventType = u32;

/// Common event types
pub mod event_types {
    use super::EventType;

    pub const POINTER_DOWN: EventType = 1;
    pub const POINTER_UP: EventType = 2;
    pub const POINTER_MOVE: EventType = 3;
    /// Pointer left the surface or the host cancelled the gesture
    pub const POINTER_CANCEL: EventType = 4;
    pub const WHEEL: EventType = 30;
    pub const TOUCH_START: EventType = 33;
    pub const TOUCH_MOVE: EventType = 34;
    pub const TOUCH_END: EventType = 35;
    pub const RESIZE: EventType = 40;
}

/// Kind of device behind a pointer event
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PointerKind {
    #[default]
    Mouse,
    Touch,
    Pen,
}

/// A UI event with associated data
#[derive(Clone, Debug)]
pub struct Event {
    pub event_type: EventType,
    /// Widget the event is addressed to
    pub target: u64,
    pub data: EventData,
    pub propagation_stopped: bool,
}

/// Event-specific data
#[derive(Clone, Debug)]
pub enum EventData {
    /// Client coordinates of a pointer
    Pointer { x: f32, y: f32, kind: PointerKind },
    /// Wheel/touchpad deltas in pixels (positive y = scroll down)
    Wheel { delta_x: f32, delta_y: f32 },
    /// Client coordinates of the primary touch point
    Touch { x: f32, y: f32 },
    Resize { width: f32, height: f32 },
    None,
}

impl Event {
    pub fn new(event_type: EventType, target: u64, data: EventData) -> Self {
        Self {
            event_type,
            target,
            data,
            propagation_stopped: false,
        }
    }

    pub fn wheel(target: u64, delta_x: f32, delta_y: f32) -> Self {
        Self::new(
            event_types::WHEEL,
            target,
            EventData::Wheel { delta_x, delta_y },
        )
    }

    pub fn touch(event_type: EventType, target: u64, x: f32, y: f32) -> Self {
        Self::new(event_type, target, EventData::Touch { x, y })
    }

    pub fn pointer(event_type: EventType, target: u64, x: f32, y: f32, kind: PointerKind) -> Self {
        Self::new(event_type, target, EventData::Pointer { x, y, kind })
    }

    pub fn resize(target: u64, width: f32, height: f32) -> Self {
        Self::new(
            event_types::RESIZE,
            target,
            EventData::Resize { width, height },
        )
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }
}

new_key_type! {
    /// Handle returned by [`EventDispatcher::register`]
    pub struct ListenerId;
}

/// Event handler function type
pub type EventHandler = Box<dyn Fn(&Event) + Send + Sync>;

struct Listener {
    key: (u64, EventType),
    handler: EventHandler,
}

/// Dispatches events to registered handlers
///
/// Handlers for the same `(target, event_type)` pair run in registration
/// order. Every `register` hands back a [`ListenerId`] that removes exactly
/// that handler again.
pub struct EventDispatcher {
    listeners: SlotMap<ListenerId, Listener>,
    routes: FxHashMap<(u64, EventType), SmallVec<[ListenerId; 2]>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self {
            listeners: SlotMap::with_key(),
            routes: FxHashMap::default(),
        }
    }

    /// Register an event handler for a widget and event type
    pub fn register<F>(&mut self, widget_id: u64, event_type: EventType, handler: F) -> ListenerId
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        let key = (widget_id, event_type);
        let id = self.listeners.insert(Listener {
            key,
            handler: Box::new(handler),
        });
        self.routes.entry(key).or_default().push(id);
        id
    }

    /// Remove a previously registered handler
    ///
    /// Returns false if the listener was already removed.
    pub fn unregister(&mut self, id: ListenerId) -> bool {
        let Some(listener) = self.listeners.remove(id) else {
            return false;
        };

        if let Some(route) = self.routes.get_mut(&listener.key) {
            route.retain(|l| *l != id);
            if route.is_empty() {
                self.routes.remove(&listener.key);
            }
        }
        true
    }

    /// Dispatch an event to all registered handlers
    ///
    /// Returns the number of handlers invoked.
    pub fn dispatch(&self, event: &mut Event) -> usize {
        let Some(route) = self.routes.get(&(event.target, event.event_type)) else {
            return 0;
        };

        let mut invoked = 0;
        for id in route {
            if event.propagation_stopped {
                break;
            }
            if let Some(listener) = self.listeners.get(*id) {
                (listener.handler)(event);
                invoked += 1;
            }
        }
        invoked
    }

    /// Total number of live listeners
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Number of live listeners for one widget
    pub fn listeners_for(&self, widget_id: u64) -> usize {
        self.listeners
            .values()
            .filter(|l| l.key.0 == widget_id)
            .count()
    }

    pub fn is_registered(&self, id: ListenerId) -> bool {
        self.listeners.contains_key(id)
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_dispatch_in_registration_order() {
        let mut dispatcher = EventDispatcher::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        let first = log.clone();
        dispatcher.register(7, event_types::WHEEL, move |_| {
            first.lock().unwrap().push("first");
        });
        let second = log.clone();
        dispatcher.register(7, event_types::WHEEL, move |_| {
            second.lock().unwrap().push("second");
        });

        let invoked = dispatcher.dispatch(&mut Event::wheel(7, 0.0, 10.0));
        assert_eq!(invoked, 2);
        assert_eq!(*log.lock().unwrap(), vec!["first", "second"]);
    }

    #[test]
    fn test_dispatch_filters_target_and_type() {
        let mut dispatcher = EventDispatcher::new();
        let hits = Arc::new(Mutex::new(0));

        let h = hits.clone();
        dispatcher.register(1, event_types::WHEEL, move |_| {
            *h.lock().unwrap() += 1;
        });

        assert_eq!(dispatcher.dispatch(&mut Event::wheel(2, 0.0, 1.0)), 0);
        assert_eq!(
            dispatcher.dispatch(&mut Event::resize(1, 800.0, 600.0)),
            0
        );
        assert_eq!(dispatcher.dispatch(&mut Event::wheel(1, 0.0, 1.0)), 1);
        assert_eq!(*hits.lock().unwrap(), 1);
    }

    #[test]
    fn test_unregister_is_symmetric() {
        let mut dispatcher = EventDispatcher::new();
        let a = dispatcher.register(1, event_types::POINTER_DOWN, |_| {});
        let b = dispatcher.register(1, event_types::POINTER_UP, |_| {});
        let c = dispatcher.register(2, event_types::POINTER_UP, |_| {});

        assert_eq!(dispatcher.listener_count(), 3);
        assert_eq!(dispatcher.listeners_for(1), 2);

        assert!(dispatcher.unregister(a));
        assert!(!dispatcher.unregister(a));
        assert!(dispatcher.unregister(b));
        assert_eq!(dispatcher.listeners_for(1), 0);
        assert!(dispatcher.is_registered(c));
        assert_eq!(dispatcher.listener_count(), 1);
    }

    #[test]
    fn test_stopped_propagation_skips_handlers() {
        let mut dispatcher = EventDispatcher::new();
        dispatcher.register(1, event_types::TOUCH_MOVE, |_| {});

        let mut event = Event::touch(event_types::TOUCH_MOVE, 1, 0.0, 0.0);
        event.stop_propagation();
        assert_eq!(dispatcher.dispatch(&mut event), 0);
    }
}
