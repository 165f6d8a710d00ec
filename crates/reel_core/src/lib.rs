//! Reel Core
//!
//! Foundational primitives shared by the Reel crates:
//!
//! - **Geometry**: `Point`, `Size` and `Rect` in logical pixels
//! - **Events**: Wheel, touch, pointer and resize events plus an
//!   `EventDispatcher` with symmetric register/unregister
//! - **State Machines**: the `StateTransitions` trait used by gesture FSMs
//!
//! # Example
//!
//! ```rust
//! use reel_core::events::{event_types, Event, EventDispatcher};
//! use std::sync::atomic::{AtomicU32, Ordering};
//! use std::sync::Arc;
//!
//! let mut dispatcher = EventDispatcher::new();
//! let wheel_ticks = Arc::new(AtomicU32::new(0));
//!
//! let counter = wheel_ticks.clone();
//! let id = dispatcher.register(1, event_types::WHEEL, move |_| {
//!     counter.fetch_add(1, Ordering::Relaxed);
//! });
//!
//! dispatcher.dispatch(&mut Event::wheel(1, 0.0, 100.0));
//! assert_eq!(wheel_ticks.load(Ordering::Relaxed), 1);
//!
//! assert!(dispatcher.unregister(id));
//! dispatcher.dispatch(&mut Event::wheel(1, 0.0, 100.0));
//! assert_eq!(wheel_ticks.load(Ordering::Relaxed), 1);
//! ```

pub mod events;
pub mod fsm;
pub mod geometry;

pub use events::{Event, EventData, EventDispatcher, EventType, ListenerId, PointerKind};
pub use fsm::{StateMachine, StateTransitions};
pub use geometry::{Point, Rect, Size};
