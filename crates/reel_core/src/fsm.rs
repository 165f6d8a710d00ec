//! State machine runtime
//!
//! Flat state machines for interaction states. A state type describes its
//! own transitions through [`StateTransitions`]; [`StateMachine`] drives it
//! and keeps a transition history for debugging.

use std::fmt::Debug;
use std::hash::Hash;

use crate::events::EventType;

/// Transition table for an interaction state enum
///
/// ```rust
/// use reel_core::events::event_types;
/// use reel_core::fsm::StateTransitions;
///
/// #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// enum Press {
///     Up,
///     Down,
/// }
///
/// impl StateTransitions for Press {
///     fn on_event(&self, event: u32) -> Option<Self> {
///         match (self, event) {
///             (Press::Up, event_types::POINTER_DOWN) => Some(Press::Down),
///             (Press::Down, event_types::POINTER_UP) => Some(Press::Up),
///             _ => None,
///         }
///     }
/// }
///
/// assert_eq!(Press::Up.on_event(event_types::POINTER_DOWN), Some(Press::Down));
/// assert_eq!(Press::Up.on_event(event_types::POINTER_UP), None);
/// ```
pub trait StateTransitions:
    Clone + Copy + PartialEq + Eq + Hash + Send + Sync + Debug + 'static
{
    /// Handle an event and return the new state, or None if no transition
    fn on_event(&self, event: EventType) -> Option<Self>;
}

/// A state machine instance over a [`StateTransitions`] state type
#[derive(Clone, Debug)]
pub struct StateMachine<S: StateTransitions> {
    current: S,
    initial: S,
    history: Vec<(S, EventType, S)>,
}

impl<S: StateTransitions> StateMachine<S> {
    pub fn new(initial: S) -> Self {
        Self {
            current: initial,
            initial,
            history: Vec::new(),
        }
    }

    /// Get the current state
    pub fn current(&self) -> S {
        self.current
    }

    /// Check if we're in a specific state
    pub fn is_in(&self, state: S) -> bool {
        self.current == state
    }

    /// Send an event, returning `Some((from, to))` when a transition happened
    pub fn send(&mut self, event: EventType) -> Option<(S, S)> {
        let from = self.current;
        let to = from.on_event(event)?;
        self.current = to;
        self.history.push((from, event, to));
        tracing::trace!(?from, ?to, event, "fsm transition");
        Some((from, to))
    }

    /// Return to the initial state without recording a transition
    pub fn reset(&mut self) {
        self.current = self.initial;
    }

    /// Get transition history
    pub fn history(&self) -> &[(S, EventType, S)] {
        &self.history
    }

    /// Clear transition history
    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}

impl<S: StateTransitions + Default> Default for StateMachine<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}
