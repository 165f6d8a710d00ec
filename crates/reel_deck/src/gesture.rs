//! Pointer gesture state machine
//!
//! One pointer gesture on the progress rail or its thumb:
//!
//! ```text
//! Idle --down--> Pressed --move--> Dragging
//!  ^               |                  |
//!  +----up/cancel--+------up/cancel---+
//! ```
//!
//! Releasing straight from `Pressed` is a click.

use reel_core::events::{event_types, EventType, PointerKind};
use reel_core::fsm::{StateMachine, StateTransitions};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GestureState {
    #[default]
    Idle,
    /// Pointer captured, not moved yet
    Pressed,
    Dragging,
}

impl StateTransitions for GestureState {
    fn on_event(&self, event: EventType) -> Option<Self> {
        use reel_core::events::event_types::*;

        match (self, event) {
            (GestureState::Idle, POINTER_DOWN) => Some(GestureState::Pressed),
            (GestureState::Pressed, POINTER_MOVE) => Some(GestureState::Dragging),
            (GestureState::Pressed | GestureState::Dragging, POINTER_UP | POINTER_CANCEL) => {
                Some(GestureState::Idle)
            }
            _ => None,
        }
    }
}

/// What the pointer went down on
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GestureTarget {
    /// The rail itself: jump to the pointed position
    Track,
    /// The thumb: drag relative to where it was grabbed
    Thumb,
}

/// How a gesture finished
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GestureEnd {
    /// Released without moving
    Click,
    /// Released after at least one move
    Drag,
    /// Aborted by the host
    Cancel,
}

/// The single pointer gesture the deck tracks at a time
#[derive(Clone, Debug, Default)]
pub struct PointerGesture {
    fsm: StateMachine<GestureState>,
    target: Option<GestureTarget>,
    kind: PointerKind,
}

impl PointerGesture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GestureState {
        self.fsm.current()
    }

    pub fn target(&self) -> Option<GestureTarget> {
        self.target
    }

    pub fn pointer_kind(&self) -> PointerKind {
        self.kind
    }

    pub fn is_active(&self) -> bool {
        !self.fsm.is_in(GestureState::Idle)
    }

    /// Capture the pointer. Returns false if a gesture is already active.
    pub fn press(&mut self, target: GestureTarget, kind: PointerKind) -> bool {
        if self.fsm.send(event_types::POINTER_DOWN).is_none() {
            return false;
        }
        self.fsm.clear_history();
        self.target = Some(target);
        self.kind = kind;
        tracing::debug!(?target, ?kind, "gesture pressed");
        true
    }

    /// Record a move; returns the captured target while a gesture is active
    pub fn movement(&mut self) -> Option<GestureTarget> {
        if !self.is_active() {
            return None;
        }
        self.fsm.send(event_types::POINTER_MOVE);
        self.target
    }

    /// Release the pointer, reporting what was released and how
    pub fn release(&mut self) -> Option<(GestureTarget, GestureEnd)> {
        self.finish(event_types::POINTER_UP)
    }

    /// Abort the gesture
    pub fn cancel(&mut self) -> Option<(GestureTarget, GestureEnd)> {
        self.finish(event_types::POINTER_CANCEL)
    }

    /// Drop any gesture without reporting it
    pub fn reset(&mut self) {
        self.fsm.reset();
        self.fsm.clear_history();
        self.target = None;
    }

    fn finish(&mut self, event: EventType) -> Option<(GestureTarget, GestureEnd)> {
        let (from, _) = self.fsm.send(event)?;
        let target = self.target.take()?;
        let end = match (event, from) {
            (event_types::POINTER_CANCEL, _) => GestureEnd::Cancel,
            (_, GestureState::Pressed) => GestureEnd::Click,
            _ => GestureEnd::Drag,
        };
        tracing::debug!(?target, ?end, "gesture finished");
        Some((target, end))
    }
}
