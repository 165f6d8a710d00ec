//! The deck component
//!
//! Ties sections, layout, the scroll controller, the input adapters, the
//! progress rail and the overview zoom together behind one event entry
//! point and one frame tick.
//!
//! ```rust
//! use reel_core::events::{Event, EventDispatcher};
//! use reel_deck::{Deck, DeckConfig, Section};
//!
//! let deck = Deck::new(1, Section::defaults(), DeckConfig::default()).shared();
//! let mut dispatcher = EventDispatcher::new();
//! let attachment = Deck::attach(&deck, &mut dispatcher);
//!
//! dispatcher.dispatch(&mut Event::resize(1, 1280.0, 800.0));
//! dispatcher.dispatch(&mut Event::wheel(1, 0.0, 120.0));
//! for _ in 0..30 {
//!     deck.lock().unwrap().tick(1.0 / 60.0);
//! }
//! assert_eq!(deck.lock().unwrap().render_info().offset, -120.0);
//!
//! attachment.detach(&mut dispatcher);
//! assert_eq!(dispatcher.listener_count(), 0);
//! ```

use std::mem;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use reel_animation::{FrameScheduler, TimerId};
use reel_core::events::{
    event_types, Event, EventData, EventDispatcher, EventType, ListenerId, PointerKind,
};
use reel_core::geometry::{Point, Rect, Size};
use smallvec::SmallVec;

use crate::config::DeckConfig;
use crate::controller::{InteractionMode, ScrollController};
use crate::gesture::{GestureEnd, GestureState, GestureTarget, PointerGesture};
use crate::indicator::{ProgressIndicator, RailHit};
use crate::input::{TouchAdapter, TrackDragAdapter, WheelAdapter};
use crate::layout::DeckLayout;
use crate::overview::OverviewZoom;
use crate::section::Section;

/// Shared handle to a deck for event handlers and the frame loop
pub type SharedDeck = Arc<Mutex<Deck>>;

/// Event types a deck listens to while attached
const LISTENED: [EventType; 9] = [
    event_types::WHEEL,
    event_types::TOUCH_START,
    event_types::TOUCH_MOVE,
    event_types::TOUCH_END,
    event_types::POINTER_DOWN,
    event_types::POINTER_MOVE,
    event_types::POINTER_UP,
    event_types::POINTER_CANCEL,
    event_types::RESIZE,
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DeckTimer {
    ReleaseOverview,
}

// ============================================================================
// Render Info
// ============================================================================

/// Everything a renderer needs for one frame
///
/// The content is translated by `offset` first and then scaled by `scale`
/// about `scale_origin`, the middle of the viewport. The translation is in
/// unscaled content pixels, so the section in view stays centered while the
/// overview zooms out around it. [`DeckRenderInfo::content_to_screen`]
/// applies the whole transform.
#[derive(Clone, Debug, PartialEq)]
pub struct DeckRenderInfo {
    /// Vertical content translation (0 or negative), applied before `scale`
    pub offset: f32,
    /// Content scale, below 1.0 while in overview
    pub scale: f32,
    /// Fixed point of the scale, in viewport coordinates
    pub scale_origin: Point,
    pub progress: f32,
    /// Filled length of the rail
    pub fill_extent: f32,
    pub thumb: Option<Rect>,
    pub track: Option<Rect>,
    pub active_section: usize,
    pub mode: InteractionMode,
    pub animating: bool,
}

impl DeckRenderInfo {
    /// Viewport position of a point given in content coordinates
    pub fn content_to_screen(&self, point: Point) -> Point {
        let origin = self.scale_origin;
        Point::new(
            origin.x + (point.x - origin.x) * self.scale,
            origin.y + (point.y + self.offset - origin.y) * self.scale,
        )
    }
}

// ============================================================================
// Deck
// ============================================================================

pub struct Deck {
    id: u64,
    sections: Vec<Section>,
    config: DeckConfig,
    controller: ScrollController,
    wheel: WheelAdapter,
    touch: TouchAdapter,
    track: TrackDragAdapter,
    indicator: ProgressIndicator,
    gesture: PointerGesture,
    overview: OverviewZoom,
    timers: FrameScheduler<DeckTimer>,
    overview_release: Option<TimerId>,
    viewport: Size,
    /// Content heights reported by the host, per section
    measured: Vec<f32>,
    attached: bool,
}

impl Deck {
    /// Create a deck addressed by widget `id`
    pub fn new(id: u64, sections: Vec<Section>, config: DeckConfig) -> Self {
        tracing::debug!(id, sections = sections.len(), "creating deck");
        Self {
            id,
            wheel: WheelAdapter::new(&config),
            touch: TouchAdapter::new(&config),
            track: TrackDragAdapter::new(&config),
            indicator: ProgressIndicator::new(&config.track),
            overview: OverviewZoom::new(&config.overview),
            sections,
            config,
            controller: ScrollController::new(),
            gesture: PointerGesture::new(),
            timers: FrameScheduler::new(),
            overview_release: None,
            viewport: Size::ZERO,
            measured: Vec::new(),
            attached: false,
        }
    }

    pub fn shared(self) -> SharedDeck {
        Arc::new(Mutex::new(self))
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn config(&self) -> &DeckConfig {
        &self.config
    }

    pub fn controller(&self) -> &ScrollController {
        &self.controller
    }

    pub fn indicator(&self) -> &ProgressIndicator {
        &self.indicator
    }

    pub fn overview(&self) -> &OverviewZoom {
        &self.overview
    }

    pub fn gesture_state(&self) -> GestureState {
        self.gesture.state()
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    // ------------------------------------------------------------------------
    // Layout
    // ------------------------------------------------------------------------

    pub fn on_resize(&mut self, width: f32, height: f32) {
        self.viewport = Size::new(width, height);
        self.relayout();
    }

    /// Report measured content heights, indexed like the sections
    pub fn set_section_extents(&mut self, extents: Vec<f32>) {
        self.measured = extents;
        self.relayout();
    }

    fn relayout(&mut self) {
        let layout = DeckLayout::measure(
            self.viewport,
            self.sections.len(),
            &self.measured,
            &self.config.track,
        );
        match &layout {
            Some(layout) => tracing::debug!(
                "Deck {} layout: viewport={:.0}x{:.0} content={:.0} max_scroll={:.0}",
                self.id,
                self.viewport.width,
                self.viewport.height,
                layout.content_extent(),
                layout.max_scroll()
            ),
            None => tracing::warn!(
                id = self.id,
                width = self.viewport.width,
                height = self.viewport.height,
                "viewport not measurable, deck input disabled"
            ),
        }
        self.controller.set_layout(layout);
    }

    // ------------------------------------------------------------------------
    // Input
    // ------------------------------------------------------------------------

    /// Route one input event. Returns true when the deck consumed it.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        match (event.event_type, &event.data) {
            (event_types::WHEEL, EventData::Wheel { delta_y, .. }) => self.on_wheel(*delta_y),
            (event_types::TOUCH_START, EventData::Touch { y, .. }) => self.on_touch_start(*y),
            (event_types::TOUCH_MOVE, EventData::Touch { y, .. }) => self.on_touch_move(*y),
            (event_types::TOUCH_END, _) => self.on_touch_end(),
            (event_types::POINTER_DOWN, EventData::Pointer { x, y, kind }) => {
                self.on_pointer_down(Point::new(*x, *y), *kind)
            }
            (event_types::POINTER_MOVE, EventData::Pointer { y, .. }) => self.on_pointer_move(*y),
            (event_types::POINTER_UP, EventData::Pointer { y, .. }) => self.on_pointer_up(*y),
            (event_types::POINTER_CANCEL, _) => self.on_pointer_cancel(),
            (event_types::RESIZE, EventData::Resize { width, height }) => {
                self.on_resize(*width, *height);
                true
            }
            _ => false,
        }
    }

    pub fn on_wheel(&mut self, delta_y: f32) -> bool {
        self.wheel.on_wheel(&mut self.controller, delta_y).is_some()
    }

    pub fn on_touch_start(&mut self, y: f32) -> bool {
        if self.gesture.is_active() {
            return false;
        }
        self.touch.on_start(&mut self.controller, y);
        self.touch.is_active()
    }

    pub fn on_touch_move(&mut self, y: f32) -> bool {
        if self.gesture.is_active() {
            return false;
        }
        self.touch.on_move(&mut self.controller, y).is_some()
    }

    pub fn on_touch_end(&mut self) -> bool {
        if !self.touch.is_active() {
            return false;
        }
        self.touch.on_end(&mut self.controller);
        true
    }

    /// Press on the rail or thumb; anywhere else is not ours
    pub fn on_pointer_down(&mut self, point: Point, kind: PointerKind) -> bool {
        let Some(hit) = self.indicator.hit_test(&self.controller, point) else {
            return false;
        };
        let target = match hit {
            RailHit::Thumb => GestureTarget::Thumb,
            RailHit::Track => GestureTarget::Track,
        };
        if !self.gesture.press(target, kind) {
            return false;
        }

        if let Some(timer) = self.overview_release.take() {
            self.timers.cancel(timer);
        }

        match target {
            GestureTarget::Track => {
                self.track.on_press(&mut self.controller, point.y);
            }
            GestureTarget::Thumb => {
                self.indicator.begin_drag(&mut self.controller, point.y);
            }
        }

        if kind == PointerKind::Mouse {
            self.overview.enter();
        }
        true
    }

    pub fn on_pointer_move(&mut self, y: f32) -> bool {
        match self.gesture.movement() {
            Some(GestureTarget::Track) => self.track.on_move(&mut self.controller, y).is_some(),
            Some(GestureTarget::Thumb) => self.indicator.drag_to(&mut self.controller, y).is_some(),
            None => false,
        }
    }

    pub fn on_pointer_up(&mut self, y: f32) -> bool {
        let Some((target, end)) = self.gesture.release() else {
            return false;
        };

        match target {
            GestureTarget::Track => {
                self.track
                    .on_release(&mut self.controller, y, end == GestureEnd::Click);
            }
            GestureTarget::Thumb => {
                let snap = self
                    .config
                    .snap
                    .enabled
                    .then_some(self.config.motion.settle);
                self.indicator.end_drag(&mut self.controller, snap);
            }
        }

        self.schedule_overview_release(end);
        true
    }

    pub fn on_pointer_cancel(&mut self) -> bool {
        let Some((target, end)) = self.gesture.cancel() else {
            return false;
        };

        match target {
            GestureTarget::Track => {
                self.track.flush(&mut self.controller);
                self.controller.release(None);
            }
            GestureTarget::Thumb => {
                self.indicator.end_drag(&mut self.controller, None);
            }
        }

        self.schedule_overview_release(end);
        true
    }

    fn schedule_overview_release(&mut self, end: GestureEnd) {
        if !self.overview.is_zoomed() {
            return;
        }
        let delay = match end {
            GestureEnd::Click => self.config.overview.release_after_click_ms,
            GestureEnd::Drag | GestureEnd::Cancel => self.config.overview.release_after_drag_ms,
        };
        if let Some(previous) = self.overview_release.take() {
            self.timers.cancel(previous);
        }
        self.overview_release = Some(self.timers.after(delay, DeckTimer::ReleaseOverview));
    }

    // ------------------------------------------------------------------------
    // Frame
    // ------------------------------------------------------------------------

    /// Advance one frame of `dt` seconds
    ///
    /// Applies the latest rail drag target, steps the offset and zoom
    /// animations and fires due timers. Returns true while anything is
    /// still moving or pending.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.track.flush(&mut self.controller);

        for timer in self.timers.advance(dt * 1000.0) {
            match timer {
                DeckTimer::ReleaseOverview => {
                    self.overview_release = None;
                    self.overview.release();
                }
            }
        }

        let scrolling = self.controller.tick(dt);
        let zooming = self.overview.tick(dt);
        scrolling || zooming || self.timers.pending_count() > 0
    }

    pub fn render_info(&self) -> DeckRenderInfo {
        let layout = self.controller.layout();
        DeckRenderInfo {
            offset: self.controller.offset(),
            scale: self.overview.scale(),
            scale_origin: layout.map_or(Point::default(), |layout| {
                let viewport = layout.viewport();
                Point::new(viewport.width / 2.0, viewport.height / 2.0)
            }),
            progress: self.controller.progress(),
            fill_extent: self.indicator.fill_extent(&self.controller),
            thumb: self.indicator.thumb_rect(&self.controller),
            track: layout.map(DeckLayout::track),
            active_section: self.controller.active_section(),
            mode: self.controller.mode(),
            animating: self.controller.is_animating() || self.overview.is_animating(),
        }
    }

    // ------------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------------

    /// Register the deck's listeners for its widget id
    pub fn attach(deck: &SharedDeck, dispatcher: &mut EventDispatcher) -> Attachment {
        let id = {
            let mut guard = lock(deck);
            if guard.attached {
                tracing::warn!(id = guard.id, "deck attached twice");
            }
            guard.attached = true;
            guard.id
        };

        let listeners = LISTENED
            .iter()
            .map(|&event_type| {
                let deck = Arc::clone(deck);
                dispatcher.register(id, event_type, move |event| {
                    lock(&deck).handle_event(event);
                })
            })
            .collect();

        tracing::debug!(id, "deck attached");
        Attachment {
            deck: Arc::clone(deck),
            listeners,
        }
    }

    /// Drop all transient interaction state
    pub fn on_detach(&mut self) {
        self.timers.clear();
        self.overview_release = None;
        self.gesture.reset();
        self.touch.reset();
        self.track.reset();
        self.indicator.reset();
        self.overview.reset();
        self.controller.set_mode(InteractionMode::Settled);
        self.attached = false;
        tracing::debug!(id = self.id, "deck detached");
    }
}

fn lock(deck: &SharedDeck) -> MutexGuard<'_, Deck> {
    deck.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Listeners registered by [`Deck::attach`]
///
/// Must be handed back through [`Attachment::detach`]; dropping it leaves
/// the listeners registered.
#[must_use = "call `detach` to remove the deck's listeners"]
pub struct Attachment {
    deck: SharedDeck,
    listeners: SmallVec<[ListenerId; 9]>,
}

impl Attachment {
    pub fn listener_ids(&self) -> &[ListenerId] {
        &self.listeners
    }

    /// Remove exactly the listeners this attachment registered
    ///
    /// Returns how many were still registered.
    pub fn detach(mut self, dispatcher: &mut EventDispatcher) -> usize {
        let removed = mem::take(&mut self.listeners)
            .into_iter()
            .filter(|id| dispatcher.unregister(*id))
            .count();
        lock(&self.deck).on_detach();
        removed
    }
}

impl Drop for Attachment {
    fn drop(&mut self) {
        if !self.listeners.is_empty() {
            tracing::warn!(
                listeners = self.listeners.len(),
                "deck attachment dropped without detach"
            );
        }
    }
}
