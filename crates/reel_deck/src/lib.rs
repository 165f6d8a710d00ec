//! Reel Deck
//!
//! A full-viewport presentation of stacked sections, moved by wheel, touch
//! or a draggable progress rail instead of native scrolling.
//!
//! The host feeds input events and frame ticks into a [`Deck`] and reads a
//! [`DeckRenderInfo`] back each frame:
//!
//! - **Controller**: the single scroll offset, clamped to the content
//! - **Input Adapters**: wheel, touch and rail-drag translation
//! - **Progress Indicator**: rail fill, thumb geometry and thumb dragging
//! - **Overview**: zoomed-out preview while the rail is in use
//!
//! ```rust
//! use reel_deck::prelude::*;
//!
//! let mut deck = Deck::new(1, Section::defaults(), DeckConfig::default());
//! deck.on_resize(1280.0, 800.0);
//!
//! deck.on_wheel(100.0);
//! while deck.tick(1.0 / 60.0) {}
//!
//! let info = deck.render_info();
//! assert_eq!(info.offset, -100.0);
//! assert_eq!(info.active_section, 0);
//! ```

pub mod config;
pub mod controller;
pub mod deck;
pub mod gesture;
pub mod indicator;
pub mod input;
pub mod layout;
pub mod overview;
pub mod section;

pub use config::{ConfigError, DeckConfig};
pub use controller::{InteractionMode, ScrollController};
pub use deck::{Attachment, Deck, DeckRenderInfo, SharedDeck};
pub use gesture::{GestureEnd, GestureState, GestureTarget};
pub use indicator::{ProgressIndicator, RailHit};
pub use input::{TouchAdapter, TrackDragAdapter, WheelAdapter};
pub use layout::DeckLayout;
pub use overview::OverviewZoom;
pub use section::{Section, SectionTheme};

/// Common imports for hosts driving a deck
pub mod prelude {
    pub use crate::config::DeckConfig;
    pub use crate::controller::InteractionMode;
    pub use crate::deck::{Attachment, Deck, DeckRenderInfo, SharedDeck};
    pub use crate::section::Section;
    pub use reel_core::events::{event_types, Event, EventDispatcher, PointerKind};
}
