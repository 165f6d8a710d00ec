//! Headless Replay
//!
//! Drives the default deck through a scripted session and prints what a
//! renderer would draw each frame:
//! - A few wheel notches
//! - A touch swipe that snaps to the next section
//! - A mouse press and drag along the progress rail (with overview zoom)
//! - A thumb drag back toward the start
//!
//! Run with: cargo run -p reel_deck --example replay [-- path/to/deck.toml]
//! Set `RUST_LOG=reel_deck=trace` to see the offset math per event.

use anyhow::{Context, Result};
use reel_deck::prelude::*;

const DECK_ID: u64 = 1;
const FRAME: f32 = 1.0 / 60.0;
const WIDTH: f32 = 1280.0;
const HEIGHT: f32 = 800.0;

enum Step {
    Send(Event),
    /// Grab the thumb wherever it currently is and drag it by `dy`
    DragThumb(f32),
    Frames(usize),
}

fn pointer(event_type: u32, x: f32, y: f32) -> Step {
    Step::Send(Event::pointer(event_type, DECK_ID, x, y, PointerKind::Mouse))
}

fn touch(event_type: u32, y: f32) -> Step {
    Step::Send(Event::touch(event_type, DECK_ID, WIDTH / 2.0, y))
}

fn script(rail_x: f32) -> Vec<Step> {
    use reel_deck::prelude::event_types::*;

    let mut steps = vec![
        Step::Send(Event::wheel(DECK_ID, 0.0, 100.0)),
        Step::Frames(4),
        Step::Send(Event::wheel(DECK_ID, 0.0, 100.0)),
        Step::Frames(12),
        touch(TOUCH_START, 600.0),
    ];
    for y in [570.0, 540.0, 510.0, 480.0] {
        steps.push(touch(TOUCH_MOVE, y));
        steps.push(Step::Frames(2));
    }
    steps.push(touch(TOUCH_END, 480.0));
    steps.push(Step::Frames(40));

    steps.push(pointer(POINTER_DOWN, rail_x, HEIGHT * 0.6));
    steps.push(Step::Frames(6));
    for y in [500.0, 540.0, 580.0, 620.0] {
        steps.push(pointer(POINTER_MOVE, rail_x, y));
        steps.push(Step::Frames(1));
    }
    steps.push(pointer(POINTER_UP, rail_x, 620.0));
    steps.push(Step::Frames(40));

    steps.push(Step::DragThumb(-200.0));
    steps.push(Step::Frames(60));
    steps
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => DeckConfig::load(&path).with_context(|| format!("loading {path}"))?,
        None => DeckConfig::default(),
    };

    let deck = Deck::new(DECK_ID, Section::defaults(), config).shared();
    let mut dispatcher = EventDispatcher::new();
    let attachment = Deck::attach(&deck, &mut dispatcher);

    dispatcher.dispatch(&mut Event::resize(DECK_ID, WIDTH, HEIGHT));
    let rail_x = lock(&deck)?
        .render_info()
        .track
        .map(|track| track.center().x)
        .context("deck produced no rail for the replay viewport")?;

    let mut frame = 0usize;
    for step in script(rail_x) {
        match step {
            Step::Send(mut event) => {
                let handled = dispatcher.dispatch(&mut event);
                tracing::debug!(event_type = event.event_type, handled, "replayed event");
            }
            Step::DragThumb(dy) => {
                let thumb = lock(&deck)?
                    .render_info()
                    .thumb
                    .context("deck lost its rail mid-replay")?
                    .center();
                for (event_type, y) in [
                    (event_types::POINTER_DOWN, thumb.y),
                    (event_types::POINTER_MOVE, thumb.y + dy / 2.0),
                    (event_types::POINTER_MOVE, thumb.y + dy),
                    (event_types::POINTER_UP, thumb.y + dy),
                ] {
                    dispatcher.dispatch(&mut Event::pointer(
                        event_type,
                        DECK_ID,
                        thumb.x,
                        y,
                        PointerKind::Mouse,
                    ));
                }
            }
            Step::Frames(count) => {
                for _ in 0..count {
                    let info = {
                        let mut deck = lock(&deck)?;
                        deck.tick(FRAME);
                        deck.render_info()
                    };
                    frame += 1;
                    println!(
                        "frame {frame:4}  offset {:8.1}  progress {:5.3}  fill {:6.1}  scale {:4.2}  section {}  {:?}{}",
                        info.offset,
                        info.progress,
                        info.fill_extent,
                        info.scale,
                        info.active_section,
                        info.mode,
                        if info.animating { "  *" } else { "" },
                    );
                }
            }
        }
    }

    attachment.detach(&mut dispatcher);
    tracing::info!(frames = frame, "replay finished");
    Ok(())
}

fn lock(deck: &SharedDeck) -> Result<std::sync::MutexGuard<'_, Deck>> {
    deck.lock().map_err(|_| anyhow::anyhow!("deck lock poisoned"))
}
