//! Attach/detach lifecycle against a shared dispatcher

use std::sync::Arc;

use reel_deck::prelude::*;

fn shared_deck(id: u64) -> SharedDeck {
    Deck::new(id, Section::defaults(), DeckConfig::default()).shared()
}

#[test]
fn test_attach_routes_events_to_deck() {
    let deck = shared_deck(3);
    let mut dispatcher = EventDispatcher::new();
    let attachment = Deck::attach(&deck, &mut dispatcher);

    assert_eq!(dispatcher.dispatch(&mut Event::resize(3, 1280.0, 800.0)), 1);
    assert_eq!(dispatcher.dispatch(&mut Event::wheel(3, 0.0, 300.0)), 1);
    // Addressed to a different widget
    assert_eq!(dispatcher.dispatch(&mut Event::wheel(4, 0.0, 300.0)), 0);

    {
        let mut deck = deck.lock().unwrap();
        while deck.tick(1.0 / 60.0) {}
        assert_eq!(deck.render_info().offset, -300.0);
    }

    attachment.detach(&mut dispatcher);
}

#[test]
fn test_detach_removes_every_listener() {
    let deck = shared_deck(3);
    let mut dispatcher = EventDispatcher::new();
    let unrelated = dispatcher.register(9, event_types::WHEEL, |_| {});

    let attachment = Deck::attach(&deck, &mut dispatcher);
    assert!(dispatcher.listeners_for(3) > 0);

    let removed = attachment.detach(&mut dispatcher);
    assert!(removed > 0);
    assert_eq!(dispatcher.listeners_for(3), 0);
    assert!(dispatcher.is_registered(unrelated));
    assert_eq!(dispatcher.listener_count(), 1);

    // Detached decks no longer see input
    dispatcher.dispatch(&mut Event::resize(3, 1280.0, 800.0));
    assert!(!deck.lock().unwrap().controller().has_layout());
}

#[test]
fn test_detach_mid_gesture_resets_interaction() {
    let deck = shared_deck(3);
    let mut dispatcher = EventDispatcher::new();
    let attachment = Deck::attach(&deck, &mut dispatcher);

    dispatcher.dispatch(&mut Event::resize(3, 1280.0, 800.0));
    dispatcher.dispatch(&mut Event::pointer(
        event_types::POINTER_DOWN,
        3,
        1258.0,
        600.0,
        PointerKind::Mouse,
    ));
    dispatcher.dispatch(&mut Event::pointer(
        event_types::POINTER_MOVE,
        3,
        1258.0,
        620.0,
        PointerKind::Mouse,
    ));
    {
        let deck = deck.lock().unwrap();
        assert_eq!(deck.render_info().mode, InteractionMode::Dragging);
        assert!(deck.overview().is_zoomed());
    }

    attachment.detach(&mut dispatcher);

    let deck = deck.lock().unwrap();
    assert_eq!(deck.render_info().mode, InteractionMode::Settled);
    assert_eq!(deck.render_info().scale, 1.0);
    assert!(!deck.is_attached());
}

#[test]
fn test_reattach_after_detach() {
    let deck = shared_deck(5);
    let mut dispatcher = EventDispatcher::new();

    for _ in 0..3 {
        let attachment = Deck::attach(&deck, &mut dispatcher);
        assert!(deck.lock().unwrap().is_attached());
        attachment.detach(&mut dispatcher);
        assert_eq!(dispatcher.listener_count(), 0);
    }

    // Handlers hold the only other references to the deck
    assert_eq!(Arc::strong_count(&deck), 1);
}
