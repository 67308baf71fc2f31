use sdl3::sys::events::{SDL_EVENT_FINGER_DOWN, SDL_EVENT_WINDOW_FOCUS_GAINED};
use sdl3::sys::keycode::SDLK_ESCAPE;
use super::record;
use super::*;

#[test]
fn test_quit() {
    let raw = record::quit(1_500);

    assert_eq!(decode(&raw), Some(Event::Quit(Quit { timestamp: 1_500 })));
}

#[test]
fn test_key_down_and_up() {
    for (action, repeat) in [(KeyAction::Down, true), (KeyAction::Up, false)] {
        let key = Key {
            action,
            timestamp: 42,
            window_id: 3,
            keyboard: 7,
            scancode: 41,
            keycode: SDLK_ESCAPE.0 as u32,
            modifiers: 0x0040,
            raw: 0x0109,
            repeat,
        };

        assert_eq!(decode(&record::key(&key)), Some(Event::Key(key)));
        assert_eq!(key.is_down(), action == KeyAction::Down);
    }
}

#[test]
fn test_mouse_button() {
    let button = MouseButtonEvent {
        action: ButtonAction::Down,
        timestamp: 7,
        window_id: 1,
        mouse: 12,
        button: 3,
        clicks: 2,
        x: 120.0,
        y: 45.5,
    };

    assert_eq!(decode(&record::mouse_button(&button)), Some(Event::MouseButton(button)));
    assert_eq!(button.button(), Some(MouseButton::Right));
    assert_eq!(button.position(), (120.0, 45.5));
}

#[test]
fn test_mouse_button_up_with_unnamed_button() {
    let button = MouseButtonEvent {
        action: ButtonAction::Up,
        timestamp: 8,
        window_id: 1,
        mouse: 2,
        button: 9,
        clicks: 1,
        x: 3.0,
        y: 4.0,
    };

    // Unnamed buttons are kept as-is rather than dropped
    assert_eq!(decode(&record::mouse_button(&button)), Some(Event::MouseButton(button)));
    assert_eq!(button.button(), None);
}

#[test]
fn test_mouse_motion() {
    let held = MouseButton::Left.mask() | MouseButton::X2.mask();
    let motion = MouseMotion {
        timestamp: 11,
        window_id: 2,
        mouse: 5,
        state: ButtonMask(held),
        x: 10.0,
        y: 20.0,
        xrel: -1.5,
        yrel: 3.0,
    };

    assert_eq!(decode(&record::mouse_motion(&motion)), Some(Event::MouseMotion(motion)));
    assert_eq!(motion.position(), (10.0, 20.0));
    assert_eq!(motion.delta(), (-1.5, 3.0));
    assert_eq!(motion.state.bits(), held);
    assert!(motion.state.left());
    assert!(motion.state.x2());
    assert!(!motion.state.right());
    assert!(motion.state.pressed(MouseButton::X2));
    assert!(!motion.state.pressed(MouseButton::Middle));
}

#[test]
fn test_mouse_wheel() {
    let wheel = MouseWheel {
        timestamp: 5,
        window_id: 1,
        mouse: 4,
        x: 0.5,
        y: 2.0,
        direction: ScrollDirection::Normal,
    };

    assert_eq!(decode(&record::mouse_wheel(&wheel)), Some(Event::MouseWheel(wheel)));
    assert_eq!((wheel.scroll_x(), wheel.scroll_y()), (0.5, 2.0));
}

#[test]
fn test_mouse_wheel_flipped() {
    let wheel = MouseWheel {
        timestamp: 6,
        window_id: 2,
        mouse: 3,
        x: 1.0,
        y: -2.0,
        direction: ScrollDirection::Flipped,
    };

    // Raw values are kept verbatim, only the accessors apply the direction
    assert_eq!(decode(&record::mouse_wheel(&wheel)), Some(Event::MouseWheel(wheel)));
    assert_eq!((wheel.scroll_x(), wheel.scroll_y()), (-1.0, 2.0));
}

#[test]
fn test_fields_are_not_crossed() {
    // Every field gets its own value so a field read from the wrong place shows up
    let key = Key {
        action: KeyAction::Down,
        timestamp: 1,
        window_id: 2,
        keyboard: 3,
        scancode: 4,
        keycode: 5,
        modifiers: 6,
        raw: 7,
        repeat: false,
    };

    let Some(Event::Key(decoded)) = decode(&record::key(&key)) else {
        panic!("expected a key event");
    };

    assert_eq!(
        (
            decoded.timestamp,
            decoded.window_id,
            decoded.keyboard,
            decoded.scancode,
            decoded.keycode,
            decoded.modifiers,
            decoded.raw
        ),
        (1, 2, 3, 4, 5, 6, 7)
    );
}

#[test]
fn test_encode_matches_builders() {
    let events = [
        Event::Quit(Quit { timestamp: 9 }),
        Event::MouseWheel(MouseWheel {
            timestamp: 10,
            window_id: 2,
            mouse: 1,
            x: 0.0,
            y: 1.0,
            direction: ScrollDirection::Normal,
        }),
        Event::Window(WindowEvent {
            timestamp: 11,
            window_id: 2,
            action: WindowAction::Resized {
                width: 320,
                height: 200,
            },
        }),
    ];

    for event in events {
        assert_eq!(decode(&record::encode(&event)), Some(event));
    }
}

#[test]
fn test_window_actions() {
    let actions = [
        WindowAction::Shown,
        WindowAction::Hidden,
        WindowAction::Exposed,
        WindowAction::Moved { x: 100, y: 50 },
        WindowAction::Resized {
            width: 1024,
            height: 768,
        },
    ];

    for action in actions {
        let raw = record::window(99, 4, action);

        assert_eq!(
            decode(&raw),
            Some(Event::Window(WindowEvent {
                timestamp: 99,
                window_id: 4,
                action,
            }))
        );
    }
}

#[test]
fn test_window_action_without_variant_is_dropped() {
    let raw = record::window_raw(SDL_EVENT_WINDOW_FOCUS_GAINED.0, 1, 4, 0, 0);

    assert_eq!(decode(&raw), None);
}

#[test]
fn test_unrecognized_tags_are_dropped() {
    assert_eq!(decode(&record::with_tag(SDL_EVENT_FINGER_DOWN.0)), None);
    assert_eq!(decode(&record::with_tag(0)), None);
    assert_eq!(decode(&record::with_tag(0xffff)), None);
}

#[test]
fn test_event_accessors() {
    let moved = decode(&record::window(2_000_000, 6, WindowAction::Moved { x: 1, y: 2 })).unwrap();
    assert_eq!(moved.window_id(), Some(6));
    assert_eq!(moved.timestamp(), 2_000_000);
    assert_eq!(moved.time().as_millis(), 2);

    let quit = decode(&record::quit(0)).unwrap();
    assert_eq!(quit.window_id(), None);
}

#[derive(Default)]
struct Recorder {
    seen: Vec<&'static str>,
}

impl Observer for Recorder {
    fn on_quit(&mut self, _event: &Quit) {
        self.seen.push("quit");
    }

    fn on_window(&mut self, _event: &WindowEvent) {
        self.seen.push("window");
    }
}

#[test]
fn test_dispatch_reaches_matching_hook() {
    let mut recorder = Recorder::default();

    let events = [
        record::quit(0),
        record::mouse_wheel(&MouseWheel {
            timestamp: 0,
            window_id: 1,
            mouse: 1,
            x: 0.0,
            y: 1.0,
            direction: ScrollDirection::Normal,
        }),
        record::window(0, 1, WindowAction::Exposed),
    ];

    for raw in events.iter() {
        decode(raw).unwrap().dispatch(&mut recorder);
    }

    // The wheel event goes to the default no-op hook
    assert_eq!(recorder.seen, vec!["quit", "window"]);
}

#[cfg(debug_assertions)]
#[test]
#[should_panic]
fn test_window_kind_mismatch_asserts() {
    let raw = record::window(0, 1, WindowAction::Shown);

    decode_window(&raw, WindowKind::Resized);
}
