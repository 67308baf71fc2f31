//! Builders for native event records
//!
//! Used to inject events into the SDL queue with `EventPump::push`. Each builder zeroes the
//! record, writes the tag and then every field of the member that belongs to that kind, so
//! decoding a built record gives back the value it was built from.

use sdl3::sys::events::SDL_Event;
use sdl3::sys::keycode::{SDL_Keycode, SDL_Keymod};
use sdl3::sys::mouse::{SDL_MouseButtonFlags, SDL_MouseWheelDirection};
use sdl3::sys::scancode::SDL_Scancode;
use super::{
    ButtonAction, Event, Key, KeyAction, MouseButtonEvent, MouseMotion, MouseWheel, WindowAction,
    KEY_DOWN, KEY_UP, MOUSE_BUTTON_DOWN, MOUSE_BUTTON_UP, MOUSE_MOTION, MOUSE_WHEEL, QUIT,
    WINDOW_EXPOSED, WINDOW_HIDDEN, WINDOW_MOVED, WINDOW_RESIZED, WINDOW_SHOWN,
};
use crate::registry::WindowId;

// SDL keeps the event union at a fixed 128 bytes across versions
const _: () = assert!(std::mem::size_of::<SDL_Event>() == 128);

fn blank(tag: u32) -> SDL_Event {
    // SAFETY: SDL_Event is plain data and all zeroes is a valid value for every member
    let mut raw: SDL_Event = unsafe { std::mem::zeroed() };
    raw.r#type = tag;
    raw
}

/// A record with an arbitrary tag and no payload
pub fn with_tag(tag: u32) -> SDL_Event {
    blank(tag)
}

pub fn quit(timestamp: u64) -> SDL_Event {
    let mut raw = blank(QUIT);
    unsafe {
        raw.quit.timestamp = timestamp;
    }
    raw
}

/// Build the record `event` was decoded from
pub fn encode(event: &Event) -> SDL_Event {
    match event {
        Event::Quit(quit) => self::quit(quit.timestamp),
        Event::Key(key) => self::key(key),
        Event::MouseButton(button) => mouse_button(button),
        Event::MouseMotion(motion) => mouse_motion(motion),
        Event::MouseWheel(wheel) => mouse_wheel(wheel),
        Event::Window(window) => self::window(window.timestamp, window.window_id, window.action),
    }
}

pub fn key(key: &Key) -> SDL_Event {
    let (tag, down) = match key.action {
        KeyAction::Down => (KEY_DOWN, true),
        KeyAction::Up => (KEY_UP, false),
    };

    let mut raw = blank(tag);
    unsafe {
        raw.key.timestamp = key.timestamp;
        raw.key.windowID = key.window_id;
        raw.key.which = key.keyboard;
        raw.key.scancode = SDL_Scancode(key.scancode as _);
        raw.key.key = SDL_Keycode(key.keycode as _);
        raw.key.r#mod = SDL_Keymod(key.modifiers as _);
        raw.key.raw = key.raw;
        raw.key.down = down;
        raw.key.repeat = key.repeat;
    }
    raw
}

pub fn mouse_button(button: &MouseButtonEvent) -> SDL_Event {
    let (tag, down) = match button.action {
        ButtonAction::Down => (MOUSE_BUTTON_DOWN, true),
        ButtonAction::Up => (MOUSE_BUTTON_UP, false),
    };

    let mut raw = blank(tag);
    unsafe {
        raw.button.timestamp = button.timestamp;
        raw.button.windowID = button.window_id;
        raw.button.which = button.mouse;
        raw.button.button = button.button;
        raw.button.down = down;
        raw.button.clicks = button.clicks;
        raw.button.x = button.x;
        raw.button.y = button.y;
    }
    raw
}

pub fn mouse_motion(motion: &MouseMotion) -> SDL_Event {
    let mut raw = blank(MOUSE_MOTION);
    unsafe {
        raw.motion.timestamp = motion.timestamp;
        raw.motion.windowID = motion.window_id;
        raw.motion.which = motion.mouse;
        raw.motion.state = SDL_MouseButtonFlags(motion.state.bits() as _);
        raw.motion.x = motion.x;
        raw.motion.y = motion.y;
        raw.motion.xrel = motion.xrel;
        raw.motion.yrel = motion.yrel;
    }
    raw
}

pub fn mouse_wheel(wheel: &MouseWheel) -> SDL_Event {
    let mut raw = blank(MOUSE_WHEEL);
    unsafe {
        raw.wheel.timestamp = wheel.timestamp;
        raw.wheel.windowID = wheel.window_id;
        raw.wheel.which = wheel.mouse;
        raw.wheel.x = wheel.x;
        raw.wheel.y = wheel.y;
        raw.wheel.direction = SDL_MouseWheelDirection(wheel.direction as _);
    }
    raw
}

pub fn window(timestamp: u64, window_id: WindowId, action: WindowAction) -> SDL_Event {
    let (tag, data1, data2) = match action {
        WindowAction::Shown => (WINDOW_SHOWN, 0, 0),
        WindowAction::Hidden => (WINDOW_HIDDEN, 0, 0),
        WindowAction::Exposed => (WINDOW_EXPOSED, 0, 0),
        WindowAction::Moved { x, y } => (WINDOW_MOVED, x, y),
        WindowAction::Resized { width, height } => (WINDOW_RESIZED, width, height),
    };

    window_raw(tag, timestamp, window_id, data1, data2)
}

/// A window record with any tag from the window range, including actions without a variant
pub fn window_raw(
    tag: u32,
    timestamp: u64,
    window_id: WindowId,
    data1: i32,
    data2: i32,
) -> SDL_Event {
    let mut raw = blank(tag);
    unsafe {
        raw.window.timestamp = timestamp;
        raw.window.windowID = window_id;
        raw.window.data1 = data1;
        raw.window.data2 = data2;
    }
    raw
}
