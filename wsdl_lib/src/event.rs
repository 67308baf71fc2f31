//! Typed SDL events
//!
//! SDL hands out events as `SDL_Event`, a C union whose leading `type` field says which member
//! is valid. `decode` reads that tag, copies the fields of the matching member into the variant
//! for that kind and drops every kind it doesn't know about.

mod observer;
mod pump;
pub mod record;
#[cfg(test)]
mod test;

use std::time::Duration;
use bitfield::bitfield;
use num_derive::FromPrimitive;
use num_traits::FromPrimitive;
use sdl3::sys::events::{
    SDL_Event, SDL_EVENT_KEY_DOWN, SDL_EVENT_KEY_UP, SDL_EVENT_MOUSE_BUTTON_DOWN,
    SDL_EVENT_MOUSE_BUTTON_UP, SDL_EVENT_MOUSE_MOTION, SDL_EVENT_MOUSE_WHEEL, SDL_EVENT_QUIT,
    SDL_EVENT_WINDOW_EXPOSED, SDL_EVENT_WINDOW_FIRST, SDL_EVENT_WINDOW_HIDDEN,
    SDL_EVENT_WINDOW_LAST, SDL_EVENT_WINDOW_MOVED, SDL_EVENT_WINDOW_RESIZED,
    SDL_EVENT_WINDOW_SHOWN,
};
use crate::registry::WindowId;

pub use observer::Observer;
pub use pump::{EventPump, PollIter};

pub(crate) const QUIT: u32 = SDL_EVENT_QUIT.0;
pub(crate) const KEY_DOWN: u32 = SDL_EVENT_KEY_DOWN.0;
pub(crate) const KEY_UP: u32 = SDL_EVENT_KEY_UP.0;
pub(crate) const MOUSE_MOTION: u32 = SDL_EVENT_MOUSE_MOTION.0;
pub(crate) const MOUSE_BUTTON_DOWN: u32 = SDL_EVENT_MOUSE_BUTTON_DOWN.0;
pub(crate) const MOUSE_BUTTON_UP: u32 = SDL_EVENT_MOUSE_BUTTON_UP.0;
pub(crate) const MOUSE_WHEEL: u32 = SDL_EVENT_MOUSE_WHEEL.0;
pub(crate) const WINDOW_FIRST: u32 = SDL_EVENT_WINDOW_FIRST.0;
pub(crate) const WINDOW_LAST: u32 = SDL_EVENT_WINDOW_LAST.0;
pub(crate) const WINDOW_SHOWN: u32 = SDL_EVENT_WINDOW_SHOWN.0;
pub(crate) const WINDOW_HIDDEN: u32 = SDL_EVENT_WINDOW_HIDDEN.0;
pub(crate) const WINDOW_EXPOSED: u32 = SDL_EVENT_WINDOW_EXPOSED.0;
pub(crate) const WINDOW_MOVED: u32 = SDL_EVENT_WINDOW_MOVED.0;
pub(crate) const WINDOW_RESIZED: u32 = SDL_EVENT_WINDOW_RESIZED.0;

/// One decoded event. Exactly one kind per native record.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Event {
    Quit(Quit),
    Key(Key),
    MouseButton(MouseButtonEvent),
    MouseMotion(MouseMotion),
    MouseWheel(MouseWheel),
    Window(WindowEvent),
}

impl Event {
    /// Timestamp in nanoseconds since SDL was initialized
    pub fn timestamp(&self) -> u64 {
        match self {
            Event::Quit(e) => e.timestamp,
            Event::Key(e) => e.timestamp,
            Event::MouseButton(e) => e.timestamp,
            Event::MouseMotion(e) => e.timestamp,
            Event::MouseWheel(e) => e.timestamp,
            Event::Window(e) => e.timestamp,
        }
    }

    pub fn time(&self) -> Duration {
        Duration::from_nanos(self.timestamp())
    }

    /// The window with keyboard or mouse focus, or the window a window event is about. Quit
    /// isn't tied to any window.
    pub fn window_id(&self) -> Option<WindowId> {
        match self {
            Event::Quit(_) => None,
            Event::Key(e) => Some(e.window_id),
            Event::MouseButton(e) => Some(e.window_id),
            Event::MouseMotion(e) => Some(e.window_id),
            Event::MouseWheel(e) => Some(e.window_id),
            Event::Window(e) => Some(e.window_id),
        }
    }

    /// Hand the event to the observer hook for its kind
    pub fn dispatch(&self, observer: &mut dyn Observer) {
        match self {
            Event::Quit(e) => observer.on_quit(e),
            Event::Key(e) => observer.on_key(e),
            Event::MouseButton(e) => observer.on_mouse_button(e),
            Event::MouseMotion(e) => observer.on_mouse_motion(e),
            Event::MouseWheel(e) => observer.on_mouse_wheel(e),
            Event::Window(e) => observer.on_window(e),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Quit {
    pub timestamp: u64,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum KeyAction {
    Up,
    Down,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Key {
    pub action: KeyAction,
    pub timestamp: u64,
    pub window_id: WindowId,
    /// Keyboard instance, 0 when the platform can't tell keyboards apart
    pub keyboard: u32,
    /// Physical key position (`SDL_Scancode`)
    pub scancode: i32,
    /// Layout dependent key symbol (`SDL_Keycode`)
    pub keycode: u32,
    /// Active modifiers (`SDL_Keymod`)
    pub modifiers: u16,
    /// Platform dependent scancode
    pub raw: u16,
    pub repeat: bool,
}

impl Key {
    pub fn is_down(&self) -> bool {
        self.action == KeyAction::Down
    }
}

/// Mouse buttons SDL gives a name to. Other button indices are reported as-is in
/// `MouseButtonEvent::button`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, FromPrimitive)]
pub enum MouseButton {
    Left = 1,
    Middle = 2,
    Right = 3,
    X1 = 4,
    X2 = 5,
}

impl MouseButton {
    pub fn from_index(index: u8) -> Option<MouseButton> {
        MouseButton::from_u8(index)
    }

    pub fn mask(self) -> u32 {
        1 << (self as u32 - 1)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ButtonAction {
    Up,
    Down,
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct MouseButtonEvent {
    pub action: ButtonAction,
    pub timestamp: u64,
    pub window_id: WindowId,
    pub mouse: u32,
    /// SDL button index, 1 based
    pub button: u8,
    /// 1 for single click, 2 for double click, and so on
    pub clicks: u8,
    pub x: f32,
    pub y: f32,
}

impl MouseButtonEvent {
    pub fn button(&self) -> Option<MouseButton> {
        MouseButton::from_index(self.button)
    }

    pub fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }
}

bitfield! {
    /// Buttons held while the mouse moved
    #[derive(Copy, Clone, PartialEq, Eq)]
    pub struct ButtonMask(u32);
    impl Debug;

    pub bool, left, _: 0;
    pub bool, middle, _: 1;
    pub bool, right, _: 2;
    pub bool, x1, _: 3;
    pub bool, x2, _: 4;
}

impl ButtonMask {
    pub fn pressed(&self, button: MouseButton) -> bool {
        self.0 & button.mask() != 0
    }

    pub fn bits(&self) -> u32 {
        self.0
    }
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct MouseMotion {
    pub timestamp: u64,
    pub window_id: WindowId,
    pub mouse: u32,
    pub state: ButtonMask,
    pub x: f32,
    pub y: f32,
    pub xrel: f32,
    pub yrel: f32,
}

impl MouseMotion {
    pub fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    pub fn delta(&self) -> (f32, f32) {
        (self.xrel, self.yrel)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, FromPrimitive)]
pub enum ScrollDirection {
    Normal = 0,
    /// "Natural" scrolling, the platform reports the amounts negated
    Flipped = 1,
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct MouseWheel {
    pub timestamp: u64,
    pub window_id: WindowId,
    pub mouse: u32,
    /// Amount scrolled horizontally, as reported
    pub x: f32,
    /// Amount scrolled vertically, as reported
    pub y: f32,
    pub direction: ScrollDirection,
}

impl MouseWheel {
    /// Horizontal amount with the direction applied
    pub fn scroll_x(&self) -> f32 {
        match self.direction {
            ScrollDirection::Normal => self.x,
            ScrollDirection::Flipped => -self.x,
        }
    }

    /// Vertical amount with the direction applied
    pub fn scroll_y(&self) -> f32 {
        match self.direction {
            ScrollDirection::Normal => self.y,
            ScrollDirection::Flipped => -self.y,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum WindowAction {
    Shown,
    Hidden,
    /// The window needs to be redrawn
    Exposed,
    Moved { x: i32, y: i32 },
    Resized { width: i32, height: i32 },
}

impl WindowAction {
    /// Second level of classification for tags in the window range. Window actions without a
    /// variant return None.
    fn kind(tag: u32) -> Option<WindowKind> {
        match tag {
            WINDOW_SHOWN => Some(WindowKind::Shown),
            WINDOW_HIDDEN => Some(WindowKind::Hidden),
            WINDOW_EXPOSED => Some(WindowKind::Exposed),
            WINDOW_MOVED => Some(WindowKind::Moved),
            WINDOW_RESIZED => Some(WindowKind::Resized),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct WindowEvent {
    pub timestamp: u64,
    pub window_id: WindowId,
    pub action: WindowAction,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum WindowKind {
    Shown,
    Hidden,
    Exposed,
    Moved,
    Resized,
}

impl WindowKind {
    fn tag(self) -> u32 {
        match self {
            WindowKind::Shown => WINDOW_SHOWN,
            WindowKind::Hidden => WINDOW_HIDDEN,
            WindowKind::Exposed => WINDOW_EXPOSED,
            WindowKind::Moved => WINDOW_MOVED,
            WindowKind::Resized => WINDOW_RESIZED,
        }
    }
}

/// Return the tag of a native record
pub fn tag(raw: &SDL_Event) -> u32 {
    // SAFETY: every member of the union starts with the 32 bit type tag
    unsafe { raw.r#type }
}

/// Decode a native record. Returns None for kinds without a variant.
pub fn decode(raw: &SDL_Event) -> Option<Event> {
    let tag = tag(raw);

    let event = match tag {
        KEY_DOWN | KEY_UP => Event::Key(decode_key(raw)),
        MOUSE_BUTTON_DOWN | MOUSE_BUTTON_UP => Event::MouseButton(decode_mouse_button(raw)),
        MOUSE_MOTION => Event::MouseMotion(decode_mouse_motion(raw)),
        MOUSE_WHEEL => Event::MouseWheel(decode_mouse_wheel(raw)),
        QUIT => Event::Quit(decode_quit(raw)),
        WINDOW_FIRST..=WINDOW_LAST => {
            let kind = WindowAction::kind(tag)?;
            Event::Window(decode_window(raw, kind))
        }
        _ => return None,
    };

    Some(event)
}

fn decode_quit(raw: &SDL_Event) -> Quit {
    debug_assert_eq!(tag(raw), QUIT);

    // SAFETY: the tag says `quit` is the valid member
    let quit = unsafe { raw.quit };

    Quit {
        timestamp: quit.timestamp,
    }
}

fn decode_key(raw: &SDL_Event) -> Key {
    let tag = tag(raw);
    debug_assert!(tag == KEY_DOWN || tag == KEY_UP, "not a key event: {:#x}", tag);

    // SAFETY: the tag says `key` is the valid member
    let key = unsafe { raw.key };

    Key {
        action: if tag == KEY_DOWN {
            KeyAction::Down
        } else {
            KeyAction::Up
        },
        timestamp: key.timestamp,
        window_id: key.windowID,
        keyboard: key.which,
        scancode: key.scancode.0 as i32,
        keycode: key.key.0 as u32,
        modifiers: key.r#mod.0 as u16,
        raw: key.raw,
        repeat: key.repeat,
    }
}

fn decode_mouse_button(raw: &SDL_Event) -> MouseButtonEvent {
    let tag = tag(raw);
    debug_assert!(
        tag == MOUSE_BUTTON_DOWN || tag == MOUSE_BUTTON_UP,
        "not a mouse button event: {:#x}",
        tag
    );

    // SAFETY: the tag says `button` is the valid member
    let button = unsafe { raw.button };

    MouseButtonEvent {
        action: if tag == MOUSE_BUTTON_DOWN {
            ButtonAction::Down
        } else {
            ButtonAction::Up
        },
        timestamp: button.timestamp,
        window_id: button.windowID,
        mouse: button.which,
        button: button.button,
        clicks: button.clicks,
        x: button.x,
        y: button.y,
    }
}

fn decode_mouse_motion(raw: &SDL_Event) -> MouseMotion {
    debug_assert_eq!(tag(raw), MOUSE_MOTION);

    // SAFETY: the tag says `motion` is the valid member
    let motion = unsafe { raw.motion };

    MouseMotion {
        timestamp: motion.timestamp,
        window_id: motion.windowID,
        mouse: motion.which,
        state: ButtonMask(motion.state.0 as u32),
        x: motion.x,
        y: motion.y,
        xrel: motion.xrel,
        yrel: motion.yrel,
    }
}

fn decode_mouse_wheel(raw: &SDL_Event) -> MouseWheel {
    debug_assert_eq!(tag(raw), MOUSE_WHEEL);

    // SAFETY: the tag says `wheel` is the valid member
    let wheel = unsafe { raw.wheel };

    MouseWheel {
        timestamp: wheel.timestamp,
        window_id: wheel.windowID,
        mouse: wheel.which,
        x: wheel.x,
        y: wheel.y,
        // SDL only defines these two, anything else is treated as unflipped
        direction: ScrollDirection::from_i64(wheel.direction.0 as i64)
            .unwrap_or(ScrollDirection::Normal),
    }
}

fn decode_window(raw: &SDL_Event, kind: WindowKind) -> WindowEvent {
    debug_assert_eq!(tag(raw), kind.tag(), "window event decoded as {:?}", kind);

    // SAFETY: every tag in the window range uses the `window` member
    let window = unsafe { raw.window };

    let action = match kind {
        WindowKind::Shown => WindowAction::Shown,
        WindowKind::Hidden => WindowAction::Hidden,
        WindowKind::Exposed => WindowAction::Exposed,
        WindowKind::Moved => WindowAction::Moved {
            x: window.data1,
            y: window.data2,
        },
        WindowKind::Resized => WindowAction::Resized {
            width: window.data1,
            height: window.data2,
        },
    };

    WindowEvent {
        timestamp: window.timestamp,
        window_id: window.windowID,
        action,
    }
}
