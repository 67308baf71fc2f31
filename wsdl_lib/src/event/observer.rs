use super::{Key, MouseButtonEvent, MouseMotion, MouseWheel, Quit, WindowEvent};

/// Receives decoded events through `Event::dispatch`. Every hook defaults to doing nothing so
/// implementors only write the ones they care about.
pub trait Observer {
    fn on_quit(&mut self, _event: &Quit) {}
    fn on_key(&mut self, _event: &Key) {}
    fn on_mouse_button(&mut self, _event: &MouseButtonEvent) {}
    fn on_mouse_motion(&mut self, _event: &MouseMotion) {}
    fn on_mouse_wheel(&mut self, _event: &MouseWheel) {}
    fn on_window(&mut self, _event: &WindowEvent) {}
}
