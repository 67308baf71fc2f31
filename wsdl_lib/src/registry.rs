//! Window id lookup
//!
//! SDL tags window events with the numeric id it assigned to the window. The registry resolves
//! such an id back to the state shared by the live `Window` that owns it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use fnv::FnvHashMap;
use tracing::{debug, trace};
use crate::error::{WsdlError, WsdlResult};
use crate::event::{Event, WindowAction};

/// Identifier assigned by SDL when a window is created
pub type WindowId = u32;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Geometry {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// The part of a window that other threads and the event pump are allowed to see
#[derive(Debug)]
pub struct WindowState {
    id: WindowId,
    title: String,
    /// Set by `Window::open`, cleared by `Window::close`
    open: AtomicBool,
    /// Tracks the shown/hidden window events
    visible: AtomicBool,
    /// Set from any thread to ask the owner to close the window
    close_requested: AtomicBool,
    geometry: Mutex<Geometry>,
}

impl WindowState {
    pub fn new<T: Into<String>>(id: WindowId, title: T, width: u32, height: u32) -> WindowState {
        WindowState::at(
            id,
            title,
            Geometry {
                x: 0,
                y: 0,
                width: width as i32,
                height: height as i32,
            },
        )
    }

    /// State of a window already placed on the desktop
    pub fn at<T: Into<String>>(id: WindowId, title: T, geometry: Geometry) -> WindowState {
        WindowState {
            id,
            title: title.into(),
            open: AtomicBool::new(false),
            visible: AtomicBool::new(false),
            close_requested: AtomicBool::new(false),
            geometry: Mutex::new(geometry),
        }
    }

    pub fn id(&self) -> WindowId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::Acquire)
    }

    pub(crate) fn set_open(&self, open: bool) {
        self.open.store(open, Ordering::Release);
        if open {
            self.close_requested.store(false, Ordering::Release);
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible.load(Ordering::Acquire)
    }

    pub(crate) fn set_visible(&self, visible: bool) {
        self.visible.store(visible, Ordering::Release);
    }

    pub fn request_close(&self) {
        self.close_requested.store(true, Ordering::Release);
    }

    pub fn close_requested(&self) -> bool {
        self.close_requested.load(Ordering::Acquire)
    }

    pub fn geometry(&self) -> Geometry {
        *self.lock_geometry()
    }

    /// Fold a window event into the tracked state
    pub fn apply(&self, action: WindowAction) {
        match action {
            WindowAction::Shown => self.set_visible(true),
            WindowAction::Hidden => self.set_visible(false),
            WindowAction::Exposed => (),
            WindowAction::Moved { x, y } => {
                let mut geometry = self.lock_geometry();
                geometry.x = x;
                geometry.y = y;
            }
            WindowAction::Resized { width, height } => {
                let mut geometry = self.lock_geometry();
                geometry.width = width;
                geometry.height = height;
            }
        }
    }

    fn lock_geometry(&self) -> MutexGuard<'_, Geometry> {
        // Geometry is plain data, a panic while it was held cannot leave it half written
        self.geometry.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Map from SDL window id to the state of the live window with that id
///
/// Every `Window` inserts itself on construction and removes itself when dropped, so a lookup
/// only ever succeeds for a window that still exists.
#[derive(Debug, Default)]
pub struct WindowRegistry {
    windows: Mutex<FnvHashMap<WindowId, Arc<WindowState>>>,
}

impl WindowRegistry {
    pub fn new() -> WindowRegistry {
        WindowRegistry::default()
    }

    pub fn insert(&self, state: Arc<WindowState>) -> WsdlResult<()> {
        let id = state.id();
        let mut windows = self.lock();

        if windows.contains_key(&id) {
            return Err(WsdlError::DuplicateWindow(id));
        }

        windows.insert(id, state);
        debug!("Registered window {} ({} live)", id, windows.len());

        Ok(())
    }

    pub fn remove(&self, id: WindowId) -> Option<Arc<WindowState>> {
        let mut windows = self.lock();
        let removed = windows.remove(&id);

        if removed.is_some() {
            debug!("Unregistered window {} ({} live)", id, windows.len());
        }

        removed
    }

    pub fn get(&self, id: WindowId) -> Option<Arc<WindowState>> {
        self.lock().get(&id).cloned()
    }

    pub fn contains(&self, id: WindowId) -> bool {
        self.lock().contains_key(&id)
    }

    /// Find the window an event is addressed to, if it names one that is still alive
    pub fn resolve(&self, event: &Event) -> Option<Arc<WindowState>> {
        event.window_id().and_then(|id| self.get(id))
    }

    /// Update the addressed window's state from a window event. Returns false if the event is not
    /// a window event or the window is unknown.
    pub fn apply(&self, event: &Event) -> bool {
        let Event::Window(window_event) = event else {
            return false;
        };

        match self.get(window_event.window_id) {
            Some(state) => {
                state.apply(window_event.action);
                true
            }
            None => {
                trace!("Window event for unknown window {}", window_event.window_id);
                false
            }
        }
    }

    pub fn ids(&self) -> Vec<WindowId> {
        let mut ids: Vec<WindowId> = self.lock().keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, FnvHashMap<WindowId, Arc<WindowState>>> {
        self.windows.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use std::thread;
    use super::*;
    use crate::event::{Quit, WindowEvent};

    fn window_event(window_id: WindowId, action: WindowAction) -> Event {
        Event::Window(WindowEvent {
            timestamp: 0,
            window_id,
            action,
        })
    }

    #[test]
    fn lookup_follows_window_lifetime() {
        let registry = WindowRegistry::new();
        let state = Arc::new(WindowState::new(3, "main", 800, 600));

        registry.insert(Arc::clone(&state)).unwrap();

        let found = registry.get(3).unwrap();
        assert!(Arc::ptr_eq(&found, &state));
        assert!(registry.contains(3));

        let removed = registry.remove(3).unwrap();
        assert!(Arc::ptr_eq(&removed, &state));
        assert!(registry.get(3).is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn unknown_id_is_not_found() {
        let registry = WindowRegistry::new();

        assert!(registry.get(42).is_none());
        assert!(registry.remove(42).is_none());
    }

    #[test]
    fn placed_window_keeps_its_position() {
        let placed = Geometry {
            x: 112,
            y: 84,
            width: 800,
            height: 600,
        };
        let state = WindowState::at(5, "centred", placed);

        assert_eq!(state.geometry(), placed);

        state.apply(WindowAction::Resized {
            width: 640,
            height: 480,
        });
        assert_eq!((state.geometry().x, state.geometry().y), (112, 84));

        // Unplaced windows start at the origin
        let unplaced = WindowState::new(6, "unplaced", 10, 20);
        assert_eq!(
            unplaced.geometry(),
            Geometry {
                x: 0,
                y: 0,
                width: 10,
                height: 20,
            }
        );
    }

    #[test]
    fn duplicate_id_is_rejected() {
        let registry = WindowRegistry::new();

        registry.insert(Arc::new(WindowState::new(1, "a", 10, 10))).unwrap();

        match registry.insert(Arc::new(WindowState::new(1, "b", 10, 10))) {
            Err(WsdlError::DuplicateWindow(1)) => (),
            other => panic!("expected duplicate error, got {:?}", other),
        }

        // The first registration wins
        assert_eq!(registry.get(1).unwrap().title(), "a");
    }

    #[test]
    fn apply_updates_addressed_window() {
        let registry = WindowRegistry::new();
        let state = Arc::new(WindowState::new(7, "main", 800, 600));
        registry.insert(Arc::clone(&state)).unwrap();

        assert!(registry.apply(&window_event(7, WindowAction::Shown)));
        assert!(state.is_visible());

        assert!(registry.apply(&window_event(7, WindowAction::Moved { x: 100, y: 50 })));
        assert!(registry.apply(&window_event(7, WindowAction::Resized { width: 640, height: 480 })));
        assert_eq!(
            state.geometry(),
            Geometry {
                x: 100,
                y: 50,
                width: 640,
                height: 480
            }
        );

        assert!(registry.apply(&window_event(7, WindowAction::Hidden)));
        assert!(!state.is_visible());
    }

    #[test]
    fn apply_ignores_unknown_windows_and_other_events() {
        let registry = WindowRegistry::new();

        assert!(!registry.apply(&window_event(9, WindowAction::Shown)));
        assert!(!registry.apply(&Event::Quit(Quit { timestamp: 0 })));
    }

    #[test]
    fn resolve_uses_event_window_id() {
        let registry = WindowRegistry::new();
        registry.insert(Arc::new(WindowState::new(2, "main", 1, 1))).unwrap();

        assert_eq!(registry.resolve(&window_event(2, WindowAction::Exposed)).unwrap().id(), 2);
        assert!(registry.resolve(&window_event(5, WindowAction::Exposed)).is_none());
        assert!(registry.resolve(&Event::Quit(Quit { timestamp: 0 })).is_none());
    }

    #[test]
    fn close_request_is_cleared_by_reopening() {
        let state = WindowState::new(1, "main", 1, 1);

        state.set_open(true);
        state.request_close();
        assert!(state.close_requested());

        state.set_open(true);
        assert!(!state.close_requested());
    }

    #[test]
    fn concurrent_insert_and_remove() {
        let registry = Arc::new(WindowRegistry::new());

        let workers: Vec<_> = (0..4u32)
            .map(|worker| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || {
                    for i in 0..100u32 {
                        let id = worker * 1000 + i;
                        registry.insert(Arc::new(WindowState::new(id, "w", 1, 1))).unwrap();
                        assert_eq!(registry.get(id).unwrap().id(), id);
                        if i % 2 == 0 {
                            registry.remove(id).unwrap();
                        }
                    }
                })
            })
            .collect();

        for worker in workers {
            worker.join().unwrap();
        }

        assert_eq!(registry.len(), 200);
        assert!(registry.ids().iter().all(|id| id % 2 == 1));
    }
}
