use std::sync::Arc;
use tracing::debug;
use crate::config::WindowConfig;
use crate::context::Context;
use crate::error::{WsdlError, WsdlResult};
use crate::registry::{Geometry, WindowId, WindowRegistry, WindowState};
use super::{Renderer, TextureCreator};

/// A native window and the renderer drawing into it
///
/// The window is created hidden, `open` shows it. It registers itself in the context's registry
/// under its SDL id for as long as it lives.
pub struct Window {
    state: Arc<WindowState>,
    registry: Arc<WindowRegistry>,
    // Dropped last: the renderer owns the native window and releases it after the renderer
    renderer: Renderer,
}

impl Window {
    pub fn new(context: &Context, config: &WindowConfig) -> WsdlResult<Window> {
        context.owner().assert_current();

        let mut builder = context.video().window(&config.title, config.width, config.height);
        builder.position_centered().hidden();
        if config.resizable {
            builder.resizable();
        }

        let window = builder
            .build()
            .map_err(|e| WsdlError::WindowCreation(e.to_string()))?;

        let id = window.id();
        let (x, y) = window.position();
        let renderer = Renderer::new(window)?;

        let state = Arc::new(WindowState::at(
            id,
            config.title.clone(),
            Geometry {
                x,
                y,
                width: config.width as i32,
                height: config.height as i32,
            },
        ));
        context.registry().insert(Arc::clone(&state))?;

        debug!(
            "Created window {} \"{}\" ({}x{})",
            id, config.title, config.width, config.height
        );

        Ok(Window {
            state,
            registry: Arc::clone(context.registry()),
            renderer,
        })
    }

    pub fn id(&self) -> WindowId {
        self.state.id()
    }

    pub fn state(&self) -> &Arc<WindowState> {
        &self.state
    }

    /// Show the window and mark it open
    pub fn open(&mut self) {
        self.show();
        self.state.set_open(true);
    }

    /// Hide the window and mark it closed
    pub fn close(&mut self) {
        self.hide();
        self.state.set_open(false);
    }

    /// False once closed, or once any thread asked for it to close
    pub fn is_open(&self) -> bool {
        self.state.is_open() && !self.state.close_requested()
    }

    pub fn is_visible(&self) -> bool {
        self.state.is_visible()
    }

    pub fn show(&mut self) {
        self.renderer.window_mut().show();
        self.state.set_visible(true);
    }

    pub fn hide(&mut self) {
        self.renderer.window_mut().hide();
        self.state.set_visible(false);
    }

    pub fn raise(&mut self) {
        self.renderer.window_mut().raise();
    }

    /// Position of the top left corner on the desktop
    pub fn position(&self) -> (i32, i32) {
        self.renderer.window().position()
    }

    pub fn size(&self) -> (u32, u32) {
        self.renderer.window().size()
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut Renderer {
        &mut self.renderer
    }

    pub fn texture_creator(&self) -> TextureCreator {
        self.renderer.texture_creator()
    }

    pub fn clear(&mut self) {
        self.renderer.clear();
    }

    pub fn present(&mut self) {
        self.renderer.present();
    }
}

impl Drop for Window {
    fn drop(&mut self) {
        // Unregister first so nothing resolves the id while the native window goes away
        self.registry.remove(self.state.id());

        debug!("Destroying window {}", self.state.id());
    }
}
