use std::ops::Deref;
use std::sync::Arc;
use std::thread::{self, ThreadId};
use tracing::{debug, warn};
use crate::config::VideoConfig;
use crate::error::{WsdlError, WsdlResult};
use crate::event::EventPump;
use crate::registry::WindowRegistry;

/// The thread SDL was initialized on
///
/// SDL wants window creation, event polling and rendering to happen on the thread that brought
/// up the video subsystem. The SDL handles are `!Send` so they can't leave that thread, this
/// catches the remaining ways in (calls routed through shared state).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct OwnerThread {
    id: ThreadId,
}

impl OwnerThread {
    pub fn current() -> OwnerThread {
        OwnerThread {
            id: thread::current().id(),
        }
    }

    pub fn is_current(&self) -> bool {
        thread::current().id() == self.id
    }

    pub fn assert_current(&self) {
        assert!(
            self.is_current(),
            "SDL video and event calls must be made on the thread that created the context"
        );
    }
}

/// Initialized SDL with its video subsystem and the registry of live windows
pub struct Context {
    ctx: sdl3::Sdl,
    video: sdl3::VideoSubsystem,
    registry: Arc<WindowRegistry>,
    owner: OwnerThread,
}

impl Context {
    pub fn new() -> WsdlResult<Context> {
        Context::with_config(&VideoConfig::default())
    }

    pub fn with_config(config: &VideoConfig) -> WsdlResult<Context> {
        if let Some(driver) = config.driver.as_deref() {
            if !sdl3::hint::set("SDL_VIDEO_DRIVER", driver) {
                warn!("Could not request video driver {}", driver);
            }
        }

        let ctx = sdl3::init().map_err(|e| WsdlError::Init(e.to_string()))?;
        let video = ctx.video().map_err(|e| WsdlError::Init(e.to_string()))?;

        debug!("Initialized SDL video");

        Ok(Context {
            ctx,
            video,
            registry: Arc::new(WindowRegistry::new()),
            owner: OwnerThread::current(),
        })
    }

    pub fn sdl(&self) -> &sdl3::Sdl {
        &self.ctx
    }

    pub fn video(&self) -> &sdl3::VideoSubsystem {
        &self.video
    }

    pub fn registry(&self) -> &Arc<WindowRegistry> {
        &self.registry
    }

    pub fn owner(&self) -> OwnerThread {
        self.owner
    }

    pub fn event_pump(&self) -> WsdlResult<EventPump> {
        self.owner.assert_current();
        EventPump::new(self)
    }
}

impl Drop for Context {
    fn drop(&mut self) {
        if !self.registry.is_empty() {
            // The windows keep the video subsystem alive on their own
            debug!("Dropping SDL context with {} live window(s)", self.registry.len());
        }
    }
}

impl Deref for Context {
    type Target = sdl3::Sdl;
    fn deref(&self) -> &Self::Target {
        &self.ctx
    }
}
