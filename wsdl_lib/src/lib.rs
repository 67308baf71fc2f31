//! Owned SDL handles and typed events
//!
//! Windows own their renderer, textures borrow the context that created them, and native event
//! records are decoded into a closed `Event` enum instead of being read as raw C unions.

mod context;
pub mod config;
pub mod error;
pub mod event;
pub mod registry;
pub mod video;

pub use context::{Context, OwnerThread};
pub use error::{WsdlError, WsdlResult};
pub use event::{Event, EventPump, Observer};
pub use registry::{Geometry, WindowId, WindowRegistry, WindowState};
pub use video::{
    Flip, Renderer, ScaleMode, Surface, TargetGuard, Texture, TextureAccess, TextureCreator, Window,
};

pub use sdl3::pixels::{Color, PixelFormat};
pub use sdl3::rect::{FPoint, FRect, Rect};
