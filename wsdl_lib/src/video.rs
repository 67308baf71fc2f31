//! Window, renderer, texture and surface handles
//!
//! Ownership runs window → renderer → texture. A `Window` owns its `Renderer`, textures borrow
//! the `TextureCreator` they came from and a `TargetGuard` borrows both the renderer and the
//! target texture, so none of them can outlive what it depends on. Surfaces live in system
//! memory and stand on their own.

mod renderer;
mod surface;
mod texture;
mod window;

use sdl3::pixels::PixelFormat;
use sdl3::sys::pixels::SDL_PixelFormat;

pub use renderer::{Flip, Renderer, TargetGuard};
pub use surface::{ScaleMode, Surface};
pub use texture::{Texture, TextureAccess, TextureCreator};
pub use window::Window;

/// 32 bit ARGB, the format `Texture::update` expects pixels in
pub fn argb8888() -> PixelFormat {
    // SAFETY: a format SDL defines
    unsafe { PixelFormat::from_ll(SDL_PixelFormat::ARGB8888) }
}
