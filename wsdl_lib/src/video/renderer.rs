use std::ops::{Deref, DerefMut};
use std::ptr;
use sdl3::pixels::Color;
use sdl3::rect::{FPoint, FRect, Rect};
use sdl3::render::WindowCanvas;
use sdl3::sys::rect::{SDL_FPoint, SDL_FRect};
use sdl3::sys::render::{SDL_CreateRenderer, SDL_RenderTextureRotated, SDL_SetRenderTarget};
use sdl3::sys::surface::{SDL_FlipMode, SDL_FLIP_HORIZONTAL, SDL_FLIP_NONE, SDL_FLIP_VERTICAL};
use tracing::warn;
use crate::error::{WsdlError, WsdlResult};
use super::{Texture, TextureAccess, TextureCreator};

/// Hardware renderer of a window
///
/// Owned by its `Window`. Draws to the window unless bound to a target texture with
/// `bind_target`.
pub struct Renderer {
    canvas: WindowCanvas,
}

impl Renderer {
    /// Create the renderer for `window`. The window is released again if that fails.
    pub(crate) fn new(window: sdl3::video::Window) -> WsdlResult<Renderer> {
        // SAFETY: the window is alive, a null name lets SDL pick the driver
        let raw = unsafe { SDL_CreateRenderer(window.raw(), ptr::null()) };
        if raw.is_null() {
            return Err(WsdlError::RendererCreation(sdl3::get_error()));
        }

        // SAFETY: `raw` was just created for this window and nothing else owns it
        let canvas = unsafe { WindowCanvas::from_window_and_renderer(window, raw) };

        Ok(Renderer { canvas })
    }

    pub(crate) fn window(&self) -> &sdl3::video::Window {
        self.canvas.window()
    }

    pub(crate) fn window_mut(&mut self) -> &mut sdl3::video::Window {
        self.canvas.window_mut()
    }

    pub fn texture_creator(&self) -> TextureCreator {
        TextureCreator::new(self.canvas.texture_creator())
    }

    pub fn clear(&mut self) {
        self.canvas.clear();
    }

    pub fn present(&mut self) {
        self.canvas.present();
    }

    pub fn set_color(&mut self, color: Color) {
        self.canvas.set_draw_color(color);
    }

    pub fn color(&self) -> Color {
        self.canvas.draw_color()
    }

    /// Fill the whole target with the draw color
    pub fn fill(&mut self) -> WsdlResult<()> {
        self.canvas
            .fill_rect(None)
            .map_err(|e| WsdlError::Native(e.to_string()))
    }

    pub fn viewport(&self) -> Rect {
        self.canvas.viewport()
    }

    pub fn set_viewport(&mut self, viewport: Rect) {
        self.canvas.set_viewport(viewport);
    }

    pub fn reset_viewport(&mut self) {
        self.canvas.set_viewport(None);
    }

    /// Stretch the whole texture over the whole target
    pub fn copy(&mut self, texture: &Texture) -> WsdlResult<()> {
        self.canvas
            .copy(texture.inner(), None, None)
            .map_err(|e| WsdlError::Native(e.to_string()))
    }

    /// Copy the `src` part of the texture (all of it for None) onto `dst` (the whole target for
    /// None)
    pub fn copy_rect(
        &mut self,
        texture: &Texture,
        src: Option<FRect>,
        dst: Option<FRect>,
    ) -> WsdlResult<()> {
        self.canvas
            .copy(texture.inner(), src, dst)
            .map_err(|e| WsdlError::Native(e.to_string()))
    }

    /// Like `copy_rect`, rotated clockwise by `angle` degrees around `center` and then flipped.
    /// The rotation centre is relative to `dst` and defaults to its middle.
    pub fn copy_ex(
        &mut self,
        texture: &Texture,
        src: Option<FRect>,
        dst: Option<FRect>,
        angle: f64,
        center: Option<FPoint>,
        flip: Flip,
    ) -> WsdlResult<()> {
        let src = src.map(raw_rect);
        let dst = dst.map(raw_rect);
        let center = center.map(|c| SDL_FPoint { x: c.x(), y: c.y() });

        // SAFETY: both handles are alive and the rects live on the stack for the whole call
        let copied = unsafe {
            SDL_RenderTextureRotated(
                self.canvas.raw(),
                texture.raw(),
                src.as_ref().map_or(ptr::null(), |r| r as *const SDL_FRect),
                dst.as_ref().map_or(ptr::null(), |r| r as *const SDL_FRect),
                angle,
                center.as_ref().map_or(ptr::null(), |c| c as *const SDL_FPoint),
                flip.raw(),
            )
        };

        if copied {
            Ok(())
        } else {
            Err(WsdlError::last_native())
        }
    }

    /// Draw into `texture` instead of the window until the guard is dropped
    ///
    /// The texture stays owned by the caller, the guard only borrows it.
    pub fn bind_target<'r>(
        &'r mut self,
        texture: &'r mut Texture<'_>,
    ) -> WsdlResult<TargetGuard<'r>> {
        if texture.access() != TextureAccess::Target {
            return Err(WsdlError::NotATarget(texture.access()));
        }

        // SAFETY: both handles are alive, the returned guard borrows them until the target is
        // reset
        if !unsafe { SDL_SetRenderTarget(self.canvas.raw(), texture.raw()) } {
            return Err(WsdlError::last_native());
        }

        Ok(TargetGuard { renderer: self })
    }

    /// Go back to drawing into the window. Does nothing if no target is bound.
    pub fn reset_target(&mut self) -> WsdlResult<()> {
        // SAFETY: a null texture selects the default target
        if unsafe { SDL_SetRenderTarget(self.canvas.raw(), ptr::null_mut()) } {
            Ok(())
        } else {
            Err(WsdlError::last_native())
        }
    }
}

/// Mirroring applied by `Renderer::copy_ex`
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Flip {
    #[default]
    None,
    Horizontal,
    Vertical,
    Both,
}

impl Flip {
    fn raw(self) -> SDL_FlipMode {
        match self {
            Flip::None => SDL_FLIP_NONE,
            Flip::Horizontal => SDL_FLIP_HORIZONTAL,
            Flip::Vertical => SDL_FLIP_VERTICAL,
            Flip::Both => SDL_FlipMode(SDL_FLIP_HORIZONTAL.0 | SDL_FLIP_VERTICAL.0),
        }
    }
}

fn raw_rect(rect: FRect) -> SDL_FRect {
    SDL_FRect {
        x: rect.x(),
        y: rect.y(),
        w: rect.width(),
        h: rect.height(),
    }
}

/// A renderer bound to a target texture
///
/// Derefs to the renderer so drawing goes into the texture. Dropping it restores the window as
/// the target.
pub struct TargetGuard<'r> {
    renderer: &'r mut Renderer,
}

impl Deref for TargetGuard<'_> {
    type Target = Renderer;
    fn deref(&self) -> &Renderer {
        self.renderer
    }
}

impl DerefMut for TargetGuard<'_> {
    fn deref_mut(&mut self) -> &mut Renderer {
        self.renderer
    }
}

impl Drop for TargetGuard<'_> {
    fn drop(&mut self) {
        if let Err(e) = self.renderer.reset_target() {
            warn!("Failed to restore the default render target: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flip_maps_to_sdl_modes() {
        assert_eq!(Flip::default(), Flip::None);
        assert_eq!(Flip::None.raw(), SDL_FLIP_NONE);
        assert_eq!(Flip::Horizontal.raw(), SDL_FLIP_HORIZONTAL);
        assert_eq!(Flip::Vertical.raw(), SDL_FLIP_VERTICAL);
        assert_eq!(Flip::Both.raw().0, SDL_FLIP_HORIZONTAL.0 | SDL_FLIP_VERTICAL.0);
    }

    #[test]
    fn rects_keep_their_placement() {
        let rect = raw_rect(FRect::new(1.5, 2.0, 30.0, 40.25));

        assert_eq!((rect.x, rect.y, rect.w, rect.h), (1.5, 2.0, 30.0, 40.25));
    }
}
