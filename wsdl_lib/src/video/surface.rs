use std::path::Path;
use std::ptr;
use sdl3::pixels::{Color, PixelFormat};
use sdl3::rect::Rect;
use sdl3::sys::rect::SDL_Rect;
use sdl3::sys::surface::{
    SDL_BlitSurfaceScaled, SDL_GetSurfaceAlphaMod, SDL_ScaleMode, SDL_SetSurfaceAlphaMod,
    SDL_SCALEMODE_LINEAR, SDL_SCALEMODE_NEAREST,
};
use tracing::warn;
use crate::error::{WsdlError, WsdlResult};

/// Sampling used by `Surface::blit_scaled`
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum ScaleMode {
    #[default]
    Nearest,
    Linear,
}

impl ScaleMode {
    fn raw(self) -> SDL_ScaleMode {
        match self {
            ScaleMode::Nearest => SDL_SCALEMODE_NEAREST,
            ScaleMode::Linear => SDL_SCALEMODE_LINEAR,
        }
    }
}

fn raw_rect(rect: Rect) -> SDL_Rect {
    SDL_Rect {
        x: rect.x(),
        y: rect.y(),
        w: rect.width() as i32,
        h: rect.height() as i32,
    }
}

/// Pixels in system memory
///
/// Independent of any window or renderer. Upload one with `TextureCreator::from_surface` to draw
/// it.
pub struct Surface {
    inner: sdl3::surface::Surface<'static>,
}

impl Surface {
    pub fn new(width: u32, height: u32, format: PixelFormat) -> WsdlResult<Surface> {
        let inner = sdl3::surface::Surface::new(width, height, format)
            .map_err(|e| WsdlError::SurfaceCreation(e.to_string()))?;

        Ok(Surface { inner })
    }

    /// Load an image. Only BMP files unless the `image` feature is enabled.
    pub fn load<P: AsRef<Path>>(path: P) -> WsdlResult<Surface> {
        let path = path.as_ref();

        #[cfg(feature = "image")]
        let loaded = {
            use sdl3::image::LoadSurface;
            sdl3::surface::Surface::from_file(path)
        };
        #[cfg(not(feature = "image"))]
        let loaded = sdl3::surface::Surface::load_bmp(path);

        let inner = loaded.map_err(|e| WsdlError::Load {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        Ok(Surface { inner })
    }

    pub fn width(&self) -> u32 {
        self.inner.width()
    }

    pub fn height(&self) -> u32 {
        self.inner.height()
    }

    /// Length of a row in bytes
    pub fn pitch(&self) -> u32 {
        self.inner.pitch()
    }

    pub fn format(&self) -> PixelFormat {
        // SAFETY: the surface is alive and SDL never leaves its format invalid
        unsafe { PixelFormat::from_ll((*self.inner.raw()).format) }
    }

    pub fn fill(&mut self, color: Color) -> WsdlResult<()> {
        self.inner
            .fill_rect(None, color)
            .map_err(|e| WsdlError::Native(e.to_string()))
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Color) -> WsdlResult<()> {
        self.inner
            .fill_rect(rect, color)
            .map_err(|e| WsdlError::Native(e.to_string()))
    }

    pub fn alpha(&self) -> u8 {
        let mut alpha = 0xff;

        // SAFETY: the surface is alive and `alpha` outlives the call
        if !unsafe { SDL_GetSurfaceAlphaMod(self.inner.raw(), &mut alpha) } {
            warn!("Failed to read surface alpha: {}", sdl3::get_error());
        }

        alpha
    }

    /// Set the alpha used when blitting. Returns false if SDL refused it.
    pub fn set_alpha(&mut self, alpha: u8) -> bool {
        // SAFETY: the surface is alive
        unsafe { SDL_SetSurfaceAlphaMod(self.inner.raw(), alpha) }
    }

    pub fn clip(&self) -> Option<Rect> {
        self.inner.clip_rect()
    }

    /// Restrict blits into this surface to `clip`, or lift the restriction with None. Returns
    /// false if the rectangle misses the surface entirely.
    pub fn set_clip(&mut self, clip: Option<Rect>) -> bool {
        self.inner.set_clip_rect(clip)
    }

    /// Copy the whole surface into `dest` at (0, 0)
    pub fn blit(&self, dest: &mut Surface) -> WsdlResult<()> {
        self.blit_rect(None, dest, None)
    }

    /// Copy the `src` part (all of it for None) into `dest` with its top left corner at `dst`
    /// ((0, 0) for None). No scaling, only the position of `dst` is used.
    pub fn blit_rect(
        &self,
        src: Option<Rect>,
        dest: &mut Surface,
        dst: Option<Rect>,
    ) -> WsdlResult<()> {
        self.inner
            .blit(src, &mut dest.inner, dst)
            .map(|_| ())
            .map_err(|e| WsdlError::Native(e.to_string()))
    }

    /// Copy the `src` part (all of it for None) stretched over `dst` (all of `dest` for None)
    pub fn blit_scaled(
        &self,
        src: Option<Rect>,
        dest: &mut Surface,
        dst: Option<Rect>,
        mode: ScaleMode,
    ) -> WsdlResult<()> {
        let src = src.map(raw_rect);
        let dst = dst.map(raw_rect);

        // SAFETY: both surfaces are alive, the rects live on the stack for the whole call
        let blitted = unsafe {
            SDL_BlitSurfaceScaled(
                self.inner.raw(),
                src.as_ref().map_or(ptr::null(), |r| r as *const SDL_Rect),
                dest.inner.raw(),
                dst.as_ref().map_or(ptr::null(), |r| r as *const SDL_Rect),
                mode.raw(),
            )
        };

        if blitted {
            Ok(())
        } else {
            Err(WsdlError::last_native())
        }
    }

    /// Read the pixel bytes, locking the surface if SDL needs it
    pub fn with_pixels<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&[u8]) -> R,
    {
        self.inner.with_lock(f)
    }

    pub fn with_pixels_mut<F, R>(&mut self, f: F) -> R
    where
        F: FnOnce(&mut [u8]) -> R,
    {
        self.inner.with_lock_mut(f)
    }

    pub(crate) fn inner(&self) -> &sdl3::surface::Surface<'static> {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::video::argb8888;

    fn first_pixel(surface: &Surface) -> u32 {
        pixel_at(surface, 0, 0)
    }

    fn pixel_at(surface: &Surface, x: usize, y: usize) -> u32 {
        let offset = y * surface.pitch() as usize + x * 4;
        surface.with_pixels(|bytes| {
            let px = &bytes[offset..offset + 4];
            u32::from_ne_bytes([px[0], px[1], px[2], px[3]])
        })
    }

    #[test]
    fn new_surface_has_requested_size() {
        let surface = Surface::new(16, 8, argb8888()).unwrap();

        assert_eq!(surface.width(), 16);
        assert_eq!(surface.height(), 8);
        assert!(surface.pitch() >= 16 * 4);
    }

    #[test]
    fn fill_writes_every_pixel() {
        let mut surface = Surface::new(4, 4, argb8888()).unwrap();

        surface.fill(Color::RGBA(0xff, 0x00, 0x00, 0xff)).unwrap();

        let pitch = surface.pitch() as usize;
        surface.with_pixels(|bytes| {
            for row in bytes.chunks(pitch).take(4) {
                for px in row[..16].chunks(4) {
                    let px = u32::from_ne_bytes([px[0], px[1], px[2], px[3]]);
                    assert_eq!(px, 0xffff_0000);
                }
            }
        });
    }

    #[test]
    fn alpha_round_trips() {
        let mut surface = Surface::new(2, 2, argb8888()).unwrap();

        assert_eq!(surface.alpha(), 0xff);
        assert!(surface.set_alpha(0x40));
        assert_eq!(surface.alpha(), 0x40);
    }

    #[test]
    fn blit_copies_pixels() {
        let mut src = Surface::new(2, 2, argb8888()).unwrap();
        let mut dst = Surface::new(2, 2, argb8888()).unwrap();

        src.fill(Color::RGBA(0x00, 0x00, 0xff, 0xff)).unwrap();
        dst.fill(Color::RGBA(0x00, 0x00, 0x00, 0xff)).unwrap();

        src.blit(&mut dst).unwrap();

        assert_eq!(first_pixel(&dst), 0xff00_00ff);
    }

    #[test]
    fn blit_rect_places_a_region() {
        let mut src = Surface::new(4, 4, argb8888()).unwrap();
        let mut dst = Surface::new(4, 4, argb8888()).unwrap();

        src.fill(Color::RGBA(0x00, 0x00, 0x00, 0xff)).unwrap();
        src.fill_rect(Rect::new(2, 2, 2, 2), Color::RGBA(0x00, 0xff, 0x00, 0xff))
            .unwrap();
        dst.fill(Color::RGBA(0x00, 0x00, 0x00, 0xff)).unwrap();

        // The green corner of the source lands in the top left of the destination
        src.blit_rect(Some(Rect::new(2, 2, 2, 2)), &mut dst, Some(Rect::new(0, 0, 2, 2)))
            .unwrap();

        assert_eq!(pixel_at(&dst, 0, 0), 0xff00_ff00);
        assert_eq!(pixel_at(&dst, 1, 1), 0xff00_ff00);
        assert_eq!(pixel_at(&dst, 2, 2), 0xff00_0000);
        assert_eq!(pixel_at(&dst, 3, 0), 0xff00_0000);
    }

    #[test]
    fn blit_scaled_stretches_over_destination() {
        let mut src = Surface::new(1, 1, argb8888()).unwrap();
        let mut dst = Surface::new(4, 4, argb8888()).unwrap();

        src.fill(Color::RGBA(0xff, 0x00, 0x00, 0xff)).unwrap();
        dst.fill(Color::RGBA(0x00, 0x00, 0x00, 0xff)).unwrap();

        src.blit_scaled(None, &mut dst, Some(Rect::new(0, 0, 4, 2)), ScaleMode::Nearest)
            .unwrap();

        for x in 0..4 {
            assert_eq!(pixel_at(&dst, x, 0), 0xffff_0000);
            assert_eq!(pixel_at(&dst, x, 1), 0xffff_0000);
            assert_eq!(pixel_at(&dst, x, 3), 0xff00_0000);
        }
    }

    #[test]
    fn clip_limits_fill_target() {
        let mut surface = Surface::new(8, 8, argb8888()).unwrap();

        assert!(surface.set_clip(Some(Rect::new(2, 2, 4, 4))));
        assert_eq!(surface.clip(), Some(Rect::new(2, 2, 4, 4)));

        assert!(surface.set_clip(None));
        assert_eq!(surface.clip(), Some(Rect::new(0, 0, 8, 8)));
    }

    #[test]
    fn moved_surface_keeps_its_pixels() {
        let mut surface = Surface::new(3, 3, argb8888()).unwrap();
        surface.fill(Color::RGBA(0x12, 0x34, 0x56, 0xff)).unwrap();

        let moved = vec![surface];

        assert_eq!(moved[0].width(), 3);
        assert_eq!(first_pixel(&moved[0]), 0xff12_3456);
    }

    #[test]
    fn missing_file_is_a_load_error() {
        match Surface::load("does/not/exist.bmp") {
            Err(WsdlError::Load { path, .. }) => assert_eq!(path, "does/not/exist.bmp"),
            Err(e) => panic!("unexpected error {}", e),
            Ok(_) => panic!("loaded a file that doesn't exist"),
        }
    }
}
