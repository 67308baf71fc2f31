use std::path::Path;
use sdl3::pixels::PixelFormat;
use sdl3::rect::Rect;
use sdl3::sys::render::{SDL_GetTextureAlphaMod, SDL_SetTextureAlphaMod, SDL_Texture};
use sdl3::video::WindowContext;
use tracing::warn;
use crate::error::{WsdlError, WsdlResult};
use super::Surface;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TextureAccess {
    /// Rarely changes, updated with `Texture::update`
    Static,
    /// Changes frequently, can be locked for writing
    Streaming,
    /// Can be bound as a render target
    Target,
}

/// Creates textures for one renderer
///
/// Keeps the renderer's context alive, and every texture it creates borrows it, so a texture can
/// never outlive the renderer that owns its pixels.
pub struct TextureCreator {
    creator: sdl3::render::TextureCreator<WindowContext>,
}

impl TextureCreator {
    pub(crate) fn new(creator: sdl3::render::TextureCreator<WindowContext>) -> TextureCreator {
        TextureCreator { creator }
    }

    pub fn create(
        &self,
        format: PixelFormat,
        access: TextureAccess,
        width: u32,
        height: u32,
    ) -> WsdlResult<Texture<'_>> {
        let inner = match access {
            TextureAccess::Static => self.creator.create_texture_static(format, width, height),
            TextureAccess::Streaming => {
                self.creator.create_texture_streaming(format, width, height)
            }
            TextureAccess::Target => self.creator.create_texture_target(format, width, height),
        }
        .map_err(|e| WsdlError::TextureCreation(e.to_string()))?;

        Ok(Texture {
            inner,
            format,
            access,
            width,
            height,
        })
    }

    pub fn create_static(
        &self,
        format: PixelFormat,
        width: u32,
        height: u32,
    ) -> WsdlResult<Texture<'_>> {
        self.create(format, TextureAccess::Static, width, height)
    }

    pub fn create_streaming(
        &self,
        format: PixelFormat,
        width: u32,
        height: u32,
    ) -> WsdlResult<Texture<'_>> {
        self.create(format, TextureAccess::Streaming, width, height)
    }

    pub fn create_target(
        &self,
        format: PixelFormat,
        width: u32,
        height: u32,
    ) -> WsdlResult<Texture<'_>> {
        self.create(format, TextureAccess::Target, width, height)
    }

    /// Upload a surface into a static texture. SDL may convert the pixels to a format the
    /// renderer supports, `Texture::format` reports the one it picked.
    pub fn from_surface(&self, surface: &Surface) -> WsdlResult<Texture<'_>> {
        let inner = self
            .creator
            .create_texture_from_surface(surface.inner())
            .map_err(|e| WsdlError::TextureCreation(e.to_string()))?;

        // SAFETY: the texture was just created and SDL keeps its public fields current
        let (format, width, height) = unsafe {
            let native = &*inner.raw();
            (PixelFormat::from_ll(native.format), native.w as u32, native.h as u32)
        };

        Ok(Texture {
            inner,
            format,
            access: TextureAccess::Static,
            width,
            height,
        })
    }

    /// Load an image file into a static texture
    pub fn load<P: AsRef<Path>>(&self, path: P) -> WsdlResult<Texture<'_>> {
        let surface = Surface::load(path)?;

        self.from_surface(&surface)
    }
}

/// Pixels in video memory
pub struct Texture<'c> {
    inner: sdl3::render::Texture<'c>,
    format: PixelFormat,
    access: TextureAccess,
    width: u32,
    height: u32,
}

impl<'c> Texture<'c> {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn access(&self) -> TextureAccess {
        self.access
    }

    pub fn alpha(&self) -> u8 {
        let mut alpha = 0xff;

        // SAFETY: the texture is alive and `alpha` outlives the call
        if !unsafe { SDL_GetTextureAlphaMod(self.raw(), &mut alpha) } {
            warn!("Failed to read texture alpha: {}", sdl3::get_error());
        }

        alpha
    }

    /// Set the alpha modulation. Returns false if the renderer doesn't support it.
    pub fn set_alpha(&mut self, alpha: u8) -> bool {
        // SAFETY: the texture is alive
        unsafe { SDL_SetTextureAlphaMod(self.raw(), alpha) }
    }

    /// Replace the whole texture with 32 bit pixels, row by row. Only for 4 byte formats.
    pub fn update(&mut self, pixels: &[u32]) -> WsdlResult<()> {
        let pitch = upload_pitch(
            self.format.byte_size_per_pixel(),
            self.width,
            self.height,
            pixels.len(),
        )?;
        let bytes: &[u8] = bytemuck::cast_slice(pixels);

        self.inner
            .update(None, bytes, pitch)
            .map_err(|e| WsdlError::Native(e.to_string()))
    }

    /// Lock a streaming texture for writing. `f` gets the write-only pixel bytes and the pitch.
    pub fn with_lock<F, R>(&mut self, f: F) -> WsdlResult<R>
    where
        F: FnOnce(&mut [u8], usize) -> R,
    {
        self.lock(None, f)
    }

    /// Lock only `region` of a streaming texture. Row 0 of the bytes `f` gets is the top row of
    /// the region, the pitch is still that of the whole texture.
    pub fn with_lock_rect<F, R>(&mut self, region: Rect, f: F) -> WsdlResult<R>
    where
        F: FnOnce(&mut [u8], usize) -> R,
    {
        if !fits(region, self.width, self.height) {
            return Err(WsdlError::OutOfBounds {
                region,
                width: self.width,
                height: self.height,
            });
        }

        self.lock(Some(region), f)
    }

    fn lock<F, R>(&mut self, region: Option<Rect>, f: F) -> WsdlResult<R>
    where
        F: FnOnce(&mut [u8], usize) -> R,
    {
        if self.access != TextureAccess::Streaming {
            return Err(WsdlError::NotStreaming(self.access));
        }

        self.inner
            .with_lock(region, f)
            .map_err(|e| WsdlError::Native(e.to_string()))
    }

    pub(crate) fn inner(&self) -> &sdl3::render::Texture<'c> {
        &self.inner
    }

    pub(crate) fn raw(&self) -> *mut SDL_Texture {
        self.inner.raw()
    }
}

/// Row length in bytes for uploading `count` 32 bit pixels over a whole `width` x `height`
/// texture whose pixels are `bytes_per_pixel` wide
fn upload_pitch(
    bytes_per_pixel: usize,
    width: u32,
    height: u32,
    count: usize,
) -> WsdlResult<usize> {
    if bytes_per_pixel != size_of::<u32>() {
        return Err(WsdlError::UnsupportedFormat { bytes_per_pixel });
    }

    let expected = width as usize * height as usize;
    if count != expected {
        return Err(WsdlError::PixelCount {
            expected,
            got: count,
        });
    }

    Ok(width as usize * bytes_per_pixel)
}

fn fits(region: Rect, width: u32, height: u32) -> bool {
    region.x() >= 0
        && region.y() >= 0
        && region.x() as u64 + region.width() as u64 <= width as u64
        && region.y() as u64 + region.height() as u64 <= height as u64
}
