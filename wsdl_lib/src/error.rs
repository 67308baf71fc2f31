use sdl3::rect::Rect;
use thiserror::Error;
use crate::registry::WindowId;
use crate::video::TextureAccess;

pub type WsdlResult<T> = ::std::result::Result<T, WsdlError>;

#[derive(Error, Debug)]
pub enum WsdlError {
    #[error("SDL initialization failed: {0}")]
    Init(String),
    #[error("Failed to create window: {0}")]
    WindowCreation(String),
    #[error("Failed to create renderer: {0}")]
    RendererCreation(String),
    #[error("Failed to create texture: {0}")]
    TextureCreation(String),
    #[error("Failed to create surface: {0}")]
    SurfaceCreation(String),
    #[error("Failed to load image {path}: {reason}")]
    Load {
        path: String,
        reason: String,
    },
    #[error("Window {0} is already registered")]
    DuplicateWindow(WindowId),
    #[error("Texture cannot be used as a render target (access: {0:?})")]
    NotATarget(TextureAccess),
    #[error("Texture cannot be locked (access: {0:?})")]
    NotStreaming(TextureAccess),
    #[error("Texture update needs a 4 byte pixel format, this one has {bytes_per_pixel}")]
    UnsupportedFormat {
        bytes_per_pixel: usize,
    },
    #[error("Region {region:?} does not fit in a {width}x{height} texture")]
    OutOfBounds {
        region: Rect,
        width: u32,
        height: u32,
    },
    #[error("Expected {expected} pixels, got {got}")]
    PixelCount {
        expected: usize,
        got: usize,
    },
    #[error("SDL call failed: {0}")]
    Native(String),
}

impl WsdlError {
    /// Wrap the last error reported by SDL
    pub(crate) fn last_native() -> WsdlError {
        WsdlError::Native(sdl3::get_error())
    }
}
