use thiserror::Error;

pub type ComposeResult<T> = Result<T, ComposeError>;

/// Everything that can go wrong while composing (or saving) a backdrop.
///
/// None of these are retried. A failed call produces no canvas at all.
#[derive(Error, Debug)]
pub enum ComposeError {
    #[error("invalid canvas dimensions {width}x{height}: both sides must be positive")]
    InvalidDimension { width: u32, height: u32 },

    #[error("invalid count range {min}..={max}: min must not exceed max")]
    InvalidRange { min: u32, max: u32 },

    #[error("invalid size scale {0}: must be finite and positive")]
    InvalidScale(f64),

    #[error("unable to allocate a {width}x{height} canvas")]
    AllocationFailure { width: u32, height: u32 },

    #[error("palette has no colors")]
    EmptyPalette,

    #[error("palette error: {0}")]
    Palette(String),

    #[error("config error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Image(#[from] image::ImageError),
}

impl ComposeError {
    pub fn palette(msg: impl Into<String>) -> Self {
        Self::Palette(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
