use thiserror::Error;

/// Errors raised by the renderer and its surfaces
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// A pixel or cell write fell outside the buffer. Nothing was written.
    #[error("pixel ({x}, {y}) is outside the {width}x{height} buffer")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    /// The buffer and the surface disagree on dimensions at flush time
    #[error("buffer is {buffer:?} but surface is {surface:?}")]
    SizeMismatch {
        buffer: (u32, u32),
        surface: (u32, u32),
    },

    /// Construction-time precondition: the surface is missing or not ready
    #[error("surface unavailable: {0}")]
    SurfaceUnavailable(String),

    /// The surface backend failed while presenting or filling
    #[error("surface error: {0}")]
    Surface(String),

    #[error("config error: {0}")]
    Config(String),
}
