use thiserror::Error;

/// Result type for drawing composition
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while composing a sheet
#[derive(Error, Debug)]
pub enum Error {
    #[error("Projection failed: {0}")]
    Projection(#[from] plan2d_projection::Error),

    #[error("Canvas too small: {0}x{1} with margin {2}")]
    CanvasTooSmall(u32, u32, f64),

    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}
