use thiserror::Error;

/// Result type for projection operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while rendering a view
#[derive(Error, Debug)]
pub enum Error {
    #[error("Element {0} has no bounding box, cannot frame a camera")]
    MissingBoundingBox(u64),

    #[error("Degenerate camera frame: {0}")]
    DegenerateFrame(String),
}
