use thiserror::Error;

/// Result type for context resolution
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during context resolution
#[derive(Error, Debug)]
pub enum Error {
    #[error("Element {0} has no bounding box")]
    MissingBoundingBox(u64),

    #[error("Element {0} is not a {1}")]
    WrongClass(u64, &'static str),

    #[error(transparent)]
    Model(#[from] plan2d_model::Error),
}
