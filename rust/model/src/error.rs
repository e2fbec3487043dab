use thiserror::Error;

/// Result type for model operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading the element data model
#[derive(Error, Debug)]
pub enum Error {
    #[error("Malformed mesh: {0}")]
    MalformedMesh(String),
}
