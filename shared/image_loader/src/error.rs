//! Error types for image loading

use object_storage::StorageError;
use thiserror::Error;

/// Result type for loader operations
pub type LoaderResult<T> = Result<T, LoaderError>;

/// Errors that can occur while loading an image
#[derive(Error, Debug)]
pub enum LoaderError {
    /// Storage-layer failure while resolving a client or presigning
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The outbound HTTP fetch failed
    #[error("Fetch error: {0}")]
    Fetch(String),
}

impl From<reqwest::Error> for LoaderError {
    fn from(error: reqwest::Error) -> Self {
        Self::Fetch(error.to_string())
    }
}
