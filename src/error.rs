use alloc::string::String;

use thiserror::Error;

/// Errors reported by the engine and its components.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    #[error("viewport extent must be positive")]
    InvalidViewportExtent,

    #[error("estimated item size must be positive")]
    InvalidEstimatedSize,

    #[error("fixed item size must be positive")]
    InvalidItemSize,

    /// The size provider returned `0`, which would make two items share an offset.
    #[error("size provider returned a zero size for item {index}")]
    ZeroSize { index: usize },

    #[error("size provider failed for item {index}: {source}")]
    SizeProvider {
        index: usize,
        #[source]
        source: SizeError,
    },

    #[error("the list has no items")]
    Empty,
}

pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Failure reported by a size provider.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct SizeError {
    message: String,
}

impl SizeError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
