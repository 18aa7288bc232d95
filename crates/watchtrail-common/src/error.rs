//! Common error types used throughout watchtrail.
//!
//! Storage failures collapse into a single [`Error::Storage`] kind; every
//! backend-specific detail is carried in its message.

/// Common error type for watchtrail.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A remote storage operation failed (network, backend, or decoding).
    #[error("Storage error: {0}")]
    Storage(String),

    /// A watch segment was rejected because its bounds are not a valid interval.
    #[error("Invalid segment: [{start}, {end}]")]
    InvalidSegment { start: f64, end: f64 },

    /// Invalid input was provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A value could not be serialized or deserialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a new Storage error.
    pub fn storage<S: Into<String>>(msg: S) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a new InvalidInput error.
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a new InvalidSegment error.
    pub fn invalid_segment(start: f64, end: f64) -> Self {
        Self::InvalidSegment { start, end }
    }

    /// Whether this error came from the storage boundary.
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage(_))
    }
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
