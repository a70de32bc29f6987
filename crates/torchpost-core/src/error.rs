//! Error handling for torchpost core types
//!
//! Covers failures while reading or decoding a toolpath event stream.
//! Post-processing failures live in the `torchpost-post` crate.
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for the core crate
#[derive(Error, Debug)]
pub enum Error {
    /// An event in the stream is malformed
    #[error("Invalid event at index {index}: {reason}")]
    InvalidEvent {
        /// Position of the event in the stream.
        index: usize,
        /// Why the event was rejected.
        reason: String,
    },

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The event stream is not valid JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this error was raised by event validation
    pub fn is_event_error(&self) -> bool {
        matches!(self, Error::InvalidEvent { .. })
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidEvent {
            index: 4,
            reason: "feed must be finite".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid event at index 4: feed must be finite");
        assert!(err.is_event_error());

        let err = Error::other("boom");
        assert_eq!(err.to_string(), "boom");
        assert!(!err.is_event_error());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing job");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
