//! Error types for transport control

use thiserror::Error;

/// Transport errors
///
/// Missing sinks and out-of-range input are not errors: the controller
/// treats the former as a no-op and saturates the latter.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransportError {
    /// The audio sink refused a command (play, pause, listener registration)
    #[error("Audio sink error: {0}")]
    Sink(String),

    /// Invalid or unreadable player configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for transport operations
pub type Result<T> = std::result::Result<T, TransportError>;
