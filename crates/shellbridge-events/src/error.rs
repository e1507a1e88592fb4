//! Error types for the event notifier.

/// Result type alias for this crate.
pub type Result<T> = std::result::Result<T, EventError>;

/// Errors that can occur when working with events.
#[derive(Debug, thiserror::Error)]
pub enum EventError {
    /// An event name outside the known set.
    #[error("unknown event name: {0}")]
    UnknownName(String),
}
