//! Error types for sink delegation.

use thiserror::Error;

/// Errors surfaced by a [`LogSink`](crate::LogSink) while handling a record.
///
/// Decorators never wrap, retry, or swallow these; whatever the innermost
/// sink returns reaches the emitting caller unchanged.
#[derive(Debug, Error)]
pub enum SinkError {
    /// IO error while writing a record out.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error while encoding a record.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Failure reported by an external sink implementation.
    #[error("Sink error: {0}")]
    Sink(String),
}
