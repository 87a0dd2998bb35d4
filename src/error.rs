//! SDK error types.
//!
//! Provides error types for parsing and conversion operations.

/// SDK errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SdkError {
    /// Unrecognized order status string.
    #[error("invalid order status: {0}")]
    InvalidStatus(String),

    /// Unrecognized event kind string.
    #[error("invalid event kind: {0}")]
    InvalidEventKind(String),
}
