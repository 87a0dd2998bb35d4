//! Push-channel error types.

use std::fmt;

/// Push-channel errors.
///
/// Transport failures never reach consumers; the reconnect loop handles
/// them internally. These errors surface only at construction time
/// (invalid config) or when the stream has been shut down.
#[derive(Debug)]
pub enum StreamError {
    /// Connection attempt failed.
    Connection(String),

    /// WebSocket protocol error.
    Protocol(String),

    /// Failed to deserialize an event frame.
    Deserialization(String),

    /// The stream has been shut down; no more events will arrive.
    Closed,

    /// Invalid configuration.
    InvalidConfig(String),
}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connection(msg) => write!(f, "connection failed: {}", msg),
            Self::Protocol(msg) => write!(f, "protocol error: {}", msg),
            Self::Deserialization(msg) => write!(f, "deserialization failed: {}", msg),
            Self::Closed => write!(f, "stream closed"),
            Self::InvalidConfig(msg) => write!(f, "invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for StreamError {}

impl From<tokio_tungstenite::tungstenite::Error> for StreamError {
    fn from(err: tokio_tungstenite::tungstenite::Error) -> Self {
        Self::Protocol(err.to_string())
    }
}
