//! Push-channel wire format.
//!
//! The server sends one JSON object per text frame:
//!
//! ```json
//! { "event": "created" | "updated" | "deleted", "order": { ... } | null }
//! ```
//!
//! Frames that fail to parse are logged and dropped; they never affect the
//! connection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::StreamError;
use crate::error::SdkError;
use crate::types::Order;

/// Kind of mutation an event describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// A new order was created.
    Created,
    /// An existing order changed.
    Updated,
    /// An order was removed.
    Deleted,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created => write!(f, "created"),
            Self::Updated => write!(f, "updated"),
            Self::Deleted => write!(f, "deleted"),
        }
    }
}

impl FromStr for EventKind {
    type Err = SdkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "created" => Ok(Self::Created),
            "updated" => Ok(Self::Updated),
            "deleted" => Ok(Self::Deleted),
            other => Err(SdkError::InvalidEventKind(other.to_string())),
        }
    }
}

/// A single order mutation pushed by the server.
///
/// The `order` payload may be absent; event application falls back to
/// invalidating affected cache entries when it is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderEvent {
    /// Mutation kind.
    pub event: EventKind,

    /// Full order payload, when the server includes one.
    pub order: Option<Order>,
}

impl OrderEvent {
    /// Creates a `created` event carrying a full payload.
    #[must_use]
    pub fn created(order: Order) -> Self {
        Self {
            event: EventKind::Created,
            order: Some(order),
        }
    }

    /// Creates an `updated` event carrying a full payload.
    #[must_use]
    pub fn updated(order: Order) -> Self {
        Self {
            event: EventKind::Updated,
            order: Some(order),
        }
    }

    /// Creates a `deleted` event carrying a full payload.
    #[must_use]
    pub fn deleted(order: Order) -> Self {
        Self {
            event: EventKind::Deleted,
            order: Some(order),
        }
    }

    /// Parses one text frame.
    ///
    /// # Errors
    ///
    /// Returns an error if the frame is not a valid event object.
    pub fn parse(text: &str) -> Result<Self, StreamError> {
        serde_json::from_str(text).map_err(|e| StreamError::Deserialization(e.to_string()))
    }

    /// Returns the ID of the order the event refers to, if the payload is
    /// present.
    #[must_use]
    pub fn order_id(&self) -> Option<u64> {
        self.order.as_ref().map(|order| order.id)
    }
}
