//! Push channel for realtime order events.
//!
//! This module provides the WebSocket client for the global orders topic:
//! the wire format, the connection state machine, and the reconnecting
//! stream client. Events arrive strictly in transport-delivery order on a
//! single connection; nothing is replayed across a reconnect gap, so a
//! baseline refetch is the only way to recover events missed while
//! disconnected.
//!
//! # Example
//!
//! ```rust,ignore
//! use ordersync_sdk::ws::{OrderStream, StreamConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = StreamConfig::new("wss://backoffice.example/woocommerce/ws/orders");
//!     let stream = OrderStream::connect(config)?;
//!
//!     loop {
//!         let event = stream.next_event().await?;
//!         println!("{} order {:?}", event.event, event.order_id());
//!     }
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod messages;
pub mod state;

pub use client::OrderStream;
pub use config::StreamConfig;
pub use error::StreamError;
pub use messages::{EventKind, OrderEvent};
pub use state::{step, ConnectionEffect, ConnectionInput, ConnectionState};
