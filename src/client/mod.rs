//! HTTP client for the back-office orders API.
//!
//! This module provides the pull half of order synchronization: the
//! paginated baseline fetch and the by-id detail lookup.
//!
//! # Example
//!
//! ```rust,ignore
//! use ordersync_sdk::client::{ClientConfig, OrdersClient};
//! use ordersync_sdk::types::OrderFilters;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = OrdersClient::with_base_url("https://backoffice.example/api")?;
//!
//!     let page = client.list_orders(1, &OrderFilters::new()).await?;
//!     println!("{} orders on page 1", page.orders.len());
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod http;

pub use config::ClientConfig;
pub use error::ClientError;
pub use http::OrdersClient;
