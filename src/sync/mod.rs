//! Realtime order cache synchronization.
//!
//! Keeps a list/detail cache of orders approximately in sync with the
//! backend: the push channel supplies incremental create/update/delete
//! patches, and the paginated baseline fetch supplies the authoritative
//! snapshot. The design is eventually consistent only while no events are
//! dropped; there is no gap detection, so after a disconnect the cache may
//! silently miss mutations until something triggers a refetch.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//!
//! use ordersync_sdk::cache::MemoryCache;
//! use ordersync_sdk::client::OrdersClient;
//! use ordersync_sdk::sync::RealtimeOrderSync;
//! use ordersync_sdk::types::OrderFilters;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = OrdersClient::with_base_url("https://backoffice.example/api")?;
//!     let sync = RealtimeOrderSync::with_client(client, Arc::new(MemoryCache::new()))?;
//!
//!     let page = sync.orders(1, &OrderFilters::new()).await?;
//!     println!("{} orders, connected: {}", page.orders.len(), sync.is_connected());
//!
//!     Ok(())
//! }
//! ```

pub mod apply;
pub mod handle;

pub use apply::apply_event;
pub use handle::RealtimeOrderSync;
