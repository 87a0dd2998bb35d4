//! Ordersync SDK - Rust client library for the back-office orders API.
//!
//! This crate keeps a client-side cache of customer orders approximately
//! in sync with the backend. Two paths feed the cache:
//!
//! - the **baseline fetch** ([`client`]): a paginated, filtered REST read
//!   that is the authoritative snapshot and the only drift-recovery path;
//! - the **push channel** ([`ws`]): a reconnecting WebSocket stream of
//!   create/update/delete events that patches cached entries between
//!   fetches ([`sync`]).
//!
//! The cache itself ([`cache`]) is an injected interface, so applications
//! can share one store between consumers and tests can substitute a fake.
//!
//! # Core Types
//!
//! - [`Order`], [`OrderStatus`] — the order data model
//! - [`OrderFilters`], [`OrderPage`] — listing filters and pagination
//! - [`OrdersClient`] — baseline REST client
//! - [`OrderStream`], [`ConnectionState`] — push channel
//! - [`OrderCache`], [`MemoryCache`] — query cache
//! - [`RealtimeOrderSync`] — ties all of the above together
//!
//! # Example
//!
//! ```rust
//! use ordersync_sdk::{OrderFilters, OrderStatus};
//!
//! let filters = OrderFilters::new()
//!     .with_status(OrderStatus::Packing)
//!     .with_company(7);
//! assert_eq!(filters.cache_fragment(), "status=packing&company_id=7");
//! ```

pub mod cache;
pub mod client;
pub mod error;
pub mod sync;
pub mod types;
pub mod ws;

pub use cache::{ListKey, MemoryCache, OrderCache};
pub use client::{ClientConfig, ClientError, OrdersClient};
pub use error::SdkError;
pub use sync::{apply_event, RealtimeOrderSync};
pub use types::{
    LineItem, MetaEntry, Order, OrderFilters, OrderPage, OrderStatus, PaginationMeta, ShippingLine,
};
pub use ws::{ConnectionState, EventKind, OrderEvent, OrderStream, StreamConfig, StreamError};
