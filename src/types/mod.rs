//! Core types for the Ordersync SDK.
//!
//! This module provides the order data model, pagination envelope, and the
//! listing filter set shared by the HTTP client, the push channel, and the
//! cache.

pub mod filters;
pub mod order;
pub mod page;

pub use filters::OrderFilters;
pub use order::{LineItem, MetaEntry, Order, OrderStatus, ShippingLine};
pub use page::{OrderPage, PaginationMeta};
