//! Query cache for orders.
//!
//! The cache is an explicit, injected interface rather than a global
//! singleton: the sync layer is one of potentially many writers, and tests
//! substitute their own store. It holds two kinds of entries:
//!
//! - list entries, keyed by page + filter set ([`ListKey`]), holding the
//!   most recently fetched or patched order list for that query;
//! - by-id entries, keyed by order ID, holding individual orders.
//!
//! Invalidation removes the entry, so the next read misses and the caller
//! falls back to the baseline fetch. That pull path is the only drift
//! recovery mechanism; the cache keeps no staleness markers.

pub mod key;
pub mod memory;

pub use key::ListKey;
pub use memory::MemoryCache;

use crate::types::Order;

/// Keyed store of cached order queries.
///
/// Push events are global rather than filter-scoped, so event application
/// patches every cached list via [`OrderCache::update_lists`].
pub trait OrderCache: Send + Sync {
    /// Returns the cached list for the given key, if present.
    fn list(&self, key: &ListKey) -> Option<Vec<Order>>;

    /// Stores a list, replacing any existing entry for the key.
    fn put_list(&self, key: ListKey, orders: Vec<Order>);

    /// Drops the list entry for the given key.
    fn invalidate_list(&self, key: &ListKey);

    /// Drops every list entry.
    fn invalidate_all_lists(&self);

    /// Applies a mutation to every cached list entry in place.
    fn update_lists(&self, f: &mut dyn FnMut(&ListKey, &mut Vec<Order>));

    /// Returns the cached order with the given ID, if present.
    fn order(&self, id: u64) -> Option<Order>;

    /// Stores an order under its own ID, replacing any existing entry.
    fn put_order(&self, order: Order);

    /// Drops the by-id entry for the given ID.
    fn remove_order(&self, id: u64);
}
