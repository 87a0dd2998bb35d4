//! In-memory query cache.

use dashmap::DashMap;

use super::key::ListKey;
use super::OrderCache;
use crate::types::Order;

/// Concurrent in-memory implementation of [`OrderCache`].
///
/// The default store used by the sync layer. Entries live for the life of
/// the process; nothing is persisted.
#[derive(Debug, Default)]
pub struct MemoryCache {
    lists: DashMap<ListKey, Vec<Order>>,
    orders: DashMap<u64, Order>,
}

impl MemoryCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of cached list entries.
    #[must_use]
    pub fn list_count(&self) -> usize {
        self.lists.len()
    }

    /// Returns the number of cached by-id entries.
    #[must_use]
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }
}

impl OrderCache for MemoryCache {
    fn list(&self, key: &ListKey) -> Option<Vec<Order>> {
        self.lists.get(key).map(|entry| entry.value().clone())
    }

    fn put_list(&self, key: ListKey, orders: Vec<Order>) {
        self.lists.insert(key, orders);
    }

    fn invalidate_list(&self, key: &ListKey) {
        self.lists.remove(key);
    }

    fn invalidate_all_lists(&self) {
        self.lists.clear();
    }

    fn update_lists(&self, f: &mut dyn FnMut(&ListKey, &mut Vec<Order>)) {
        for mut entry in self.lists.iter_mut() {
            let (key, orders) = entry.pair_mut();
            f(key, orders);
        }
    }

    fn order(&self, id: u64) -> Option<Order> {
        self.orders.get(&id).map(|entry| entry.value().clone())
    }

    fn put_order(&self, order: Order) {
        self.orders.insert(order.id, order);
    }

    fn remove_order(&self, id: u64) {
        self.orders.remove(&id);
    }
}
