//! Pagination types for the orders-listing endpoint.

use serde::{Deserialize, Serialize};

use super::order::Order;

/// Pagination metadata returned alongside a page of orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationMeta {
    /// One-based index of the current page.
    pub current_page: u32,

    /// Page size.
    pub per_page: u32,

    /// Total matching orders across all pages.
    pub total: u64,

    /// Total number of pages.
    pub total_pages: u32,
}

impl PaginationMeta {
    /// Returns true if pages remain after the current one.
    #[must_use]
    pub const fn has_next_page(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Returns true if no orders matched the filter set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.total == 0
    }
}

/// One page of the authoritative order listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderPage {
    /// Orders on this page, in backend order.
    pub orders: Vec<Order>,

    /// Pagination metadata.
    pub meta: PaginationMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_next_page() {
        let meta = PaginationMeta {
            current_page: 1,
            per_page: 20,
            total: 45,
            total_pages: 3,
        };
        assert!(meta.has_next_page());

        let meta = PaginationMeta {
            current_page: 3,
            per_page: 20,
            total: 45,
            total_pages: 3,
        };
        assert!(!meta.has_next_page());
    }

    #[test]
    fn test_is_empty() {
        let meta = PaginationMeta {
            current_page: 1,
            per_page: 20,
            total: 0,
            total_pages: 0,
        };
        assert!(meta.is_empty());
    }

    #[test]
    fn test_page_deserialize() {
        let json = r#"{
            "orders": [{"id":1,"status":"packing"}],
            "meta": {"current_page":1,"per_page":20,"total":1,"total_pages":1}
        }"#;
        let page: OrderPage = serde_json::from_str(json).expect("deserialize");
        assert_eq!(page.orders.len(), 1);
        assert_eq!(page.meta.total, 1);
    }
}
