//! Cache keys for the order query cache.

use std::fmt;

use crate::types::OrderFilters;

/// Key for a cached, filtered, paginated order list.
///
/// Built from the page index and the deterministic filter fragment, so two
/// consumers with the same page and filters share one entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListKey {
    /// One-based page index.
    pub page: u32,

    /// Deterministic filter fragment (see [`OrderFilters::cache_fragment`]).
    pub filters: String,
}

impl ListKey {
    /// Creates a list key for the given page and filter set.
    #[must_use]
    pub fn new(page: u32, filters: &OrderFilters) -> Self {
        Self {
            page,
            filters: filters.cache_fragment(),
        }
    }
}

impl fmt::Display for ListKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.filters.is_empty() {
            write!(f, "orders?page={}", self.page)
        } else {
            write!(f, "orders?page={}&{}", self.page, self.filters)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OrderStatus;

    #[test]
    fn test_list_key_equality() {
        let filters = OrderFilters::new().with_status(OrderStatus::Packing);
        assert_eq!(ListKey::new(1, &filters), ListKey::new(1, &filters));
        assert_ne!(ListKey::new(1, &filters), ListKey::new(2, &filters));
        assert_ne!(
            ListKey::new(1, &filters),
            ListKey::new(1, &OrderFilters::new())
        );
    }

    #[test]
    fn test_list_key_display() {
        let key = ListKey::new(2, &OrderFilters::new());
        assert_eq!(key.to_string(), "orders?page=2");

        let key = ListKey::new(1, &OrderFilters::new().with_company(5));
        assert_eq!(key.to_string(), "orders?page=1&company_id=5");
    }
}
