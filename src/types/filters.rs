//! Filter set for the orders listing.
//!
//! The listing endpoint accepts an open set of optional filters. The same
//! filter set also keys list cache entries, so both derived forms (query
//! pairs and cache fragment) must be deterministic for a given value.

use chrono::NaiveDate;

use super::order::OrderStatus;

/// Optional filters applied to the orders listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderFilters {
    /// Fulfillment status.
    pub status: Option<OrderStatus>,

    /// Staff member who took the order.
    pub taken_by: Option<u64>,

    /// Delivery region code.
    pub region: Option<String>,

    /// Customer phone number.
    pub phone: Option<String>,

    /// Courier delivery-status code.
    pub delivery_status: Option<String>,

    /// Employee assigned to deliver.
    pub assigned_to: Option<u64>,

    /// Scheduled delivery date.
    pub delivery_date: Option<NaiveDate>,

    /// Confirmed variant ID present on a line item.
    pub variant_id: Option<u64>,

    /// Owning company (tenant) ID.
    pub company_id: Option<u64>,
}

impl OrderFilters {
    /// Creates an empty filter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Filters by fulfillment status.
    #[must_use]
    pub fn with_status(mut self, status: OrderStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Filters by the staff member who took the order.
    #[must_use]
    pub fn with_taken_by(mut self, id: u64) -> Self {
        self.taken_by = Some(id);
        self
    }

    /// Filters by delivery region code.
    #[must_use]
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Filters by customer phone number.
    #[must_use]
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Filters by courier delivery-status code.
    #[must_use]
    pub fn with_delivery_status(mut self, code: impl Into<String>) -> Self {
        self.delivery_status = Some(code.into());
        self
    }

    /// Filters by the employee assigned to deliver.
    #[must_use]
    pub fn with_assigned_to(mut self, id: u64) -> Self {
        self.assigned_to = Some(id);
        self
    }

    /// Filters by scheduled delivery date.
    #[must_use]
    pub fn with_delivery_date(mut self, date: NaiveDate) -> Self {
        self.delivery_date = Some(date);
        self
    }

    /// Filters by confirmed variant ID.
    #[must_use]
    pub fn with_variant(mut self, variant_id: u64) -> Self {
        self.variant_id = Some(variant_id);
        self
    }

    /// Filters by owning company (tenant) ID.
    #[must_use]
    pub fn with_company(mut self, company_id: u64) -> Self {
        self.company_id = Some(company_id);
        self
    }

    /// Returns true if no filter is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Returns the present filters as `(name, value)` pairs in a fixed
    /// field order, prefixed with the page parameter.
    #[must_use]
    pub fn query_pairs(&self, page: u32) -> Vec<(String, String)> {
        let mut pairs = vec![("page".to_string(), page.to_string())];
        for (name, value) in self.present() {
            pairs.push((name.to_string(), value));
        }
        pairs
    }

    /// Returns a deterministic fragment describing the filter set, used to
    /// key list cache entries. The empty filter set yields an empty string.
    #[must_use]
    pub fn cache_fragment(&self) -> String {
        self.present()
            .into_iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Present filters as `(name, rendered value)` pairs, fixed field order.
    fn present(&self) -> Vec<(&'static str, String)> {
        let mut out = Vec::new();
        if let Some(status) = self.status {
            out.push(("status", status.to_string()));
        }
        if let Some(id) = self.taken_by {
            out.push(("taken_by", id.to_string()));
        }
        if let Some(ref region) = self.region {
            out.push(("region", region.clone()));
        }
        if let Some(ref phone) = self.phone {
            out.push(("phone", phone.clone()));
        }
        if let Some(ref code) = self.delivery_status {
            out.push(("delivery_status", code.clone()));
        }
        if let Some(id) = self.assigned_to {
            out.push(("assigned_to", id.to_string()));
        }
        if let Some(date) = self.delivery_date {
            out.push(("delivery_date", date.to_string()));
        }
        if let Some(id) = self.variant_id {
            out.push(("variant_id", id.to_string()));
        }
        if let Some(id) = self.company_id {
            out.push(("company_id", id.to_string()));
        }
        out
    }
}
