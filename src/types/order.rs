//! Order types for the back-office orders API.
//!
//! Provides the `Order` entity and its component parts as they appear on
//! the wire: fulfillment status, line items, shipping lines, and free-form
//! metadata entries.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SdkError;

/// Fulfillment status of an order.
///
/// Statuses the backend introduced after this SDK was released parse as
/// [`OrderStatus::Unknown`] instead of failing the whole `Order`, so a push
/// event carrying one is still applied rather than silently dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Placed but not yet confirmed by staff.
    Unconfirmed,
    /// Confirmed and being packed.
    Packing,
    /// Handed to dispatch.
    Dispatching,
    /// Out for delivery.
    Delivering,
    /// Delivered to the customer.
    Delivered,
    /// Returned by the customer.
    Returned,
    /// Cancelled before delivery.
    Cancelled,
    /// Status string this SDK version does not recognize.
    #[serde(other)]
    Unknown,
}

impl OrderStatus {
    /// Returns true if the order has reached a final state.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Delivered | Self::Returned | Self::Cancelled)
    }

    /// Returns true if the order is somewhere in the fulfillment pipeline.
    #[must_use]
    pub const fn is_in_fulfillment(&self) -> bool {
        matches!(self, Self::Packing | Self::Dispatching | Self::Delivering)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unconfirmed => write!(f, "unconfirmed"),
            Self::Packing => write!(f, "packing"),
            Self::Dispatching => write!(f, "dispatching"),
            Self::Delivering => write!(f, "delivering"),
            Self::Delivered => write!(f, "delivered"),
            Self::Returned => write!(f, "returned"),
            Self::Cancelled => write!(f, "cancelled"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

impl FromStr for OrderStatus {
    type Err = SdkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unconfirmed" => Ok(Self::Unconfirmed),
            "packing" => Ok(Self::Packing),
            "dispatching" => Ok(Self::Dispatching),
            "delivering" => Ok(Self::Delivering),
            "delivered" => Ok(Self::Delivered),
            "returned" => Ok(Self::Returned),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(SdkError::InvalidStatus(other.to_string())),
        }
    }
}

/// A single product line on an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Line item ID.
    pub id: u64,

    /// Product ID.
    pub product_id: u64,

    /// Confirmed variant ID, if the product has variants.
    #[serde(default)]
    pub variant_id: Option<u64>,

    /// Product name at time of purchase.
    pub name: String,

    /// Ordered quantity.
    pub quantity: u64,

    /// Unit price.
    #[serde(default)]
    pub price: Decimal,

    /// Line total.
    #[serde(default)]
    pub total: Decimal,
}

/// A shipping method line on an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingLine {
    /// Shipping line ID.
    pub id: u64,

    /// Shipping method identifier.
    pub method_id: String,

    /// Human-readable shipping method title.
    #[serde(default)]
    pub method_title: String,

    /// Shipping cost.
    #[serde(default)]
    pub total: Decimal,
}

/// A free-form key/value metadata entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetaEntry {
    /// Metadata key.
    pub key: String,

    /// Metadata value (arbitrary JSON).
    pub value: Value,
}

/// A customer order.
///
/// The backend is the system of record; the client holds a cached,
/// possibly-stale copy. Fields absent from a payload deserialize to their
/// defaults so partial backend responses stay readable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Order ID.
    pub id: u64,

    /// Fulfillment status.
    pub status: OrderStatus,

    /// Customer name.
    #[serde(default)]
    pub customer_name: Option<String>,

    /// Customer phone number.
    #[serde(default)]
    pub phone: Option<String>,

    /// Delivery region code.
    #[serde(default)]
    pub region: Option<String>,

    /// Shipping address.
    #[serde(default)]
    pub shipping_address: Option<String>,

    /// Owning company (tenant) ID.
    #[serde(default)]
    pub company_id: Option<u64>,

    /// ID of the staff member who took the order.
    #[serde(default)]
    pub taken_by: Option<u64>,

    /// ID of the employee assigned to deliver the order.
    #[serde(default)]
    pub assigned_to: Option<u64>,

    /// Delivery-status code from the courier integration.
    #[serde(default)]
    pub delivery_status: Option<String>,

    /// Scheduled delivery date.
    #[serde(default)]
    pub delivery_date: Option<NaiveDate>,

    /// Order total.
    #[serde(default)]
    pub total: Decimal,

    /// Currency code.
    #[serde(default)]
    pub currency: Option<String>,

    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    /// Product lines.
    #[serde(default)]
    pub line_items: Vec<LineItem>,

    /// Shipping method lines.
    #[serde(default)]
    pub shipping_lines: Vec<ShippingLine>,

    /// Free-form metadata entries.
    #[serde(default)]
    pub meta_data: Vec<MetaEntry>,
}

impl Order {
    /// Returns the total ordered quantity across all line items.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.line_items.iter().map(|item| item.quantity).sum()
    }

    /// Returns true if any line item carries the given variant ID.
    #[must_use]
    pub fn contains_variant(&self, variant_id: u64) -> bool {
        self.line_items
            .iter()
            .any(|item| item.variant_id == Some(variant_id))
    }

    /// Returns true if the order has reached a final state.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Returns the value of the first metadata entry with the given key.
    #[must_use]
    pub fn meta(&self, key: &str) -> Option<&Value> {
        self.meta_data
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| &entry.value)
    }
}
