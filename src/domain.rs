//! Persisted entities as the relational store presents them.
//!
//! The engine only reads these; ownership stays with the store. Monetary
//! fields are fixed-point decimals with a 2-digit scale, enforced at the
//! data-access boundary rather than inside aggregation logic.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Order fulfillment status as stored.
///
/// Only `Delivered` orders with the inclusion flag set count toward sales
/// revenue; `Cancelled` orders feed the cancelled-total metric; the three
/// return-side statuses feed the return-requests view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
    Returned,
    Refunded,
    #[serde(rename = "Return Cancelled")]
    ReturnCancelled,
}

impl OrderStatus {
    /// The label the store uses for this status
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Processing => "Processing",
            Self::Shipped => "Shipped",
            Self::Delivered => "Delivered",
            Self::Cancelled => "Cancelled",
            Self::Returned => "Returned",
            Self::Refunded => "Refunded",
            Self::ReturnCancelled => "Return Cancelled",
        }
    }

    /// True for the statuses shown in the return-requests view
    pub fn is_return_side(&self) -> bool {
        matches!(self, Self::Returned | Self::Refunded | Self::ReturnCancelled)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A customer order as read from the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub customer_id: i64,
    /// Customer name snapshot taken at checkout
    pub customer_name: String,
    pub status: OrderStatus,
    /// Order timestamp, stored in UTC
    pub order_date: DateTime<Utc>,
    /// Whether this order participates in sales reporting
    pub in_sales_report: bool,
    /// Goods only, delivery fee excluded
    pub subtotal: Decimal,
    pub delivery_fee: Decimal,
    /// Always `subtotal + delivery_fee`
    pub total: Decimal,
}

impl Order {
    /// Build an order, deriving `total` from the subtotal/fee invariant.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: i64,
        customer_id: i64,
        customer_name: impl Into<String>,
        status: OrderStatus,
        order_date: DateTime<Utc>,
        in_sales_report: bool,
        subtotal: Decimal,
        delivery_fee: Decimal,
    ) -> Self {
        let subtotal = round_money(subtotal);
        let delivery_fee = round_money(delivery_fee);
        Self {
            id,
            customer_id,
            customer_name: customer_name.into(),
            status,
            order_date,
            in_sales_report,
            subtotal,
            delivery_fee,
            total: subtotal + delivery_fee,
        }
    }
}

/// A single line of an order: product reference plus quantity and the unit
/// price snapshotted at purchase time (independent of the product's current
/// price).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub order_id: i64,
    pub product_id: i64,
    /// Product name snapshot taken at purchase
    pub name: String,
    pub quantity: u32,
    pub unit_price: Decimal,
}

impl OrderLine {
    pub fn new(
        order_id: i64,
        product_id: i64,
        name: impl Into<String>,
        quantity: u32,
        unit_price: Decimal,
    ) -> Self {
        Self {
            order_id,
            product_id,
            name: name.into(),
            quantity,
            unit_price: round_money(unit_price),
        }
    }

    /// Line extended amount: quantity x snapshotted unit price
    pub fn extended(&self) -> Decimal {
        round_money(Decimal::from(self.quantity) * self.unit_price)
    }
}

/// An order together with its lines - the unit the store hands to the
/// aggregation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub order: Order,
    pub lines: Vec<OrderLine>,
}

impl OrderRecord {
    pub fn new(order: Order, lines: Vec<OrderLine>) -> Self {
        Self { order, lines }
    }

    /// Total units across all lines
    pub fn units(&self) -> u64 {
        self.lines.iter().map(|l| l.quantity as u64).sum()
    }
}

/// Catalog product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub image_url: Option<String>,
    pub category: String,
    /// Soft-delete flag; deleted products are excluded from all analytics
    /// and listings while their historical order lines stay valid
    pub deleted: bool,
}

/// Current on-hand stock for a product. At most one row per product; a
/// missing row means zero stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stock {
    pub id: i64,
    pub product_id: i64,
    pub quantity: i64,
    pub last_updated: DateTime<Utc>,
}

/// A customer rating for a product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub id: Uuid,
    pub product_id: i64,
    pub value: Decimal,
    pub created_at: DateTime<Utc>,
}

impl Rating {
    pub fn new(product_id: i64, value: Decimal, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            product_id,
            value,
            created_at,
        }
    }
}

/// Round a monetary value to the canonical 2-digit scale
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}
