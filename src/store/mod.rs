//! Data-access capabilities the engine reads through.
//!
//! The relational store itself is an external collaborator; the engine only
//! depends on the [`ReportStore`] trait, injected at construction. Each
//! report request issues read queries against a consistent snapshot and
//! keeps no cross-request state, so concurrent reports never interfere.
//!
//! Numeric contracts are enforced at this boundary: counts come back as
//! integers and monetary values as 2-digit-scale decimals, so the
//! aggregation layer never has to coerce.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{OrderRecord, Product};
use crate::error::Result;

mod memory;

pub use memory::MemoryStore;

/// Joined product facts for the classifier, one row per live product.
///
/// Unit counts exclude Cancelled orders; a product with no stock row reads
/// as zero stock; deleted products never appear.
// Field names serialize as-is: the dashboard expects the store's column
// aliases (snake_case) on fact rows, with camelCase reserved for the
// computed top-level keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductFacts {
    #[serde(flatten)]
    pub product: Product,
    pub current_stock: i64,
    pub avg_rating: Decimal,
    pub rating_count: u64,
    /// Distinct orders that contain this product, any status
    pub total_orders: u64,
    /// Lifetime units sold, excluding Cancelled orders
    pub total_units_sold: u64,
    /// Units sold inside the trailing window, excluding Cancelled orders
    pub recent_sales: u64,
    pub latest_rating_date: Option<DateTime<Utc>>,
    pub returned_count: u64,
}

/// Read-only data access for the reporting engine.
///
/// Implementations are expected to read a consistent snapshot per call; the
/// engine tolerates stock values changing between calls (reports are not
/// transactionally consistent with concurrent writes).
#[async_trait]
pub trait ReportStore: Send + Sync {
    /// All orders with `since <= order_date < until`, regardless of status
    /// or inclusion flag, with their lines.
    async fn orders_in_range(
        &self,
        since: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<Vec<OrderRecord>>;

    /// Orders flagged for sales reporting, newest first.
    async fn orders_in_sales_report(&self) -> Result<Vec<OrderRecord>>;

    /// Orders in a return-side status (Returned, Refunded, Return
    /// Cancelled), Returned first, then newest first.
    async fn return_orders(&self) -> Result<Vec<OrderRecord>>;

    /// Joined facts for every non-deleted product. `recent_since` bounds the
    /// trailing window for `recent_sales`.
    async fn product_facts(&self, recent_since: DateTime<Utc>) -> Result<Vec<ProductFacts>>;

    /// Number of distinct products rated within `[since, until)`.
    async fn distinct_rated_products(
        &self,
        since: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<u64>;

    /// Count of non-deleted products.
    async fn total_products(&self) -> Result<u64>;

    /// Sum of on-hand stock across all products.
    async fn total_stock(&self) -> Result<i64>;
}
