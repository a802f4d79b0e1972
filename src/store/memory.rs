//! In-memory [`ReportStore`] used by tests and embedders that do not sit on
//! a relational backend.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet};
use tokio::sync::RwLock;

use crate::domain::{round_money, Order, OrderLine, OrderRecord, OrderStatus, Product, Rating, Stock};
use crate::error::Result;

use super::{ProductFacts, ReportStore};

#[derive(Debug, Default)]
struct Tables {
    orders: Vec<Order>,
    lines: Vec<OrderLine>,
    products: Vec<Product>,
    stocks: Vec<Stock>,
    ratings: Vec<Rating>,
}

/// In-memory store backed by plain vectors behind an async lock.
///
/// Insertion order is preserved, which is what gives the classifier its
/// stable tie-break behavior.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an order together with its lines
    pub async fn add_order(&self, order: Order, lines: Vec<OrderLine>) {
        let mut tables = self.tables.write().await;
        tables.lines.extend(lines);
        tables.orders.push(order);
    }

    pub async fn add_product(&self, product: Product) {
        self.tables.write().await.products.push(product);
    }

    /// Insert or replace the stock row for a product
    pub async fn add_stock(&self, stock: Stock) {
        let mut tables = self.tables.write().await;
        tables.stocks.retain(|s| s.product_id != stock.product_id);
        tables.stocks.push(stock);
    }

    pub async fn add_rating(&self, rating: Rating) {
        self.tables.write().await.ratings.push(rating);
    }

    fn record_for(tables: &Tables, order: &Order) -> OrderRecord {
        let lines = tables
            .lines
            .iter()
            .filter(|l| l.order_id == order.id)
            .cloned()
            .collect();
        OrderRecord::new(order.clone(), lines)
    }
}

#[async_trait]
impl ReportStore for MemoryStore {
    async fn orders_in_range(
        &self,
        since: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<Vec<OrderRecord>> {
        let tables = self.tables.read().await;
        Ok(tables
            .orders
            .iter()
            .filter(|o| o.order_date >= since && o.order_date < until)
            .map(|o| Self::record_for(&tables, o))
            .collect())
    }

    async fn orders_in_sales_report(&self) -> Result<Vec<OrderRecord>> {
        let tables = self.tables.read().await;
        let mut records: Vec<OrderRecord> = tables
            .orders
            .iter()
            .filter(|o| o.in_sales_report)
            .map(|o| Self::record_for(&tables, o))
            .collect();
        records.sort_by(|a, b| b.order.order_date.cmp(&a.order.order_date));
        Ok(records)
    }

    async fn return_orders(&self) -> Result<Vec<OrderRecord>> {
        let tables = self.tables.read().await;
        let mut records: Vec<OrderRecord> = tables
            .orders
            .iter()
            .filter(|o| o.status.is_return_side())
            .map(|o| Self::record_for(&tables, o))
            .collect();
        // Open return requests surface ahead of settled ones
        records.sort_by(|a, b| {
            let a_open = a.order.status != OrderStatus::Returned;
            let b_open = b.order.status != OrderStatus::Returned;
            a_open
                .cmp(&b_open)
                .then(b.order.order_date.cmp(&a.order.order_date))
        });
        Ok(records)
    }

    async fn product_facts(&self, recent_since: DateTime<Utc>) -> Result<Vec<ProductFacts>> {
        let tables = self.tables.read().await;
        let orders_by_id: HashMap<i64, &Order> =
            tables.orders.iter().map(|o| (o.id, o)).collect();
        let stock_by_product: HashMap<i64, i64> = tables
            .stocks
            .iter()
            .map(|s| (s.product_id, s.quantity))
            .collect();

        let mut facts = Vec::new();
        for product in tables.products.iter().filter(|p| !p.deleted) {
            let mut order_ids = HashSet::new();
            let mut lifetime_units = 0u64;
            let mut recent_units = 0u64;
            let mut returned_count = 0u64;

            for line in tables.lines.iter().filter(|l| l.product_id == product.id) {
                let Some(order) = orders_by_id.get(&line.order_id) else {
                    continue;
                };
                order_ids.insert(order.id);
                if order.status == OrderStatus::Returned {
                    returned_count += 1;
                }
                if order.status != OrderStatus::Cancelled {
                    lifetime_units += line.quantity as u64;
                    if order.order_date >= recent_since {
                        recent_units += line.quantity as u64;
                    }
                }
            }

            let ratings: Vec<&Rating> = tables
                .ratings
                .iter()
                .filter(|r| r.product_id == product.id)
                .collect();
            let avg_rating = if ratings.is_empty() {
                Decimal::ZERO
            } else {
                let sum: Decimal = ratings.iter().map(|r| r.value).sum();
                round_money(sum / Decimal::from(ratings.len()))
            };

            facts.push(ProductFacts {
                product: product.clone(),
                current_stock: stock_by_product.get(&product.id).copied().unwrap_or(0),
                avg_rating,
                rating_count: ratings.len() as u64,
                total_orders: order_ids.len() as u64,
                total_units_sold: lifetime_units,
                recent_sales: recent_units,
                latest_rating_date: ratings.iter().map(|r| r.created_at).max(),
                returned_count,
            });
        }
        Ok(facts)
    }

    async fn distinct_rated_products(
        &self,
        since: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<u64> {
        let tables = self.tables.read().await;
        let rated: HashSet<i64> = tables
            .ratings
            .iter()
            .filter(|r| r.created_at >= since && r.created_at < until)
            .map(|r| r.product_id)
            .collect();
        Ok(rated.len() as u64)
    }

    async fn total_products(&self) -> Result<u64> {
        let tables = self.tables.read().await;
        Ok(tables.products.iter().filter(|p| !p.deleted).count() as u64)
    }

    async fn total_stock(&self) -> Result<i64> {
        let tables = self.tables.read().await;
        Ok(tables.stocks.iter().map(|s| s.quantity).sum())
    }
}
