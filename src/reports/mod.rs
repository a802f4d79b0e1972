//! Report engine: the operations the dispatcher exposes.
//!
//! Each operation reads through the injected [`ReportStore`], runs the pure
//! aggregation/classification layers, and returns a typed response that
//! serializes to the dashboard's wire shape. The engine is request-scoped
//! and stateless between calls; concurrent report requests never interfere.
//!
//! Operations that are relative to "now" come in two forms: the plain method
//! the dispatcher calls, and an `*_at` variant taking an explicit reference
//! time for deterministic tests.

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

use crate::config::ReportConfig;
use crate::domain::{round_money, OrderRecord, OrderStatus};
use crate::error::Result;
use crate::period::{self, Granularity};
use crate::products::{self, ProductAnalytics, ProductPerformance};
use crate::query::RatedTimeFrame;
use crate::store::ReportStore;
use crate::timezone;

pub mod aggregate;
pub mod filter;

#[cfg(test)]
pub mod test_utils;



#[cfg(test)]
mod property_tests;

pub use aggregate::{DaySnapshot, SalesBucket};
pub use filter::{classify, OrderClass};

/// One entry of the daily sales report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySalesEntry {
    /// Day name, Sunday through Saturday
    pub period: String,
    pub orders: u64,
    pub total: Decimal,
}

/// One entry of the weekly sales report
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklySalesEntry {
    /// `"Week <n> (<start> - <end>)"`
    pub period: String,
    pub orders: u64,
    pub total: Decimal,
    pub cancelled_orders: u64,
    pub cancelled_total: Decimal,
}

/// One entry of the monthly sales report
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySalesEntry {
    /// Calendar month, 1-12
    pub month: u32,
    pub order_count: u64,
    pub total: Decimal,
}

/// One entry of the yearly sales report
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlySalesEntry {
    /// Four-digit year
    pub period: String,
    pub orders: u64,
    pub total: Decimal,
    pub cancelled_orders: u64,
    pub cancelled_total: Decimal,
}

/// Point-in-time dashboard card for a single day
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesSnapshot {
    pub period_sales: Decimal,
    pub total_quantity: u64,
    pub total_orders: u64,
    pub total_customers: u64,
}

/// One sold line in the timeframe sales detail
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SoldLineRow {
    pub order_date: DateTime<Utc>,
    pub full_name: String,
    pub product_name: String,
    pub quantity: u32,
    pub price: Decimal,
    pub total_amount: Decimal,
}

/// Sales detail for the current day/week/month/year
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeframeSales {
    pub total_sales: Decimal,
    pub products: Vec<SoldLineRow>,
}

/// Rated-products counter payload
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatedProductsCount {
    pub rated_products_count: u64,
}

/// Catalog-wide counters for the dashboard header
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogTotals {
    pub total_products: u64,
    pub total_stock: i64,
}

/// An order row for listings, dates shifted to display time
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderView {
    pub id: i64,
    pub full_name: String,
    pub status: OrderStatus,
    /// Order timestamp in the display timezone
    pub order_date: DateTime<FixedOffset>,
    pub in_sales_report: bool,
    pub subtotal: Decimal,
    pub delivery_fee: Decimal,
    pub total: Decimal,
    /// `"<name> (<qty>), ..."` summary of the order's lines
    pub ordered_products: String,
}

impl OrderView {
    fn from_record(record: &OrderRecord) -> Self {
        let ordered_products = record
            .lines
            .iter()
            .map(|l| format!("{} ({})", l.name, l.quantity))
            .collect::<Vec<_>>()
            .join(", ");
        Self {
            id: record.order.id,
            full_name: record.order.customer_name.clone(),
            status: record.order.status,
            order_date: timezone::to_display(record.order.order_date),
            in_sales_report: record.order.in_sales_report,
            subtotal: record.order.subtotal,
            delivery_fee: record.order.delivery_fee,
            total: record.order.total,
            ordered_products,
        }
    }
}

/// Central report engine, constructed once and shared across requests.
#[derive(Clone)]
pub struct ReportEngine {
    store: Arc<dyn ReportStore>,
    config: ReportConfig,
}

impl ReportEngine {
    pub fn new(store: Arc<dyn ReportStore>, config: ReportConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Daily sales for the current report week: always 7 entries, Sunday
    /// through Saturday, zero-filled where no orders exist.
    pub async fn daily_sales(&self) -> Result<Vec<DailySalesEntry>> {
        self.daily_sales_at(Utc::now()).await
    }

    pub async fn daily_sales_at(&self, now: DateTime<Utc>) -> Result<Vec<DailySalesEntry>> {
        debug!("generating daily sales report");
        let buckets = self.bucketed(Granularity::Daily, now, None).await?;
        Ok(buckets
            .into_iter()
            .map(|b| DailySalesEntry {
                period: b.key.label(),
                orders: b.orders,
                total: b.total,
            })
            .collect())
    }

    /// Weekly sales for the 7 most recent ISO weeks: always 7 entries with
    /// computed week bounds, zero-filled.
    pub async fn weekly_sales(&self) -> Result<Vec<WeeklySalesEntry>> {
        self.weekly_sales_at(Utc::now()).await
    }

    pub async fn weekly_sales_at(&self, now: DateTime<Utc>) -> Result<Vec<WeeklySalesEntry>> {
        debug!("generating weekly sales report");
        let buckets = self.bucketed(Granularity::Weekly, now, None).await?;
        Ok(buckets
            .into_iter()
            .map(|b| WeeklySalesEntry {
                period: b.key.label(),
                orders: b.orders,
                total: b.total,
                cancelled_orders: b.cancelled_orders,
                cancelled_total: b.cancelled_total,
            })
            .collect())
    }

    /// Monthly sales for a year (default: current): always 12 entries,
    /// zero-filled.
    pub async fn monthly_sales(&self, year: Option<i32>) -> Result<Vec<MonthlySalesEntry>> {
        self.monthly_sales_at(year, Utc::now()).await
    }

    pub async fn monthly_sales_at(
        &self,
        year: Option<i32>,
        now: DateTime<Utc>,
    ) -> Result<Vec<MonthlySalesEntry>> {
        let year = year.unwrap_or_else(|| now.year());
        debug!(year, "generating monthly sales report");
        let buckets = self.bucketed(Granularity::Monthly, now, Some(year)).await?;
        Ok(buckets
            .into_iter()
            .map(|b| {
                // Monthly aggregation only ever yields Month keys
                let period::PeriodKey::Month(month) = b.key else {
                    unreachable!("monthly bucket carried a non-month key: {:?}", b.key)
                };
                MonthlySalesEntry {
                    month,
                    order_count: b.orders,
                    total: b.total,
                }
            })
            .collect())
    }

    /// Yearly sales for the current year and the four preceding: always 5
    /// entries, ascending, zero-filled.
    pub async fn yearly_sales(&self) -> Result<Vec<YearlySalesEntry>> {
        self.yearly_sales_at(Utc::now()).await
    }

    pub async fn yearly_sales_at(&self, now: DateTime<Utc>) -> Result<Vec<YearlySalesEntry>> {
        debug!("generating yearly sales report");
        let buckets = self.bucketed(Granularity::Yearly, now, None).await?;
        Ok(buckets
            .into_iter()
            .map(|b| YearlySalesEntry {
                period: b.key.label(),
                orders: b.orders,
                total: b.total,
                cancelled_orders: b.cancelled_orders,
                cancelled_total: b.cancelled_total,
            })
            .collect())
    }

    async fn bucketed(
        &self,
        granularity: Granularity,
        now: DateTime<Utc>,
        year: Option<i32>,
    ) -> Result<Vec<SalesBucket>> {
        let (since, until) = period::range_for(granularity, now, year);
        let records = self.store.orders_in_range(since, until).await?;
        Ok(aggregate::aggregate_sales(granularity, &records, now, year))
    }

    /// Snapshot totals for one day (default: today).
    pub async fn sales_snapshot(&self, date: Option<NaiveDate>) -> Result<SalesSnapshot> {
        self.sales_snapshot_at(date, Utc::now()).await
    }

    pub async fn sales_snapshot_at(
        &self,
        date: Option<NaiveDate>,
        now: DateTime<Utc>,
    ) -> Result<SalesSnapshot> {
        let date = date.unwrap_or_else(|| now.date_naive());
        debug!(%date, "generating sales snapshot");
        let since = period::day_start(date);
        let records = self
            .store
            .orders_in_range(since, since + Duration::days(1))
            .await?;
        let snapshot = aggregate::day_snapshot(&records);
        Ok(SalesSnapshot {
            period_sales: snapshot.sales,
            total_quantity: snapshot.units,
            total_orders: snapshot.orders,
            total_customers: snapshot.customers,
        })
    }

    /// Sold-line detail for the current period at a timeframe, qualifying
    /// orders only, newest and largest lines first.
    pub async fn timeframe_sales(&self, timeframe: Granularity) -> Result<TimeframeSales> {
        self.timeframe_sales_at(timeframe, Utc::now()).await
    }

    pub async fn timeframe_sales_at(
        &self,
        timeframe: Granularity,
        now: DateTime<Utc>,
    ) -> Result<TimeframeSales> {
        debug!(?timeframe, "generating timeframe sales detail");
        let (since, until) = period::current_range(timeframe, now);
        let records = self.store.orders_in_range(since, until).await?;

        let mut rows = Vec::new();
        let mut total_sales = Decimal::ZERO;
        for record in &records {
            if !filter::classify(&record.order).sales {
                continue;
            }
            for line in &record.lines {
                let amount = line.extended();
                total_sales += amount;
                rows.push(SoldLineRow {
                    order_date: record.order.order_date,
                    full_name: record.order.customer_name.clone(),
                    product_name: line.name.clone(),
                    quantity: line.quantity,
                    price: line.unit_price,
                    total_amount: amount,
                });
            }
        }
        rows.sort_by(|a, b| {
            b.order_date
                .cmp(&a.order_date)
                .then(b.total_amount.cmp(&a.total_amount))
        });

        Ok(TimeframeSales {
            total_sales: round_money(total_sales),
            products: rows,
        })
    }

    /// Saleability split across the live catalog.
    pub async fn product_analytics(&self) -> Result<ProductAnalytics> {
        self.product_analytics_at(Utc::now()).await
    }

    pub async fn product_analytics_at(&self, now: DateTime<Utc>) -> Result<ProductAnalytics> {
        debug!("generating product analytics");
        let recent_since = now - Duration::days(self.config.recent_sales_window_days);
        let facts = self.store.product_facts(recent_since).await?;
        Ok(products::analyze_saleability(facts, &self.config))
    }

    /// Performance tiers over the trailing sales window.
    pub async fn product_performance(&self) -> Result<ProductPerformance> {
        self.product_performance_at(Utc::now()).await
    }

    pub async fn product_performance_at(&self, now: DateTime<Utc>) -> Result<ProductPerformance> {
        debug!("generating product performance tiers");
        let recent_since = now - Duration::days(self.config.recent_sales_window_days);
        let facts = self.store.product_facts(recent_since).await?;
        Ok(products::performance_tiers(facts, now, &self.config))
    }

    /// Count of distinct products rated in a trailing window.
    pub async fn rated_products_count(&self, frame: RatedTimeFrame) -> Result<RatedProductsCount> {
        self.rated_products_count_at(frame, Utc::now()).await
    }

    pub async fn rated_products_count_at(
        &self,
        frame: RatedTimeFrame,
        now: DateTime<Utc>,
    ) -> Result<RatedProductsCount> {
        let today = now.date_naive();
        let tomorrow = today + Duration::days(1);
        let (since, until) = match frame {
            RatedTimeFrame::Today => (today, tomorrow),
            RatedTimeFrame::Yesterday => (today - Duration::days(1), today),
            RatedTimeFrame::LastWeek => (today - Duration::days(7), tomorrow),
            RatedTimeFrame::LastMonth => (
                today.checked_sub_months(chrono::Months::new(1)).unwrap_or(today),
                tomorrow,
            ),
        };
        let count = self
            .store
            .distinct_rated_products(period::day_start(since), period::day_start(until))
            .await?;
        Ok(RatedProductsCount {
            rated_products_count: count,
        })
    }

    /// Catalog-wide product and stock counters.
    pub async fn catalog_totals(&self) -> Result<CatalogTotals> {
        let (total_products, total_stock) =
            futures::future::try_join(self.store.total_products(), self.store.total_stock())
                .await?;
        Ok(CatalogTotals {
            total_products,
            total_stock,
        })
    }

    /// Orders flagged for sales reporting, dates shifted to display time.
    pub async fn sales_report_orders(&self) -> Result<Vec<OrderView>> {
        let records = self.store.orders_in_sales_report().await?;
        Ok(records.iter().map(OrderView::from_record).collect())
    }

    /// Return-side orders (Returned, Refunded, Return Cancelled).
    pub async fn return_requests(&self) -> Result<Vec<OrderView>> {
        let records = self.store.return_orders().await?;
        Ok(records.iter().map(OrderView::from_record).collect())
    }
}
