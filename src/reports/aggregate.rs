//! Pure sales aggregation: partition, sum, zero-fill.
//!
//! A pure function of its inputs: the same records and reference time always
//! produce byte-identical bucket sequences. Partition results are
//! left-joined onto the bucketer's expected key sequence, so the output
//! length is fixed per granularity (7/7/12/5) no matter how much data
//! exists, including none.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::collections::HashMap;
use tracing::warn;

use crate::domain::{round_money, OrderRecord};
use crate::period::{self, Granularity, PeriodKey};

use super::filter;

/// Aggregated metrics for one period key
#[derive(Debug, Clone, PartialEq)]
pub struct SalesBucket {
    pub key: PeriodKey,
    /// Delivered-and-included orders
    pub orders: u64,
    /// Revenue from subtotals, delivery fees excluded, 2-digit scale
    pub total: Decimal,
    /// Units across the lines of qualifying orders
    pub units: u64,
    pub cancelled_orders: u64,
    pub cancelled_total: Decimal,
}

impl SalesBucket {
    fn zero(key: PeriodKey) -> Self {
        Self {
            key,
            orders: 0,
            total: Decimal::ZERO,
            units: 0,
            cancelled_orders: 0,
            cancelled_total: Decimal::ZERO,
        }
    }
}

/// Aggregate order records into the complete, chronologically ordered bucket
/// sequence for a granularity.
///
/// `records` should already be scoped to the report's date range (see
/// [`period::range_for`]); `year` only matters for the monthly report.
/// Records whose key falls outside the expected sequence are dropped rather
/// than failing the fill step.
pub fn aggregate_sales(
    granularity: Granularity,
    records: &[OrderRecord],
    reference: DateTime<Utc>,
    year: Option<i32>,
) -> Vec<SalesBucket> {
    let keys = period::expected_keys(granularity, reference, year);
    let mut partitions: HashMap<PeriodKey, SalesBucket> = HashMap::new();

    for record in records {
        let key = period::key_for(record.order.order_date, granularity);
        if !keys.contains(&key) {
            warn!(
                order_id = record.order.id,
                ?key,
                "order keyed outside the report range, dropping from buckets"
            );
            continue;
        }
        let bucket = partitions
            .entry(key.clone())
            .or_insert_with(|| SalesBucket::zero(key));

        let class = filter::classify(&record.order);
        if class.sales {
            bucket.orders += 1;
            bucket.total += record.order.subtotal;
            bucket.units += record.units();
        }
        if class.cancelled {
            bucket.cancelled_orders += 1;
            bucket.cancelled_total += record.order.subtotal;
        }
    }

    keys.into_iter()
        .map(|key| {
            let mut bucket = partitions
                .remove(&key)
                .unwrap_or_else(|| SalesBucket::zero(key));
            bucket.total = round_money(bucket.total);
            bucket.cancelled_total = round_money(bucket.cancelled_total);
            bucket
        })
        .collect()
}

/// Point-in-time totals for a single calendar day, the dashboard's snapshot
/// card.
#[derive(Debug, Clone, PartialEq)]
pub struct DaySnapshot {
    /// Revenue from qualifying orders, subtotals only
    pub sales: Decimal,
    /// Units across the lines of qualifying orders
    pub units: u64,
    /// Every order in the day, regardless of status or flag
    pub orders: u64,
    /// Distinct customers across every order in the day
    pub customers: u64,
}

/// Aggregate a day's records into the snapshot totals.
///
/// Order and customer counts deliberately ignore the status/inclusion
/// filter while revenue and units honor it - preserved from the observed
/// dashboard semantics.
pub fn day_snapshot(records: &[OrderRecord]) -> DaySnapshot {
    let mut sales = Decimal::ZERO;
    let mut units = 0u64;
    let mut customers = std::collections::HashSet::new();

    for record in records {
        let class = filter::classify(&record.order);
        if class.sales {
            sales += record.order.subtotal;
            units += record.units();
        }
        customers.insert(record.order.customer_id);
    }

    DaySnapshot {
        sales: round_money(sales),
        units,
        orders: records.len() as u64,
        customers: customers.len() as u64,
    }
}
