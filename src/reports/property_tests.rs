//! Property-based tests for aggregation integrity

use super::aggregate::aggregate_sales;
use super::filter;
use super::test_utils::{record, reference_time};
use crate::domain::OrderStatus;
use crate::period::Granularity;
use chrono::Duration;
use proptest::prelude::*;
use rust_decimal::Decimal;

fn any_status() -> impl Strategy<Value = OrderStatus> {
    prop_oneof![
        Just(OrderStatus::Pending),
        Just(OrderStatus::Processing),
        Just(OrderStatus::Shipped),
        Just(OrderStatus::Delivered),
        Just(OrderStatus::Cancelled),
        Just(OrderStatus::Returned),
        Just(OrderStatus::Refunded),
        Just(OrderStatus::ReturnCancelled),
    ]
}

/// An order somewhere in the last five years, any status and flag
fn any_record() -> impl Strategy<Value = crate::domain::OrderRecord> {
    (
        1i64..10_000,
        any_status(),
        any::<bool>(),
        0i64..1500,        // days back from the reference time
        1i64..100_000,     // subtotal in cents
        1u32..20,
    )
        .prop_map(|(id, status, flag, days_back, cents, quantity)| {
            record(
                id,
                status,
                flag,
                reference_time() - Duration::days(days_back),
                Decimal::new(cents, 2),
                quantity,
            )
        })
}

proptest! {
    #[test]
    fn prop_bucket_count_is_fixed_per_granularity(records in prop::collection::vec(any_record(), 0..60)) {
        let now = reference_time();
        prop_assert_eq!(aggregate_sales(Granularity::Daily, &records, now, None).len(), 7);
        prop_assert_eq!(aggregate_sales(Granularity::Weekly, &records, now, None).len(), 7);
        prop_assert_eq!(aggregate_sales(Granularity::Monthly, &records, now, None).len(), 12);
        prop_assert_eq!(aggregate_sales(Granularity::Yearly, &records, now, None).len(), 5);
    }

    #[test]
    fn prop_totals_are_never_negative(records in prop::collection::vec(any_record(), 0..60)) {
        let now = reference_time();
        for bucket in aggregate_sales(Granularity::Yearly, &records, now, None) {
            prop_assert!(bucket.total >= Decimal::ZERO);
            prop_assert!(bucket.cancelled_total >= Decimal::ZERO);
        }
    }

    #[test]
    fn prop_yearly_conserves_qualifying_orders(records in prop::collection::vec(any_record(), 0..60)) {
        // Every in-range qualifying order lands in exactly one bucket
        let now = reference_time();
        let buckets = aggregate_sales(Granularity::Yearly, &records, now, None);
        let bucketed: u64 = buckets.iter().map(|b| b.orders).sum();
        let expected = records
            .iter()
            .filter(|r| filter::classify(&r.order).sales)
            .count() as u64;
        prop_assert_eq!(bucketed, expected);
    }

    #[test]
    fn prop_sales_and_cancelled_disjoint(records in prop::collection::vec(any_record(), 0..60)) {
        for r in &records {
            let class = filter::classify(&r.order);
            prop_assert!(!(class.sales && class.cancelled));
        }
    }

    #[test]
    fn prop_aggregation_idempotent(records in prop::collection::vec(any_record(), 0..40)) {
        let now = reference_time();
        for granularity in [Granularity::Daily, Granularity::Weekly, Granularity::Monthly, Granularity::Yearly] {
            let first = aggregate_sales(granularity, &records, now, None);
            let second = aggregate_sales(granularity, &records, now, None);
            prop_assert_eq!(first, second);
        }
    }
}

proptest! {
    #[test]
    fn prop_timezone_round_trip(secs in 0i64..4_000_000_000) {
        use chrono::{DateTime, Utc};
        let utc = DateTime::<Utc>::from_timestamp(secs, 0).unwrap();
        prop_assert_eq!(crate::timezone::to_storage(crate::timezone::to_display(utc)), utc);
    }
}
