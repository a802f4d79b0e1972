//! Tests for saleability classification and performance tiers

use super::*;
use crate::domain::Product;
use chrono::TimeZone;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 14, 12, 0, 0).unwrap()
}

fn facts(id: i64) -> ProductFacts {
    ProductFacts {
        product: Product {
            id,
            name: format!("Product {}", id),
            description: String::new(),
            price: dec!(199.00),
            image_url: None,
            category: "general".to_string(),
            deleted: false,
        },
        current_stock: 5,
        avg_rating: dec!(4.0),
        rating_count: 3,
        total_orders: 2,
        total_units_sold: 4,
        recent_sales: 0,
        latest_rating_date: None,
        returned_count: 0,
    }
}

#[test]
fn test_saleability_is_strict_conjunction() {
    let config = ReportConfig::default();
    let base = facts(1);
    assert!(is_saleable(&base, &config));

    // Flipping any single leg moves the product to non-saleable
    let mut no_orders = base.clone();
    no_orders.total_orders = 0;
    assert!(!is_saleable(&no_orders, &config));

    let mut low_rating = base.clone();
    low_rating.avg_rating = dec!(3.4);
    assert!(!is_saleable(&low_rating, &config));

    let mut no_stock = base.clone();
    no_stock.current_stock = 0;
    assert!(!is_saleable(&no_stock, &config));
}

#[test]
fn test_rating_threshold_is_inclusive() {
    let config = ReportConfig::default();
    let mut item = facts(1);
    item.avg_rating = dec!(3.5);
    assert!(is_saleable(&item, &config));
}

#[test]
fn test_zero_order_history_never_saleable() {
    // High rating and deep stock cannot compensate for no order history
    let config = ReportConfig::default();
    let mut item = facts(1);
    item.total_orders = 0;
    item.avg_rating = dec!(5.0);
    item.current_stock = 1000;
    let analytics = analyze_saleability(vec![item], &config);
    assert!(analytics.saleable_products.is_empty());
    assert_eq!(analytics.non_saleable_count, 1);
}

#[test]
fn test_analytics_counts_are_consistent() {
    let config = ReportConfig::default();
    let mut unsold = facts(2);
    unsold.total_orders = 0;
    let analytics = analyze_saleability(vec![facts(1), unsold, facts(3)], &config);
    assert_eq!(analytics.total_products, 3);
    assert_eq!(analytics.saleable_count, 2);
    assert_eq!(analytics.non_saleable_count, 1);
    assert_eq!(
        analytics.saleable_count + analytics.non_saleable_count,
        analytics.total_products
    );
    assert!(analytics.saleable_products.iter().all(|p| p.is_saleable));
    assert!(analytics.non_saleable_products.iter().all(|p| !p.is_saleable));
}

#[test]
fn test_top_and_low_tiers_are_independent() {
    // 10 lifetime units (> 8) and 2 recent units in [1, 3] with stock:
    // the same product lands in both tiers
    let config = ReportConfig::default();
    let mut item = facts(1);
    item.total_units_sold = 10;
    item.recent_sales = 2;
    item.current_stock = 5;

    let tiers = performance_tiers(vec![item], now(), &config);
    assert_eq!(tiers.top_performers.len(), 1);
    assert_eq!(tiers.low_performers.len(), 1);
    assert_eq!(tiers.top_performers[0].product.id, 1);
    assert_eq!(tiers.low_performers[0].product.id, 1);
}

#[test]
fn test_top_performer_threshold_is_strict() {
    let config = ReportConfig::default();
    let mut at_threshold = facts(1);
    at_threshold.total_units_sold = 8;
    let mut above = facts(2);
    above.total_units_sold = 9;

    let tiers = performance_tiers(vec![at_threshold, above], now(), &config);
    assert_eq!(tiers.top_performers.len(), 1);
    assert_eq!(tiers.top_performers[0].product.id, 2);
}

#[test]
fn test_zero_recent_sales_is_not_a_low_performer() {
    let config = ReportConfig::default();
    let mut item = facts(1);
    item.total_units_sold = 20;
    item.recent_sales = 0;
    item.current_stock = 10;

    let tiers = performance_tiers(vec![item], now(), &config);
    assert!(tiers.low_performers.is_empty());
    // Historical sales still place it in the top tier
    assert_eq!(tiers.top_performers.len(), 1);
}

#[test]
fn test_low_performer_requires_stock() {
    let config = ReportConfig::default();
    let mut item = facts(1);
    item.recent_sales = 2;
    item.current_stock = 0;

    let tiers = performance_tiers(vec![item], now(), &config);
    assert!(tiers.low_performers.is_empty());
}

#[test]
fn test_performance_ranked_by_lifetime_units() {
    let config = ReportConfig::default();
    let mut a = facts(1);
    a.total_units_sold = 3;
    let mut b = facts(2);
    b.total_units_sold = 12;
    let mut c = facts(3);
    c.total_units_sold = 7;

    let tiers = performance_tiers(vec![a, b, c], now(), &config);
    let ranked: Vec<i64> = tiers.performance.iter().map(|p| p.product.id).collect();
    assert_eq!(ranked, vec![2, 3, 1]);
}

#[test]
fn test_equal_ranks_keep_query_order() {
    let config = ReportConfig::default();
    let mut a = facts(1);
    a.total_units_sold = 9;
    let mut b = facts(2);
    b.total_units_sold = 9;
    let mut c = facts(3);
    c.total_units_sold = 9;

    let tiers = performance_tiers(vec![a, b, c], now(), &config);
    let ranked: Vec<i64> = tiers.top_performers.iter().map(|p| p.product.id).collect();
    assert_eq!(ranked, vec![1, 2, 3]);
}

#[test]
fn test_recently_rated_window_is_seven_days() {
    let config = ReportConfig::default();
    let mut fresh = facts(1);
    fresh.latest_rating_date = Some(now() - Duration::days(6));
    let mut stale = facts(2);
    stale.latest_rating_date = Some(now() - Duration::days(8));
    let mut unrated = facts(3);
    unrated.latest_rating_date = None;

    let tiers = performance_tiers(vec![fresh, stale, unrated], now(), &config);
    assert_eq!(tiers.recently_rated.len(), 1);
    assert_eq!(tiers.recently_rated[0].product.id, 1);
}

#[test]
fn test_rated_window_independent_of_sales_window() {
    // A rating 10 days back is outside the 7-day rated window even though
    // the sales tiers look back 14 days
    let config = ReportConfig::default();
    let mut item = facts(1);
    item.latest_rating_date = Some(now() - Duration::days(10));
    item.recent_sales = 2;

    let tiers = performance_tiers(vec![item], now(), &config);
    assert!(tiers.recently_rated.is_empty());
    assert_eq!(tiers.low_performers.len(), 1);
}

#[test]
fn test_avg_rating_bound_for_saleability() {
    let config = ReportConfig::default();
    let mut unrated = facts(1);
    unrated.avg_rating = Decimal::ZERO;
    unrated.rating_count = 0;
    assert!(!is_saleable(&unrated, &config));
}
