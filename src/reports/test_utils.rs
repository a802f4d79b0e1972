//! Shared test fixtures for the reporting modules.
//!
//! Builders here keep individual tests focused on the rule being exercised
//! rather than on record plumbing.

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::domain::{Order, OrderLine, OrderRecord, OrderStatus, Product, Rating, Stock};
use crate::store::MemoryStore;

/// Fixed reference time used across report tests: Thursday 2024-03-14,
/// ISO week 11.
pub fn reference_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 14, 12, 0, 0).unwrap()
}

/// Build an order record with a single line of `quantity` units
pub fn record(
    id: i64,
    status: OrderStatus,
    in_sales_report: bool,
    order_date: DateTime<Utc>,
    subtotal: Decimal,
    quantity: u32,
) -> OrderRecord {
    let order = Order::new(
        id,
        id * 100,
        format!("Customer {}", id),
        status,
        order_date,
        in_sales_report,
        subtotal,
        dec!(50.00),
    );
    let line = OrderLine::new(id, 1, "Fixture Product", quantity, subtotal);
    OrderRecord::new(order, vec![line])
}

/// A delivered, report-included order - the kind that counts toward sales
pub fn delivered(id: i64, order_date: DateTime<Utc>, subtotal: Decimal) -> OrderRecord {
    record(id, OrderStatus::Delivered, true, order_date, subtotal, 1)
}

/// A cancelled order
pub fn cancelled(id: i64, order_date: DateTime<Utc>, subtotal: Decimal) -> OrderRecord {
    record(id, OrderStatus::Cancelled, true, order_date, subtotal, 1)
}

pub fn product(id: i64, name: &str) -> Product {
    Product {
        id,
        name: name.to_string(),
        description: format!("{} description", name),
        price: dec!(199.00),
        image_url: Some(format!("/images/{}.jpg", id)),
        category: "beverages".to_string(),
        deleted: false,
    }
}

pub fn stock(product_id: i64, quantity: i64, at: DateTime<Utc>) -> Stock {
    Stock {
        id: product_id,
        product_id,
        quantity,
        last_updated: at,
    }
}

pub fn rating(product_id: i64, value: Decimal, at: DateTime<Utc>) -> Rating {
    Rating::new(product_id, value, at)
}

/// Seed a store with a small, realistic catalog: two products, one with
/// order history and ratings, one untouched.
pub async fn seeded_store() -> MemoryStore {
    let now = reference_time();
    let store = MemoryStore::new();

    store.add_product(product(1, "Arabica Beans 500g")).await;
    store.add_product(product(2, "Ceramic Pour-Over Set")).await;
    store.add_stock(stock(1, 25, now)).await;
    store.add_stock(stock(2, 8, now)).await;
    store.add_rating(rating(1, dec!(4), now - chrono::Duration::days(2))).await;
    store.add_rating(rating(1, dec!(5), now - chrono::Duration::days(1))).await;

    let order = Order::new(
        1,
        100,
        "Maria Santos",
        OrderStatus::Delivered,
        now - chrono::Duration::days(1),
        true,
        dec!(398.00),
        dec!(50.00),
    );
    let lines = vec![OrderLine::new(1, 1, "Arabica Beans 500g", 2, dec!(199.00))];
    store.add_order(order, lines).await;

    store
}
