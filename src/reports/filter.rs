//! Business predicates deciding how an order contributes to report metrics.
//!
//! Sales revenue and unit counts require a Delivered order with the
//! inclusion flag set; the cancelled-total metric looks only at status; raw
//! order and distinct-customer counts apply to every order in the queried
//! range regardless of status or flag. The memberships are independent
//! except that sales and the return-side view are disjoint by construction.

use crate::domain::{Order, OrderStatus};

/// Metric memberships for a single order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderClass {
    /// Counts toward sales revenue and unit totals
    pub sales: bool,
    /// Counts toward the cancelled-order total
    pub cancelled: bool,
    /// Counts toward raw order count and distinct-customer count
    pub counted: bool,
    /// Belongs to the return-requests view
    pub return_view: bool,
}

/// Classify an order against the reporting business rules
pub fn classify(order: &Order) -> OrderClass {
    OrderClass {
        sales: order.status == OrderStatus::Delivered && order.in_sales_report,
        cancelled: order.status == OrderStatus::Cancelled,
        counted: true,
        return_view: order.status.is_return_side(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn order(status: OrderStatus, in_sales_report: bool) -> Order {
        Order::new(
            1,
            1,
            "Test Buyer",
            status,
            Utc::now(),
            in_sales_report,
            dec!(100.00),
            dec!(10.00),
        )
    }

    #[test]
    fn test_sales_requires_delivered_and_flag() {
        assert!(classify(&order(OrderStatus::Delivered, true)).sales);
        assert!(!classify(&order(OrderStatus::Delivered, false)).sales);
        assert!(!classify(&order(OrderStatus::Shipped, true)).sales);
    }

    #[test]
    fn test_cancelled_ignores_inclusion_flag() {
        assert!(classify(&order(OrderStatus::Cancelled, false)).cancelled);
        assert!(classify(&order(OrderStatus::Cancelled, true)).cancelled);
        assert!(!classify(&order(OrderStatus::Delivered, true)).cancelled);
    }

    #[test]
    fn test_sales_and_cancelled_are_disjoint() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Processing,
            OrderStatus::Shipped,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
            OrderStatus::Returned,
            OrderStatus::Refunded,
            OrderStatus::ReturnCancelled,
        ] {
            for flag in [true, false] {
                let class = classify(&order(status, flag));
                assert!(!(class.sales && class.cancelled), "{status:?} flag={flag}");
                assert!(!(class.sales && class.return_view), "{status:?} flag={flag}");
            }
        }
    }

    #[test]
    fn test_every_order_is_counted() {
        assert!(classify(&order(OrderStatus::Cancelled, false)).counted);
        assert!(classify(&order(OrderStatus::Pending, false)).counted);
    }

    #[test]
    fn test_return_view_statuses() {
        assert!(classify(&order(OrderStatus::Returned, true)).return_view);
        assert!(classify(&order(OrderStatus::Refunded, true)).return_view);
        assert!(classify(&order(OrderStatus::ReturnCancelled, true)).return_view);
        assert!(!classify(&order(OrderStatus::Delivered, true)).return_view);
    }
}
