//! Engine configuration.
//!
//! The defaults encode the business rules the dashboard was built around;
//! embedders normally use `ReportConfig::default()` and only override in
//! tests.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Configuration for the report engine
///
/// # Fields
///
/// * `saleable_min_rating` - average rating a product needs to be saleable
/// * `top_performer_min_units` - lifetime units a top performer must exceed
/// * `low_performer_units` - inclusive recent-units range for low performers
/// * `recent_sales_window_days` - trailing window for performance tiers
/// * `rated_window_days` - trailing window for the recently-rated list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Minimum average rating for saleability (inclusive)
    pub saleable_min_rating: Decimal,
    /// Lifetime units sold must be strictly greater than this for the
    /// top-performer tier
    pub top_performer_min_units: u64,
    /// Inclusive [min, max] recent-window units for the low-performer tier
    pub low_performer_units: (u64, u64),
    /// Trailing window in days for recent-sales tiering
    pub recent_sales_window_days: i64,
    /// Trailing window in days for the recently-rated list
    pub rated_window_days: i64,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            saleable_min_rating: Decimal::new(35, 1), // 3.5
            top_performer_min_units: 8,
            low_performer_units: (1, 3),
            recent_sales_window_days: 14,
            rated_window_days: 7,
        }
    }
}
