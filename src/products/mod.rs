//! Product saleability classification and performance tiers.
//!
//! Works over the joined [`ProductFacts`] rows the store produces. Saleability
//! is a strict three-way conjunction (order history, rating threshold,
//! positive stock); performance tiers operate over a trailing sales window
//! and are independent of each other - a product can legitimately appear in
//! more than one tier.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::config::ReportConfig;
use crate::store::ProductFacts;

#[cfg(test)]
mod classify_test;

/// A product with its computed saleability verdict
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyzedProduct {
    #[serde(flatten)]
    pub facts: ProductFacts,
    #[serde(rename = "isSaleable")]
    pub is_saleable: bool,
}

/// Saleability split across the live catalog
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductAnalytics {
    pub saleable_products: Vec<AnalyzedProduct>,
    pub non_saleable_products: Vec<AnalyzedProduct>,
    pub total_products: u64,
    pub saleable_count: u64,
    pub non_saleable_count: u64,
}

/// Performance tiers over the trailing sales window.
///
/// The wire field names mirror the dashboard payload: the top tier ships as
/// `saleableProducts` and the low tier as `nonSaleableProducts`, distinct
/// from the saleability split above.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductPerformance {
    /// Every live product, ranked by lifetime units sold
    pub performance: Vec<ProductFacts>,
    /// Top performers: lifetime units strictly above the threshold
    #[serde(rename = "saleableProducts")]
    pub top_performers: Vec<ProductFacts>,
    /// Low performers: in stock with limited recent sales
    #[serde(rename = "nonSaleableProducts")]
    pub low_performers: Vec<ProductFacts>,
    /// Products whose latest rating falls in the trailing rated window
    #[serde(rename = "ratedProducts")]
    pub recently_rated: Vec<ProductFacts>,
}

/// True when a product passes the three-way saleability test.
///
/// No partial credit: at least one historical order, average rating at or
/// above the threshold, and positive current stock.
pub fn is_saleable(facts: &ProductFacts, config: &ReportConfig) -> bool {
    facts.total_orders > 0
        && facts.avg_rating >= config.saleable_min_rating
        && facts.current_stock > 0
}

/// Split the live catalog by saleability
pub fn analyze_saleability(facts: Vec<ProductFacts>, config: &ReportConfig) -> ProductAnalytics {
    let total_products = facts.len() as u64;
    let mut saleable_products = Vec::new();
    let mut non_saleable_products = Vec::new();

    for item in facts {
        let verdict = is_saleable(&item, config);
        let analyzed = AnalyzedProduct {
            facts: item,
            is_saleable: verdict,
        };
        if verdict {
            saleable_products.push(analyzed);
        } else {
            non_saleable_products.push(analyzed);
        }
    }

    ProductAnalytics {
        saleable_count: saleable_products.len() as u64,
        non_saleable_count: non_saleable_products.len() as u64,
        saleable_products,
        non_saleable_products,
        total_products,
    }
}

/// Compute performance tiers from the joined facts.
///
/// Ranking sorts are stable, so products with equal ranking values keep
/// their original query order - no secondary key is imposed.
pub fn performance_tiers(
    facts: Vec<ProductFacts>,
    reference: DateTime<Utc>,
    config: &ReportConfig,
) -> ProductPerformance {
    let mut performance = facts;
    performance.sort_by(|a, b| b.total_units_sold.cmp(&a.total_units_sold));

    let top_performers: Vec<ProductFacts> = performance
        .iter()
        .filter(|p| p.total_units_sold > config.top_performer_min_units)
        .cloned()
        .collect();

    let (low_min, low_max) = config.low_performer_units;
    let mut low_performers: Vec<ProductFacts> = performance
        .iter()
        .filter(|p| p.current_stock > 0 && p.recent_sales >= low_min && p.recent_sales <= low_max)
        .cloned()
        .collect();
    low_performers.sort_by(|a, b| b.recent_sales.cmp(&a.recent_sales));

    let rated_since = reference - Duration::days(config.rated_window_days);
    let recently_rated: Vec<ProductFacts> = performance
        .iter()
        .filter(|p| p.latest_rating_date.is_some_and(|at| at >= rated_since))
        .cloned()
        .collect();

    ProductPerformance {
        performance,
        top_performers,
        low_performers,
        recently_rated,
    }
}
