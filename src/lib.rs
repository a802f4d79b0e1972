//! Reporting and analytics engine for a small e-commerce admin backend.
//!
//! This crate turns raw order, product, rating, and stock records into the
//! period-bucketed, business-rule-filtered summaries an admin dashboard
//! displays: daily/weekly/monthly/yearly sales, product saleability
//! classification, and product performance tiers.
//!
//! # Overview
//!
//! The engine consists of several key components:
//!
//! - **Period Bucketer** ([`period`]): the canonical, ordered set of period
//!   keys for a reporting granularity, independent of how much data exists
//! - **Record Filter** ([`reports::filter`]): the business predicates that
//!   decide whether an order counts toward sales, cancellations, or neither
//! - **Aggregator** ([`reports::aggregate`]): pure partition/sum/zero-fill of
//!   order records onto the expected key sequence
//! - **Product Classifier** ([`products`]): saleability and performance tiers
//!   derived from joined product/order/rating/stock facts
//! - **Timezone Normalizer** ([`timezone`]): the single fixed-offset
//!   conversion between storage (UTC) and display time
//!
//! Data access goes through the [`store::ReportStore`] capability trait; the
//! dispatcher and CRUD handlers that sit around this engine are external
//! collaborators and only consume its typed responses.
//!
//! # Example
//!
//! ```no_run
//! use storefront_admin::{ReportEngine, ReportConfig};
//! use storefront_admin::store::MemoryStore;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Arc::new(MemoryStore::new());
//! let engine = ReportEngine::new(store, ReportConfig::default());
//!
//! let daily = engine.daily_sales().await?;
//! for bucket in &daily {
//!     println!("{}: {} orders, {}", bucket.period, bucket.orders, bucket.total);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! All public APIs return `Result<T, AdminError>`. Store failures surface as
//! opaque errors mapped to a 500-style status; missing singular resources map
//! to 404. Malformed request parameters never fail a report request - they
//! are replaced by current-period defaults at the [`query`] boundary.

pub mod config;
pub mod domain;
pub mod error;
pub mod period;
pub mod products;
pub mod query;
pub mod reports;
pub mod store;
pub mod timezone;


// Re-export commonly used types
pub use config::ReportConfig;
pub use error::{AdminError, Result};
pub use reports::ReportEngine;

/// Version information for the engine
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
