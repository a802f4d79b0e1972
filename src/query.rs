//! Query-string parameter parsing.
//!
//! The dispatcher hands request parameters through as key/value pairs. This
//! layer turns them into typed values, favoring availability over
//! strictness: a malformed or missing parameter is replaced by the
//! current-period default with a warning, never rejected.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use std::collections::HashMap;
use tracing::warn;

use crate::period::Granularity;

/// Trailing-window choices for the rated-products counter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatedTimeFrame {
    Today,
    Yesterday,
    LastWeek,
    LastMonth,
}

/// Parsed request parameters
#[derive(Debug, Clone, Default)]
pub struct QueryParams {
    values: HashMap<String, String>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a raw query string (`"year=2023&page=2"`). Malformed pairs are
    /// skipped; duplicate keys keep the last value.
    pub fn from_query_str(raw: &str) -> Self {
        let mut values = HashMap::new();
        for pair in raw.split('&').filter(|p| !p.is_empty()) {
            match pair.split_once('=') {
                Some((key, value)) if !key.is_empty() => {
                    values.insert(key.to_string(), value.to_string());
                }
                _ => warn!(pair, "skipping malformed query pair"),
            }
        }
        Self { values }
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Reporting year, defaulting to the current year when absent or
    /// unparseable.
    pub fn year(&self, now: DateTime<Utc>) -> i32 {
        match self.get("year") {
            None => now.year(),
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                warn!(raw, "unparseable year parameter, defaulting to current");
                now.year()
            }),
        }
    }

    /// Report date (`date=YYYY-MM-DD`), defaulting to today when absent or
    /// unparseable.
    pub fn date(&self, now: DateTime<Utc>) -> NaiveDate {
        match self.get("date") {
            None => now.date_naive(),
            Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d").unwrap_or_else(|_| {
                warn!(raw, "unparseable date parameter, defaulting to today");
                now.date_naive()
            }),
        }
    }

    /// Sales timeframe (`timeframe=daily|weekly|monthly|yearly`), defaulting
    /// to daily.
    pub fn timeframe(&self) -> Granularity {
        match self.get("timeframe") {
            None => Granularity::Daily,
            Some("daily") => Granularity::Daily,
            Some("weekly") => Granularity::Weekly,
            Some("monthly") => Granularity::Monthly,
            Some("yearly") => Granularity::Yearly,
            Some(raw) => {
                warn!(raw, "unknown timeframe parameter, defaulting to daily");
                Granularity::Daily
            }
        }
    }

    /// Rated-products window (`timeFrame=today|yesterday|lastWeek|lastMonth`),
    /// defaulting to today.
    pub fn rated_time_frame(&self) -> RatedTimeFrame {
        match self.get("timeFrame") {
            None => RatedTimeFrame::Today,
            Some("today") => RatedTimeFrame::Today,
            Some("yesterday") => RatedTimeFrame::Yesterday,
            Some("lastWeek") => RatedTimeFrame::LastWeek,
            Some("lastMonth") => RatedTimeFrame::LastMonth,
            Some(raw) => {
                warn!(raw, "unknown timeFrame parameter, defaulting to today");
                RatedTimeFrame::Today
            }
        }
    }
}
