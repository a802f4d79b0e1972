//! Period bucketing for sales reports.
//!
//! Maps raw timestamps to reporting period keys and produces the canonical,
//! ordered key sequence a report must contain - independent of whether any
//! underlying data exists for a key. The aggregator left-joins its partition
//! results onto these sequences and zero-fills the gaps.
//!
//! Bucketing operates on stored (UTC) timestamps; the display offset only
//! applies at the listing/edit boundary, never here.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};


/// Reporting granularity for sales aggregation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

/// Canonical label identifying a reporting bucket.
///
/// Equality doubles as the join key between aggregated partitions and the
/// expected key sequence, so `Week` carries its computed calendar bounds
/// rather than observed data dates - two weeks with the same number in
/// different years never collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PeriodKey {
    /// Day of week within the report week
    Day(Weekday),
    /// ISO week with its computed Monday/Sunday bounds
    Week {
        number: u32,
        start: NaiveDate,
        end: NaiveDate,
    },
    /// Calendar month, 1-12
    Month(u32),
    /// Calendar year
    Year(i32),
}

impl PeriodKey {
    /// Human-readable label used in response payloads
    pub fn label(&self) -> String {
        match self {
            Self::Day(weekday) => day_name(*weekday).to_string(),
            Self::Week { number, start, end } => {
                format!(
                    "Week {} ({} - {})",
                    number,
                    format_short_date(*start),
                    format_short_date(*end)
                )
            }
            Self::Month(month) => month.to_string(),
            Self::Year(year) => year.to_string(),
        }
    }
}

/// Full day name, Sunday-first ordering elsewhere
fn day_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Sun => "Sunday",
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
    }
}

/// M/D/YYYY, the format the dashboard renders week bounds in
fn format_short_date(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.month(), date.day(), date.year())
}

/// Sunday that starts the report week containing `date`.
///
/// The daily report is ordered Sunday through Saturday, so its scope is the
/// Sunday-start week around the reference date.
pub fn week_sunday(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_sunday() as i64)
}

/// Monday that starts the ISO week containing `date`
pub fn iso_week_monday(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// Week key with computed calendar bounds for the ISO week containing `date`
fn week_key(date: NaiveDate) -> PeriodKey {
    let start = iso_week_monday(date);
    PeriodKey::Week {
        number: date.iso_week().week(),
        start,
        end: start + Duration::days(6),
    }
}

/// Map a stored timestamp to its bucket key for a granularity.
///
/// The result may fall outside the expected sequence for a report (data
/// anomalies, clock skew); the aggregator drops such keys rather than
/// failing the bucket-fill step.
pub fn key_for(timestamp: DateTime<Utc>, granularity: Granularity) -> PeriodKey {
    let date = timestamp.date_naive();
    match granularity {
        Granularity::Daily => PeriodKey::Day(date.weekday()),
        Granularity::Weekly => week_key(date),
        Granularity::Monthly => PeriodKey::Month(date.month()),
        Granularity::Yearly => PeriodKey::Year(date.year()),
    }
}

/// The complete, ordered key sequence a report at this granularity must
/// contain.
///
/// * Daily: 7 keys, Sunday through Saturday
/// * Weekly: the 7 most recent ISO weeks ending at the reference week
/// * Monthly: months 1-12 of `year` (reference year when `None`)
/// * Yearly: the reference year and the four preceding years, ascending
pub fn expected_keys(
    granularity: Granularity,
    reference: DateTime<Utc>,
    year: Option<i32>,
) -> Vec<PeriodKey> {
    let today = reference.date_naive();
    match granularity {
        Granularity::Daily => [
            Weekday::Sun,
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
        ]
        .into_iter()
        .map(PeriodKey::Day)
        .collect(),
        Granularity::Weekly => {
            let current_monday = iso_week_monday(today);
            (0..7)
                .rev()
                .map(|weeks_back| week_key(current_monday - Duration::weeks(weeks_back)))
                .collect()
        }
        Granularity::Monthly => (1..=12).map(PeriodKey::Month).collect(),
        Granularity::Yearly => {
            let current = year.unwrap_or_else(|| today.year());
            (current - 4..=current).map(PeriodKey::Year).collect()
        }
    }
}

/// The stored-timestamp window a report at this granularity reads.
///
/// Half-open `[since, until)` in UTC.
pub fn range_for(
    granularity: Granularity,
    reference: DateTime<Utc>,
    year: Option<i32>,
) -> (DateTime<Utc>, DateTime<Utc>) {
    let today = reference.date_naive();
    let (start, end) = match granularity {
        Granularity::Daily => {
            let sunday = week_sunday(today);
            (sunday, sunday + Duration::days(7))
        }
        Granularity::Weekly => {
            let monday = iso_week_monday(today);
            (monday - Duration::weeks(6), monday + Duration::days(7))
        }
        Granularity::Monthly => {
            let y = year.unwrap_or_else(|| today.year());
            (first_of_year(y), first_of_year(y + 1))
        }
        Granularity::Yearly => {
            let y = year.unwrap_or_else(|| today.year());
            (first_of_year(y - 4), first_of_year(y + 1))
        }
    };
    (day_start(start), day_start(end))
}

/// The stored-timestamp window covering the single current period at this
/// granularity: today, the current report week, the current month, or the
/// current year. Half-open `[since, until)` in UTC. Used by point-in-time
/// views (timeframe sales detail), as opposed to the bucketed history
/// windows of [`range_for`].
pub fn current_range(
    granularity: Granularity,
    reference: DateTime<Utc>,
) -> (DateTime<Utc>, DateTime<Utc>) {
    let today = reference.date_naive();
    let (start, end) = match granularity {
        Granularity::Daily => (today, today + Duration::days(1)),
        Granularity::Weekly => {
            let sunday = week_sunday(today);
            (sunday, sunday + Duration::days(7))
        }
        Granularity::Monthly => {
            let first = today.with_day(1).unwrap_or(today);
            let next = if today.month() == 12 {
                first_of_year(today.year() + 1)
            } else {
                NaiveDate::from_ymd_opt(today.year(), today.month() + 1, 1).unwrap_or(first)
            };
            (first, next)
        }
        Granularity::Yearly => (first_of_year(today.year()), first_of_year(today.year() + 1)),
    };
    (day_start(start), day_start(end))
}

fn first_of_year(year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Midnight UTC at the start of `date`
pub fn day_start(date: NaiveDate) -> DateTime<Utc> {
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc())
        .unwrap_or_else(Utc::now)
}
