//! Fixed-offset conversion between storage time and display time.
//!
//! Timestamps are stored in UTC; the dashboard displays them in local store
//! time, a static +8h offset (no DST). This module is the only place the
//! offset lives - both the read-presentation path and the order-date edit
//! write path call through here, so a date round-trips edit-and-redisplay
//! losslessly.

use chrono::{DateTime, FixedOffset, Utc};

/// Display timezone offset from UTC, in hours
pub const DISPLAY_OFFSET_HOURS: i32 = 8;

fn display_offset() -> FixedOffset {
    // 8h is statically inside FixedOffset's valid range
    FixedOffset::east_opt(DISPLAY_OFFSET_HOURS * 3600).expect("display offset in range")
}

/// Convert a stored UTC timestamp to display time
pub fn to_display(utc: DateTime<Utc>) -> DateTime<FixedOffset> {
    utc.with_timezone(&display_offset())
}

/// Convert a user-supplied display timestamp back to UTC for persistence
pub fn to_storage(local: DateTime<FixedOffset>) -> DateTime<Utc> {
    local.with_timezone(&Utc)
}
