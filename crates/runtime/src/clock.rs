//! Wall-clock conversions.
//!
//! The engine consumes plain unix seconds, day numbers, and ISO week ids;
//! this module is the only place the runtime talks to `chrono`. Keeping
//! the conversions here preserves the core's purity and makes gating
//! logic testable with fabricated timestamps.

use chrono::{DateTime, Datelike, Utc};
use venture_core::RaidWeek;

/// Current wall time as unix seconds.
pub fn now_unix() -> i64 {
    Utc::now().timestamp()
}

/// Day number (days since the unix epoch) for daily attempt gating.
///
/// Day boundaries follow UTC; a deployment that wants player-local resets
/// can shift the timestamp before calling in.
pub fn day_number(unix: i64) -> i64 {
    unix.div_euclid(86_400)
}

/// ISO week identity for the weekly raid boss rotation.
pub fn raid_week(unix: i64) -> RaidWeek {
    let datetime = DateTime::<Utc>::from_timestamp(unix, 0).unwrap_or_default();
    let iso = datetime.iso_week();
    RaidWeek {
        year: iso.year(),
        week: iso.week(),
    }
}
