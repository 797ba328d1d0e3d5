//! Pure date/time arithmetic used by chart bucketing.

use chrono::{DateTime, TimeZone};

const MS_PER_HOUR: f64 = 3_600_000.0;

/// Gregorian leap year: divisible by 4, except centuries not divisible by 400.
pub fn is_leap_year(year: i32) -> bool {
    if year % 100 == 0 {
        year % 400 == 0
    } else {
        year % 4 == 0
    }
}

/// Number of days in `month` (1–12) of `year`.
///
/// # Panics
/// If `month` is outside 1–12. Months are always derived from a real
/// timestamp, so an invalid one is a bug in the caller.
pub fn days_in_month(month: u32, year: i32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => panic!("month out of range: {month}"),
    }
}

/// Fractional hours from `earlier` to `later`.
///
/// Negative when `later` precedes `earlier`; callers treat that as a clock anomaly.
pub fn hours_between<Tz1: TimeZone, Tz2: TimeZone>(
    earlier: &DateTime<Tz1>,
    later: &DateTime<Tz2>,
) -> f64 {
    let ms = later.timestamp_millis() - earlier.timestamp_millis();
    ms as f64 / MS_PER_HOUR
}
