//! Timestamp utilities: entry timestamps and recovery file stamps.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Timelike};

/// Current local time as an entry timestamp, e.g. `2025-01-01 WED 09:30:12.07`.
pub fn get_timestamp() -> String {
    format_timestamp(&Local::now())
}

/// Format any zoned datetime as `YYYY-MM-DD DOW HH:MM:SS.cc`.
///
/// The weekday is the uppercase three-letter abbreviation, the fraction is
/// truncated (not rounded) to centiseconds so that the string sorts the same
/// way the instants do.
pub fn format_timestamp<Tz: TimeZone>(dt: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let weekday = dt.format("%a").to_string().to_uppercase();
    // leap seconds report nanos >= 1_000_000_000
    let centis = (dt.nanosecond() / 10_000_000).min(99);
    format!(
        "{} {} {}.{:02}",
        dt.format("%Y-%m-%d"),
        weekday,
        dt.format("%H:%M:%S"),
        centis
    )
}

/// Millisecond stamp used in recovery file names: `YYYYMMDD_HHMMSS_mmm`.
pub fn file_stamp<Tz: TimeZone>(dt: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let millis = (dt.nanosecond() / 1_000_000).min(999);
    format!("{}_{:03}", dt.format("%Y%m%d_%H%M%S"), millis)
}

/// Parse an entry timestamp back into a naive local time; the weekday is ignored.
pub fn parse_timestamp(ts: &str) -> Option<NaiveDateTime> {
    let mut parts = ts.split_whitespace();
    let date = parts.next()?;
    let _weekday = parts.next()?;
    let time = parts.next()?;
    NaiveDateTime::parse_from_str(&format!("{} {}", date, time), "%Y-%m-%d %H:%M:%S%.f").ok()
}
