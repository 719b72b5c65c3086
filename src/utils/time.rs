use std::fmt::Display;
use std::time::Duration;

use chrono::{DateTime, TimeZone};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

pub fn format_timestamp<Tz: TimeZone>(ts: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Seconds with exactly six fractional digits, e.g. `0.000123`.
pub fn format_elapsed(d: Duration) -> String {
    format!("{}.{:06}", d.as_secs(), d.subsec_micros())
}
