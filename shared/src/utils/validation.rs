//! Common validation utilities

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone};
use once_cell::sync::Lazy;
use regex::Regex;

/// Layout of every date-time string accepted from clients
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}$").unwrap()
});

/// Check if an email address is well formed
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Parse `YYYY-MM-DD HH:MM:SS` as a wall-clock time in `zone`
///
/// # Returns
/// `None` when the string does not follow the layout
pub fn parse_local_date_time(value: &str, zone: FixedOffset) -> Option<DateTime<FixedOffset>> {
    let naive = NaiveDateTime::parse_from_str(value.trim(), DATE_TIME_FORMAT).ok()?;
    zone.from_local_datetime(&naive).single()
}
