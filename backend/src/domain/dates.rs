//! Date and timestamp helpers shared by the domain services.

use anyhow::Result;
use chrono::{Duration, Local, NaiveDate, SecondsFormat, Utc};

use crate::domain::models::ValidationError;

/// Current instant as an ISO-8601 UTC timestamp with millisecond precision
pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Today's local date as YYYY-MM-DD
pub fn today_ymd() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

/// The `count` most recent local calendar days, oldest first, ending today
pub fn recent_days(count: usize) -> Vec<NaiveDate> {
    let today = Local::now().date_naive();
    (0..count)
        .rev()
        .map(|offset| today - Duration::days(offset as i64))
        .collect()
}

/// Weekday abbreviation ("Mon", "Tue", ...) for a date
pub fn weekday_abbrev(date: NaiveDate) -> String {
    date.format("%a").to_string()
}

/// Parse a YYYY-MM-DD day key
pub fn parse_ymd(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

/// Validate that a day key is a real YYYY-MM-DD date
pub fn validate_ymd(date: &str) -> Result<()> {
    if parse_ymd(date).is_none() {
        return Err(ValidationError::InvalidDate.into());
    }
    Ok(())
}
