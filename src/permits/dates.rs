use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::fmt;

use crate::permits::record::RawRecord;

pub const UNKNOWN_DATE_LABEL: &str = "unknown date";

/// Calendar-day key a permit is grouped under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DateKey {
    Day(NaiveDate),
    Unknown,
}

impl DateKey {
    pub fn label(&self) -> String {
        match self {
            Self::Day(day) => day.format("%Y-%m-%d").to_string(),
            Self::Unknown => UNKNOWN_DATE_LABEL.to_string(),
        }
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl Serialize for DateKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.label())
    }
}

const NAIVE_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];

/// Parse a date string into its calendar day.
///
/// Offset timestamps keep the day as written in their own offset, so
/// `2020-01-01T23:30:00-08:00` stays on January 1st.
pub fn parse_day(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(ts.date_naive());
    }
    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(ts.date());
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(day) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Some(day);
        }
    }
    // e.g. `2020-01-01T00:00:00.000` variants chrono rejects, or trailing zone names
    trimmed
        .get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
}

/// Integers are epoch milliseconds.
fn day_from_millis(ms: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp_millis(ms).map(|ts| ts.date_naive())
}

pub fn day_from_value(value: &Value) -> Option<NaiveDate> {
    match value {
        Value::String(s) => parse_day(s),
        Value::Number(n) => n.as_i64().and_then(day_from_millis),
        _ => None,
    }
}

/// The first field in `date_fields` that holds a usable date decides the key.
pub fn date_key_for(record: &RawRecord, date_fields: &[String]) -> DateKey {
    date_fields
        .iter()
        .filter_map(|name| record.field(name))
        .find_map(day_from_value)
        .map_or(DateKey::Unknown, DateKey::Day)
}
