//! Dataset preparation: parse, annotate with neighborhood slugs, filter by
//! an optional neighborhood, and group by calendar day.
//!
//! Every stage is pure and total. Per-record problems resolve to sentinels
//! (the blank neighborhood identifier, the unknown-date group) instead of
//! errors; only an unreadable payload fails.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

use crate::error::PermitError;
use crate::permits::dates::{DateKey, date_key_for};
use crate::permits::record::{AnnotatedRecord, RawRecord};
use crate::permits::slug::slugify_value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GroupOrder {
    #[default]
    NewestFirst,
    OldestFirst,
}

impl GroupOrder {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "newest-first" | "newest" | "desc" => Some(Self::NewestFirst),
            "oldest-first" | "oldest" | "asc" => Some(Self::OldestFirst),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::NewestFirst => "newest-first",
            Self::OldestFirst => "oldest-first",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateGroup {
    pub date: DateKey,
    pub records: Vec<AnnotatedRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NeighborhoodEntry {
    pub nhid: String,
    pub label: Option<String>,
    pub count: usize,
}

/// Decode the fetched bytes into raw records. The payload must be a JSON
/// array; its elements are accepted whatever their shape.
pub fn parse_payload(bytes: &[u8]) -> Result<Vec<RawRecord>, PermitError> {
    let value: Value =
        serde_json::from_slice(bytes).map_err(|err| PermitError::Parse(err.to_string()))?;
    match value {
        Value::Array(items) => Ok(items.into_iter().map(RawRecord::from_value).collect()),
        Value::Object(_) => Err(PermitError::NotAnArray("object")),
        Value::String(_) => Err(PermitError::NotAnArray("string")),
        Value::Number(_) => Err(PermitError::NotAnArray("number")),
        Value::Bool(_) => Err(PermitError::NotAnArray("boolean")),
        Value::Null => Err(PermitError::NotAnArray("null")),
    }
}

/// Copy each record with its `nhid` set. The input is left untouched and
/// any `nhid` already present in the source is replaced by the derived one.
pub fn annotate(records: &[RawRecord]) -> Vec<AnnotatedRecord> {
    records
        .iter()
        .map(|record| {
            let mut record = record.clone();
            record.fields.remove("nhid");
            AnnotatedRecord {
                nhid: slugify_value(&record.neighborhood),
                record,
            }
        })
        .collect()
}

/// Keep records whose `nhid` equals `target`; `None` keeps everything.
pub fn filter_by_neighborhood(
    records: Vec<AnnotatedRecord>,
    target: Option<&str>,
) -> Vec<AnnotatedRecord> {
    let Some(target) = target else {
        return records;
    };
    records.into_iter().filter(|r| r.nhid == target).collect()
}

/// Partition records by calendar day.
///
/// Days follow `order`; the unknown-date group, if any, is always last.
/// Records keep their input order inside each group.
pub fn group_by_date(
    records: Vec<AnnotatedRecord>,
    date_fields: &[String],
    order: GroupOrder,
) -> Vec<DateGroup> {
    let mut by_day: BTreeMap<chrono::NaiveDate, Vec<AnnotatedRecord>> = BTreeMap::new();
    let mut unknown = Vec::new();

    for record in records {
        match date_key_for(&record.record, date_fields) {
            DateKey::Day(day) => by_day.entry(day).or_default().push(record),
            DateKey::Unknown => unknown.push(record),
        }
    }

    let days: Box<dyn Iterator<Item = _>> = match order {
        GroupOrder::NewestFirst => Box::new(by_day.into_iter().rev()),
        GroupOrder::OldestFirst => Box::new(by_day.into_iter()),
    };
    let mut groups: Vec<DateGroup> = days
        .map(|(day, records)| DateGroup {
            date: DateKey::Day(day),
            records,
        })
        .collect();

    if !unknown.is_empty() {
        debug!(count = unknown.len(), "records without a usable date");
        groups.push(DateGroup {
            date: DateKey::Unknown,
            records: unknown,
        });
    }
    groups
}

/// Distinct identifiers with the first label seen and a record count.
pub fn neighborhood_index(records: &[AnnotatedRecord]) -> Vec<NeighborhoodEntry> {
    let mut index: BTreeMap<&str, NeighborhoodEntry> = BTreeMap::new();
    for annotated in records {
        let entry = index
            .entry(annotated.nhid.as_str())
            .or_insert_with(|| NeighborhoodEntry {
                nhid: annotated.nhid.clone(),
                label: None,
                count: 0,
            });
        entry.count += 1;
        if entry.label.is_none() {
            entry.label = annotated.record.neighborhood_label().map(ToOwned::to_owned);
        }
    }
    index.into_values().collect()
}
