use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

/// One recorded machine-usage event. Immutable once appended to the store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogEntry {
    pub date: NaiveDate,
    #[serde(serialize_with = "hhmm")]
    pub start: NaiveTime,
    #[serde(serialize_with = "hhmm")]
    pub end: NaiveTime,
    pub total_minutes: i64,
    pub total_hours: f64,
    pub machine: String,
    pub project: String,
    pub material: Option<String>,
    pub operator: String,
    pub description: Option<String>,
}

fn hhmm<S: serde::Serializer>(t: &NaiveTime, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&t.format("%H:%M").to_string())
}

/// Raw form input for a new entry, before validation.
#[derive(Debug, Clone)]
pub struct EntryForm {
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub machine: String,
    pub project: Option<String>,
    pub material: Option<String>,
    pub operator: String,
    pub description: Option<String>,
}
