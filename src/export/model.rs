// src/export/model.rs

use crate::models::LogEntry;
use serde::Serialize;

/// Flat shape of an entry for CSV / JSON.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct EntryExport {
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub total_minutes: i64,
    pub total_hours: f64,
    pub machine: String,
    pub project: String,
    pub material: String,
    pub operator: String,
    pub description: String,
}

impl From<&LogEntry> for EntryExport {
    fn from(e: &LogEntry) -> Self {
        Self {
            date: e.date.format("%Y-%m-%d").to_string(),
            start_time: e.start.format("%H:%M").to_string(),
            end_time: e.end.format("%H:%M").to_string(),
            total_minutes: e.total_minutes,
            total_hours: e.total_hours,
            machine: e.machine.clone(),
            project: e.project.clone(),
            material: e.material.clone().unwrap_or_default(),
            operator: e.operator.clone(),
            description: e.description.clone().unwrap_or_default(),
        }
    }
}
