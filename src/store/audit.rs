use crate::errors::AppResult;
use crate::ui::messages::warning;
use crate::utils::path::sibling_with_suffix;
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

/// One line of the internal audit trail.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuditRecord {
    pub date: String,
    pub operation: String,
    pub target: String,
    pub message: String,
}

/// The audit trail lives next to the workbook: `machine_log.xlsx.log.csv`.
pub fn audit_path(storage: &Path) -> PathBuf {
    sibling_with_suffix(storage, ".log.csv")
}

/// Append an audit line, writing the CSV header on first use.
pub fn record(storage: &Path, operation: &str, target: &str, message: &str) -> AppResult<()> {
    let path = audit_path(storage);
    let fresh = path.metadata().map(|m| m.len() == 0).unwrap_or(true);

    let file = OpenOptions::new().create(true).append(true).open(&path)?;
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(fresh)
        .from_writer(file);

    wtr.serialize(AuditRecord {
        date: Local::now().to_rfc3339(),
        operation: operation.to_string(),
        target: target.to_string(),
        message: message.to_string(),
    })?;
    wtr.flush()?;

    Ok(())
}

/// Audit failures never abort the command that triggered them.
pub fn record_or_warn(storage: &Path, operation: &str, target: &str, message: &str) {
    if let Err(e) = record(storage, operation, target, message) {
        warning(format!("Failed to write audit log: {}", e));
    }
}

pub fn read_all(storage: &Path) -> AppResult<Vec<AuditRecord>> {
    let path = audit_path(storage);
    if !path.exists() {
        return Ok(Vec::new());
    }

    let mut rdr = csv::Reader::from_path(&path)?;
    let mut out = Vec::new();
    for rec in rdr.deserialize() {
        out.push(rec?);
    }
    Ok(out)
}
