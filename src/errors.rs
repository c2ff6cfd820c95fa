//! Unified application error type.
//! All modules (store, core, cli, utils) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Workbook-related
    // ---------------------------
    #[error("Cannot access '{path}': {reason}")]
    FileAccess { path: String, reason: String },

    #[error("Missing column(s) {missing:?}. Available columns: {available:?}")]
    Schema {
        missing: Vec<String>,
        available: Vec<String>,
    },

    #[error("Invalid row {row} in table '{table}': {reason}")]
    InvalidRow {
        table: String,
        row: usize,
        reason: String,
    },

    #[error("Table '{0}' uses the legacy 6-column layout; run `machlog migrate` first")]
    LegacySchema(String),

    #[error("Unknown {column} '{value}'. Available: {available:?}")]
    UnknownValue {
        column: String,
        value: String,
        available: Vec<String>,
    },

    #[error("No data: {0}")]
    NoData(String),

    #[error("Workbook write error: {0}")]
    XlsxWrite(#[from] rust_xlsxwriter::XlsxError),

    #[error("Storage is locked by another writer: {0}")]
    Locked(String),

    // ---------------------------
    // Parsing / validation errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid period: {0}")]
    InvalidPeriod(String),

    #[error("Entry rejected: {}", .0.join("; "))]
    Validation(Vec<String>),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl AppError {
    /// Helper for workbook read failures, keeping the offending path.
    pub fn file_access(path: impl AsRef<std::path::Path>, reason: impl ToString) -> Self {
        AppError::FileAccess {
            path: path.as_ref().display().to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn schema(missing: &[&str], available: &[String]) -> Self {
        AppError::Schema {
            missing: missing.iter().map(|s| s.to_string()).collect(),
            available: available.to_vec(),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
