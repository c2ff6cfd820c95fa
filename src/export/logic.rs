// src/export/logic.rs

use crate::core::query::EntryFilter;
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::EntryExport;
use crate::export::xlsx::export_xlsx;
use crate::models::LogEntry;
use crate::store::LogStore;
use crate::store::audit;
use crate::ui::messages::warning;
use std::path::Path;

/// High-level export logic.
pub struct ExportLogic;

impl ExportLogic {
    /// Export the stored entries.
    ///
    /// - `format`: csv | json | xlsx
    /// - `file`: absolute path of the output file
    /// - `period`: `None`, `"all"` or one of:
    ///   - `YYYY`
    ///   - `YYYY-MM`
    ///   - `YYYY-MM-DD`
    ///   - `A:B` with any of the above on both sides
    ///
    /// Returns the number of exported entries.
    pub fn export(
        store: &LogStore,
        format: ExportFormat,
        file: &str,
        period: &Option<String>,
        force: bool,
    ) -> AppResult<usize> {
        let path = Path::new(file);

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "output file path must be absolute: {file}"
            )));
        }

        let filter = EntryFilter::from_args(period.as_deref(), &[], &[], &[])?;

        let all = store.load_all()?;
        let mut selected: Vec<&LogEntry> = filter.apply(&all);

        if selected.is_empty() {
            warning("No entries found for the selected period.");
            return Ok(0);
        }

        ensure_writable(path, force)?;

        selected.sort_by_key(|e| (e.date, e.start));

        match format {
            ExportFormat::Csv => export_csv(&flatten(&selected), path)?,
            ExportFormat::Json => export_json(&flatten(&selected), path)?,
            ExportFormat::Xlsx => export_xlsx(&selected, path)?,
        }

        audit::record_or_warn(
            store.path(),
            "export",
            file,
            &format!("{} entries as {}", selected.len(), format.as_str()),
        );

        Ok(selected.len())
    }
}

fn flatten(entries: &[&LogEntry]) -> Vec<EntryExport> {
    entries.iter().map(|e| EntryExport::from(*e)).collect()
}
