//! Append-only machine log persisted as one worksheet of an xlsx workbook.
//!
//! Every write is a full read-modify-write of the workbook, serialized by
//! [`lock::StoreLock`] and published with an atomic rename, so concurrent
//! submissions queue up instead of overwriting each other and a crash never
//! leaves a half-written file behind.

pub mod audit;
pub mod codec;
pub mod lock;
pub mod workbook;

use crate::config::StoreConfig;
use crate::errors::{AppError, AppResult};
use crate::models::{LogEntry, SchemaVersion};
use codec::{RowReader, entry_to_row, header_row};
use lock::StoreLock;
use std::path::Path;
use std::time::Duration;
use workbook::{SheetData, read_workbook, write_workbook};

/// Outcome of [`LogStore::ensure_initialized`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    CreatedFile,
    AddedTable,
    AlreadyPresent,
}

/// Entries read from the table, with the layout they were stored in.
#[derive(Debug, Clone)]
pub struct LoadedTable {
    pub version: SchemaVersion,
    pub entries: Vec<LogEntry>,
}

pub struct LogStore<'a> {
    cfg: &'a StoreConfig,
}

impl<'a> LogStore<'a> {
    pub fn new(cfg: &'a StoreConfig) -> Self {
        Self { cfg }
    }

    pub fn path(&self) -> &Path {
        &self.cfg.storage_path
    }

    pub fn table_name(&self) -> &str {
        &self.cfg.table_name
    }

    fn lock(&self) -> AppResult<StoreLock> {
        StoreLock::acquire(self.path(), Duration::from_millis(self.cfg.lock_timeout_ms))
    }

    fn empty_table(&self) -> SheetData {
        let mut sheet = SheetData::new(self.table_name());
        sheet.rows.push(header_row(SchemaVersion::CURRENT));
        sheet
    }

    /// Create the workbook and/or the table with the fixed header when missing.
    /// Leaves an existing table untouched.
    pub fn ensure_initialized(&self) -> AppResult<InitOutcome> {
        if self.table_exists()? {
            return Ok(InitOutcome::AlreadyPresent);
        }

        let _guard = self.lock()?;

        if !self.path().exists() {
            write_workbook(self.path(), &[self.empty_table()])?;
            return Ok(InitOutcome::CreatedFile);
        }

        let mut sheets = read_workbook(self.path())?;
        if sheets.iter().any(|s| s.name == self.table_name()) {
            // Another writer got here first.
            return Ok(InitOutcome::AlreadyPresent);
        }

        sheets.push(self.empty_table());
        write_workbook(self.path(), &sheets)?;
        Ok(InitOutcome::AddedTable)
    }

    fn table_exists(&self) -> AppResult<bool> {
        if !self.path().exists() {
            return Ok(false);
        }
        let sheets = read_workbook(self.path())?;
        Ok(sheets.iter().any(|s| s.name == self.table_name()))
    }

    /// Append one entry and return the new number of entries.
    pub fn append(&self, entry: &LogEntry) -> AppResult<usize> {
        let _guard = self.lock()?;

        let mut sheets = if self.path().exists() {
            read_workbook(self.path())?
        } else {
            Vec::new()
        };

        let pos = match sheets.iter().position(|s| s.name == self.table_name()) {
            Some(pos) => pos,
            None => {
                sheets.push(self.empty_table());
                sheets.len() - 1
            }
        };

        let loaded = self.decode_sheet(&sheets[pos])?;
        if loaded.version != SchemaVersion::CURRENT {
            return Err(AppError::LegacySchema(self.table_name().to_string()));
        }

        let mut table = self.empty_table();
        table
            .rows
            .extend(loaded.entries.iter().map(entry_to_row));
        table.rows.push(entry_to_row(entry));
        let count = table.rows.len() - 1;

        sheets[pos] = table;
        write_workbook(self.path(), &sheets)?;

        Ok(count)
    }

    /// All stored entries, in insertion order.
    pub fn load_all(&self) -> AppResult<Vec<LogEntry>> {
        Ok(self.load_table()?.entries)
    }

    pub fn load_table(&self) -> AppResult<LoadedTable> {
        let sheets = read_workbook(self.path())?;
        let sheet = sheets
            .iter()
            .find(|s| s.name == self.table_name())
            .ok_or_else(|| {
                AppError::file_access(
                    self.path(),
                    format!(
                        "table '{}' not found (sheets: {})",
                        self.table_name(),
                        sheets
                            .iter()
                            .map(|s| s.name.as_str())
                            .collect::<Vec<_>>()
                            .join(", ")
                    ),
                )
            })?;

        self.decode_sheet(sheet)
    }

    fn decode_sheet(&self, sheet: &SheetData) -> AppResult<LoadedTable> {
        let header = sheet.header_names();
        if header.is_empty() {
            // A table without even a header row is treated as a fresh one.
            return Ok(LoadedTable {
                version: SchemaVersion::CURRENT,
                entries: Vec::new(),
            });
        }

        let version = SchemaVersion::detect(&header)?;
        let reader = RowReader::new(self.table_name(), version);
        let first_data = sheet.header_index().map_or(1, |h| h + 1);

        let mut entries = Vec::new();
        for (i, row) in sheet.rows.iter().enumerate().skip(first_data) {
            if row.iter().all(|c| c.is_empty()) {
                continue;
            }
            entries.push(reader.decode(row, i + 1)?);
        }

        Ok(LoadedTable { version, entries })
    }

    /// Rewrite a V1 table in the V2 layout. Returns the migrated row count,
    /// or `None` when the table was already current.
    pub fn migrate(&self) -> AppResult<Option<usize>> {
        let _guard = self.lock()?;

        let mut sheets = read_workbook(self.path())?;
        let pos = sheets
            .iter()
            .position(|s| s.name == self.table_name())
            .ok_or_else(|| {
                AppError::file_access(
                    self.path(),
                    format!("table '{}' not found", self.table_name()),
                )
            })?;

        let loaded = self.decode_sheet(&sheets[pos])?;
        if loaded.version == SchemaVersion::CURRENT {
            return Ok(None);
        }

        let mut table = self.empty_table();
        table
            .rows
            .extend(loaded.entries.iter().map(entry_to_row));
        sheets[pos] = table;
        write_workbook(self.path(), &sheets)?;

        Ok(Some(loaded.entries.len()))
    }
}
