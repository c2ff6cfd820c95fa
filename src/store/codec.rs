//! Mapping between log entries and worksheet rows.

use crate::core::duration;
use crate::errors::{AppError, AppResult};
use crate::models::LogEntry;
use crate::models::schema::*;
use crate::store::workbook::Cell;
use crate::utils::excel_date::{serial_to_datetime, serial_to_time};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::collections::HashMap;

static EMPTY: Cell = Cell::Empty;

pub fn header_row(version: SchemaVersion) -> Vec<Cell> {
    version.columns().iter().map(|c| Cell::text(*c)).collect()
}

/// Encode an entry in the current (V2) layout.
pub fn entry_to_row(e: &LogEntry) -> Vec<Cell> {
    vec![
        Cell::Date(e.date),
        Cell::Time(e.start),
        Cell::Time(e.end),
        Cell::Number(e.total_minutes as f64),
        Cell::Number(e.total_hours),
        Cell::text(e.machine.clone()),
        Cell::text(e.project.clone()),
        Cell::text(e.material.clone().unwrap_or_default()),
        Cell::text(e.operator.clone()),
        Cell::text(e.description.clone().unwrap_or_default()),
    ]
}

/// Column name → index, built from the detected header.
pub struct RowReader<'a> {
    table: &'a str,
    index: HashMap<&'static str, usize>,
    version: SchemaVersion,
}

impl<'a> RowReader<'a> {
    pub fn new(table: &'a str, version: SchemaVersion) -> Self {
        let index = version
            .columns()
            .iter()
            .enumerate()
            .map(|(i, c)| (*c, i))
            .collect();
        Self {
            table,
            index,
            version,
        }
    }

    fn cell<'r>(&self, row: &'r [Cell], column: &str) -> &'r Cell {
        self.index
            .get(column)
            .and_then(|i| row.get(*i))
            .unwrap_or(&EMPTY)
    }

    fn invalid(&self, row_no: usize, reason: String) -> AppError {
        AppError::InvalidRow {
            table: self.table.to_string(),
            row: row_no,
            reason,
        }
    }

    /// Decode one data row. `row_no` is the 1-based worksheet row, for messages.
    /// V1 rows are upgraded: minutes are recomputed, the new columns are empty.
    pub fn decode(&self, row: &[Cell], row_no: usize) -> AppResult<LogEntry> {
        let date_cell = self.cell(row, COL_DATE);
        let date = cell_date(date_cell)
            .ok_or_else(|| self.invalid(row_no, format!("bad date '{}'", date_cell.as_text())))?;

        let start_cell = self.cell(row, COL_START);
        let start = cell_time(start_cell).ok_or_else(|| {
            self.invalid(row_no, format!("bad start time '{}'", start_cell.as_text()))
        })?;

        let end_cell = self.cell(row, COL_END);
        let end = cell_time(end_cell)
            .ok_or_else(|| self.invalid(row_no, format!("bad end time '{}'", end_cell.as_text())))?;

        let computed = duration::compute(date, start, end);
        let (total_minutes, total_hours) = match self.version {
            SchemaVersion::V1 => (computed.minutes, computed.hours),
            SchemaVersion::V2 => (
                self.cell(row, COL_MINUTES)
                    .as_number()
                    .map(|m| m.round() as i64)
                    .unwrap_or(computed.minutes),
                self.cell(row, COL_HOURS)
                    .as_number()
                    .unwrap_or(computed.hours),
            ),
        };

        Ok(LogEntry {
            date,
            start,
            end,
            total_minutes,
            total_hours,
            machine: self.cell(row, COL_MACHINE).as_text(),
            project: self.cell(row, COL_PROJECT).as_text(),
            material: optional(self.cell(row, COL_MATERIAL)),
            operator: self.cell(row, COL_OPERATOR).as_text(),
            description: optional(self.cell(row, COL_DESCRIPTION)),
        })
    }
}

fn optional(cell: &Cell) -> Option<String> {
    let s = cell.as_text();
    if s.is_empty() { None } else { Some(s) }
}

pub fn cell_date(cell: &Cell) -> Option<NaiveDate> {
    match cell {
        Cell::Date(d) => Some(*d),
        Cell::DateTime(dt) => Some(dt.date()),
        Cell::Number(n) => serial_to_datetime(*n).map(|dt| dt.date()),
        Cell::Text(s) => {
            let s = s.trim();
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .or_else(|_| {
                    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").map(|dt| dt.date())
                })
                .ok()
        }
        _ => None,
    }
}

pub fn cell_time(cell: &Cell) -> Option<NaiveTime> {
    match cell {
        Cell::Time(t) => Some(*t),
        Cell::DateTime(dt) => Some(dt.time()),
        Cell::Number(n) => serial_to_time(*n),
        Cell::Text(s) => crate::utils::time::parse_time(s),
        _ => None,
    }
}
