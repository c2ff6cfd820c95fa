//! Cleanup of worksheets exported from the shop's machining reports.
//!
//! Exports carry padded header names and empty "Unnamed: N" columns, and
//! the machine family only exists as the sheet name. Normalizing fixes the
//! header, tags each row with its sheet and derives hours from minutes.

use crate::config::ReportColumns;
use crate::errors::{AppError, AppResult};
use crate::models::ReportRow;
use crate::store::workbook::{Cell, SheetData};
use regex::Regex;
use std::sync::LazyLock;

pub const MACHINE_TYPE_COL: &str = "Machine Type";
pub const HOURS_COL: &str = "Total Time (hr)";

static UNNAMED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Unnamed").expect("valid regex"));

#[derive(Debug, Clone, PartialEq, Default)]
pub struct NormalizedTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl NormalizedTable {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Set `name` on every row, adding the column if needed.
    fn set_column<F: Fn(&[Cell]) -> Cell>(&mut self, name: &str, value: F) {
        let idx = match self.column_index(name) {
            Some(i) => i,
            None => {
                self.columns.push(name.to_string());
                self.columns.len() - 1
            }
        };
        for row in self.rows.iter_mut() {
            if row.len() <= idx {
                row.resize(idx + 1, Cell::Empty);
            }
            let v = value(row.as_slice());
            row[idx] = v;
        }
    }
}

fn is_dropped(name: &str) -> bool {
    name.is_empty() || UNNAMED.is_match(name)
}

/// Header cleanup plus sheet tagging. The first row is the header.
pub fn normalize_sheet(sheet: &SheetData) -> NormalizedTable {
    let start = sheet.header_index().unwrap_or(sheet.rows.len());
    let Some((header, data)) = sheet.rows[start..].split_first() else {
        return NormalizedTable {
            columns: vec![MACHINE_TYPE_COL.to_string()],
            rows: Vec::new(),
        };
    };

    let mut kept: Vec<usize> = Vec::new();
    let mut columns: Vec<String> = Vec::new();
    for (i, cell) in header.iter().enumerate() {
        let name = cell.as_text();
        if is_dropped(&name) {
            continue;
        }
        kept.push(i);
        columns.push(dedupe(&columns, name));
    }

    let rows = data
        .iter()
        .filter(|row| !row.iter().all(Cell::is_empty))
        .map(|row| {
            kept.iter()
                .map(|i| row.get(*i).cloned().unwrap_or(Cell::Empty))
                .collect()
        })
        .collect();

    let mut table = NormalizedTable { columns, rows };
    let sheet_name = sheet.name.clone();
    table.set_column(MACHINE_TYPE_COL, |_| Cell::Text(sheet_name.clone()));
    table
}

/// `Time`, `Time` → `Time`, `Time.1`, like the usual dataframe readers.
fn dedupe(existing: &[String], name: String) -> String {
    if !existing.contains(&name) {
        return name;
    }
    let mut n = 1;
    loop {
        let candidate = format!("{}.{}", name, n);
        if !existing.contains(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

/// Make the minutes column numeric and add the hours column.
/// Non-numeric minutes become `Cell::Empty` (missing), never zero.
/// Returns false when the minutes column is absent.
pub fn derive_hours(table: &mut NormalizedTable, minutes_col: &str) -> bool {
    let Some(m) = table.column_index(minutes_col) else {
        return false;
    };

    table.set_column(minutes_col, |row| match row[m].as_number() {
        Some(n) => Cell::Number(n),
        None => Cell::Empty,
    });
    table.set_column(HOURS_COL, |row| match row[m].as_number() {
        Some(n) => Cell::Number(n / 60.0),
        None => Cell::Empty,
    });
    true
}

/// Stack tables; columns are the union in first-seen order.
pub fn concat(tables: Vec<NormalizedTable>) -> NormalizedTable {
    let mut columns: Vec<String> = Vec::new();
    for t in &tables {
        for c in &t.columns {
            if !columns.contains(c) {
                columns.push(c.clone());
            }
        }
    }

    let mut rows = Vec::new();
    for t in tables {
        let map: Vec<Option<usize>> = columns.iter().map(|c| t.column_index(c)).collect();
        for row in t.rows {
            rows.push(
                map.iter()
                    .map(|i| {
                        i.and_then(|i| row.get(i).cloned())
                            .unwrap_or(Cell::Empty)
                    })
                    .collect(),
            );
        }
    }

    NormalizedTable { columns, rows }
}

/// Typed view of the table. Project and machine columns are required.
pub fn to_report_rows(table: &NormalizedTable, cols: &ReportColumns) -> AppResult<Vec<ReportRow>> {
    let missing: Vec<&str> = [cols.project.as_str(), cols.machine.as_str()]
        .into_iter()
        .filter(|c| !table.has_column(c))
        .collect();
    if !missing.is_empty() {
        return Err(AppError::schema(&missing, &table.columns));
    }

    let get = |row: &[Cell], name: &str| -> Cell {
        table
            .column_index(name)
            .and_then(|i| row.get(i).cloned())
            .unwrap_or(Cell::Empty)
    };

    Ok(table
        .rows
        .iter()
        .map(|row| {
            let minutes = get(row, &cols.minutes).as_number();
            let description = get(row, &cols.description).as_text();
            ReportRow {
                machine_type: get(row, MACHINE_TYPE_COL).as_text(),
                machine: get(row, &cols.machine).as_text(),
                description: (!description.is_empty()).then_some(description),
                project: get(row, &cols.project).as_text(),
                minutes,
                hours: get(row, HOURS_COL)
                    .as_number()
                    .or_else(|| minutes.map(|m| m / 60.0)),
                values: row.clone(),
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet(name: &str, rows: Vec<Vec<Cell>>) -> SheetData {
        SheetData {
            name: name.into(),
            header: false,
            rows,
        }
    }

    fn t(s: &str) -> Cell {
        Cell::text(s)
    }

    fn report_cols() -> ReportColumns {
        ReportColumns {
            machine: "Machine".into(),
            description: "Task".into(),
            project: "Project".into(),
            minutes: "Minutes".into(),
        }
    }

    #[test]
    fn headers_are_trimmed_and_unnamed_columns_dropped() {
        let s = sheet(
            "Lathes",
            vec![
                vec![t(" Foo "), t("Unnamed: 3"), Cell::Empty, t("Bar")],
                vec![t("a"), t("junk"), t("junk"), t("b")],
            ],
        );
        let table = normalize_sheet(&s);
        assert_eq!(table.columns, vec!["Foo", "Bar", MACHINE_TYPE_COL]);
        assert_eq!(table.rows[0], vec![t("a"), t("b"), t("Lathes")]);
    }

    #[test]
    fn header_below_blank_rows_is_found() {
        let s = sheet(
            "Mills",
            vec![
                Vec::new(),
                vec![Cell::Empty, Cell::Empty],
                vec![t("Machine"), t("Minutes")],
                vec![t("M1"), Cell::Number(30.0)],
            ],
        );
        let table = normalize_sheet(&s);
        assert_eq!(table.columns, vec!["Machine", "Minutes", MACHINE_TYPE_COL]);
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0][1], Cell::Number(30.0));
    }

    #[test]
    fn non_numeric_minutes_become_missing() {
        let s = sheet(
            "CNC",
            vec![
                vec![t("Machine"), t("Minutes")],
                vec![t("M1"), Cell::Number(90.0)],
                vec![t("M1"), t("N/A")],
                vec![t("M2"), t("30")],
            ],
        );
        let mut table = normalize_sheet(&s);
        assert!(derive_hours(&mut table, "Minutes"));

        let h = table.column_index(HOURS_COL).unwrap();
        assert_eq!(table.rows[0][h], Cell::Number(1.5));
        assert_eq!(table.rows[1][h], Cell::Empty);
        assert_eq!(table.rows[1][1], Cell::Empty);
        assert_eq!(table.rows[2][h], Cell::Number(0.5));

        let total: f64 = table.rows.iter().filter_map(|r| r[h].as_number()).sum();
        assert_eq!(total, 2.0);
    }

    #[test]
    fn concat_unions_columns_and_rows_keep_their_sheet() {
        let a = normalize_sheet(&sheet(
            "Lathe",
            vec![vec![t("Machine"), t("Project")], vec![t("L1"), t("P1")]],
        ));
        let b = normalize_sheet(&sheet(
            "Mill",
            vec![
                vec![t("Project"), t("Machine"), t("Task")],
                vec![t("P2"), t("M1"), t("slot")],
            ],
        ));
        let all = concat(vec![a, b]);
        assert_eq!(
            all.columns,
            vec!["Machine", "Project", MACHINE_TYPE_COL, "Task"]
        );
        assert_eq!(all.rows[0][3], Cell::Empty);
        assert_eq!(all.rows[1], vec![t("M1"), t("P2"), t("Mill"), t("slot")]);
    }

    #[test]
    fn report_rows_need_a_project_column() {
        let table = normalize_sheet(&sheet(
            "Saw",
            vec![vec![t("Machine"), t("Minutes")], vec![t("S1"), Cell::Number(60.0)]],
        ));
        match to_report_rows(&table, &report_cols()).unwrap_err() {
            AppError::Schema { missing, available } => {
                assert_eq!(missing, vec!["Project"]);
                assert!(available.contains(&"Machine Type".to_string()));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn report_rows_carry_sheet_and_hours() {
        let mut table = normalize_sheet(&sheet(
            "Mill",
            vec![
                vec![t("Project"), t("Machine"), t("Task"), t("Minutes")],
                vec![Cell::Number(2401.0), t("M1"), t("slot"), Cell::Number(45.0)],
            ],
        ));
        derive_hours(&mut table, "Minutes");
        let rows = to_report_rows(&table, &report_cols()).unwrap();
        assert_eq!(rows[0].project, "2401");
        assert_eq!(rows[0].machine_type, "Mill");
        assert_eq!(rows[0].hours, Some(0.75));
        assert_eq!(rows[0].description.as_deref(), Some("slot"));
    }
}
