//! Whole-workbook I/O: read every sheet with calamine, write every sheet with
//! rust_xlsxwriter through a temp file that is renamed over the destination.

use crate::errors::{AppError, AppResult};
use crate::utils::excel_date::{
    date_to_serial, datetime_to_serial, serial_to_datetime, time_to_serial,
};
use crate::utils::path::parent_dir_or_dot;
use calamine::{Data, Reader, open_workbook_auto};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use rust_xlsxwriter::{Color, Format, FormatBorder, FormatPattern, Workbook, Worksheet};
use std::fs::{self, File};
use std::io;
use std::path::Path;
use unicode_width::UnicodeWidthStr;

/// A single cell value. `Empty` is the missing marker.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    Date(NaiveDate),
    Time(NaiveTime),
    DateTime(NaiveDateTime),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Display text. Whole numbers print without a fractional part.
    pub fn as_text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.trim().to_string(),
            Cell::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => format!("{}", *n as i64),
            Cell::Number(n) => n.to_string(),
            Cell::Bool(b) => b.to_string(),
            Cell::Date(d) => d.format("%Y-%m-%d").to_string(),
            Cell::Time(t) => t.format("%H:%M").to_string(),
            Cell::DateTime(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
        }
    }

    /// Numeric value, parsing numeric text. Anything else is `None`.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) if n.is_finite() => Some(*n),
            Cell::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            _ => None,
        }
    }

    pub fn text(s: impl Into<String>) -> Self {
        let s = s.into();
        if s.is_empty() { Cell::Empty } else { Cell::Text(s) }
    }
}

/// A worksheet as a grid of rows. Row 0 is the header when `header` is set.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetData {
    pub name: String,
    pub header: bool,
    pub rows: Vec<Vec<Cell>>,
}

impl SheetData {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            header: true,
            rows: Vec::new(),
        }
    }

    /// Index of the first non-blank row, which holds the column names.
    pub fn header_index(&self) -> Option<usize> {
        self.rows
            .iter()
            .position(|r| !r.iter().all(Cell::is_empty))
    }

    /// Trimmed header names; empty when the sheet has no rows.
    pub fn header_names(&self) -> Vec<String> {
        self.header_index()
            .map(|i| self.rows[i].iter().map(|c| c.as_text()).collect())
            .unwrap_or_default()
    }
}

fn convert(cell: &Data) -> Cell {
    match cell {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::text(s.clone()),
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) => from_serial(dt.as_f64()),
        other => Cell::text(other.to_string()),
    }
}

/// Excel stores dates, times and datetimes as one serial number.
fn from_serial(serial: f64) -> Cell {
    match serial_to_datetime(serial) {
        Some(dt) if serial < 1.0 => Cell::Time(dt.time()),
        Some(dt) if dt.time().num_seconds_from_midnight() == 0 => Cell::Date(dt.date()),
        Some(dt) => Cell::DateTime(dt),
        None => Cell::Number(serial),
    }
}

/// Read every sheet of a workbook (xlsx, xls, xlsb or ods).
pub fn read_workbook(path: &Path) -> AppResult<Vec<SheetData>> {
    if !path.exists() {
        return Err(AppError::file_access(path, "file not found"));
    }

    let mut workbook = open_workbook_auto(path).map_err(|e| AppError::file_access(path, e))?;
    let sheet_names = workbook.sheet_names().to_owned();

    let mut sheets = Vec::with_capacity(sheet_names.len());
    for name in sheet_names {
        let range = workbook
            .worksheet_range(&name)
            .map_err(|e| AppError::file_access(path, format!("sheet '{}': {}", name, e)))?;

        // Keep cells in place when the used range does not start at A1.
        let (row_offset, col_offset) = range
            .start()
            .map(|(r, c)| (r as usize, c as usize))
            .unwrap_or((0, 0));

        let mut rows: Vec<Vec<Cell>> = vec![Vec::new(); row_offset];
        rows.extend(range.rows().map(|row| {
            let mut cells = vec![Cell::Empty; col_offset];
            cells.extend(row.iter().map(convert));
            cells
        }));

        sheets.push(SheetData {
            name,
            header: false,
            rows,
        });
    }

    Ok(sheets)
}

/// Write all sheets to `dest`. The previous file stays intact if anything fails.
pub fn write_workbook(dest: &Path, sheets: &[SheetData]) -> AppResult<()> {
    let mut workbook = Workbook::new();

    for sheet in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&sheet.name)?;
        write_sheet(worksheet, sheet)?;
    }

    let dir = parent_dir_or_dot(dest);
    fs::create_dir_all(dir)?;

    let tmp = tempfile::Builder::new()
        .prefix(".machlog-")
        .suffix(".xlsx")
        .tempfile_in(dir)?
        .into_temp_path();

    workbook.save(&*tmp)?;
    File::open(&*tmp)?.sync_all()?;
    tmp.persist(dest).map_err(io::Error::from)?;

    Ok(())
}

fn write_sheet(worksheet: &mut Worksheet, sheet: &SheetData) -> AppResult<()> {
    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0xFFFFFF))
        .set_background_color(Color::RGB(0x2F75B5))
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);
    let date_format = Format::new().set_num_format("yyyy-mm-dd");
    let time_format = Format::new().set_num_format("hh:mm");
    let datetime_format = Format::new().set_num_format("yyyy-mm-dd hh:mm");

    let mut col_widths: Vec<usize> = Vec::new();

    for (r, row) in sheet.rows.iter().enumerate() {
        let is_header = sheet.header && r == 0;

        for (c, cell) in row.iter().enumerate() {
            let (row_idx, col_idx) = (r as u32, c as u16);

            if is_header {
                worksheet.write_with_format(row_idx, col_idx, cell.as_text(), &header_format)?;
            } else {
                match cell {
                    Cell::Empty => {}
                    Cell::Text(s) => {
                        worksheet.write(row_idx, col_idx, s.as_str())?;
                    }
                    Cell::Number(n) => {
                        worksheet.write(row_idx, col_idx, *n)?;
                    }
                    Cell::Bool(b) => {
                        worksheet.write(row_idx, col_idx, *b)?;
                    }
                    Cell::Date(d) => {
                        worksheet.write_with_format(
                            row_idx,
                            col_idx,
                            date_to_serial(d),
                            &date_format,
                        )?;
                    }
                    Cell::Time(t) => {
                        worksheet.write_with_format(
                            row_idx,
                            col_idx,
                            time_to_serial(t),
                            &time_format,
                        )?;
                    }
                    Cell::DateTime(dt) => {
                        worksheet.write_with_format(
                            row_idx,
                            col_idx,
                            datetime_to_serial(dt),
                            &datetime_format,
                        )?;
                    }
                }
            }

            if col_widths.len() <= c {
                col_widths.resize(c + 1, 0);
            }
            col_widths[c] = col_widths[c].max(UnicodeWidthStr::width(cell.as_text().as_str()));
        }
    }

    if sheet.header && !sheet.rows.is_empty() {
        worksheet.set_freeze_panes(1, 0)?;
    }

    for (c, w) in col_widths.iter().enumerate() {
        worksheet.set_column_width(c as u16, (*w).max(8) as f64 + 2.0)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_round_trip_through_xlsx() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cells.xlsx");

        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let time = NaiveTime::from_hms_opt(22, 15, 0).unwrap();
        let sheet = SheetData {
            name: "Data".into(),
            header: true,
            rows: vec![
                vec![Cell::text("When"), Cell::text("At"), Cell::text("Qty"), Cell::text("Note")],
                vec![Cell::Date(date), Cell::Time(time), Cell::Number(2.5), Cell::Empty],
            ],
        };
        let other = SheetData {
            name: "Notes".into(),
            header: false,
            rows: vec![vec![Cell::text("keep me")]],
        };

        write_workbook(&path, &[sheet, other]).unwrap();
        let sheets = read_workbook(&path).unwrap();

        assert_eq!(sheets.len(), 2);
        assert_eq!(sheets[0].header_names(), vec!["When", "At", "Qty", "Note"]);
        let row = &sheets[0].rows[1];
        assert_eq!(row[2].as_number(), Some(2.5));
        assert_eq!(sheets[1].name, "Notes");
        assert_eq!(sheets[1].rows[0][0].as_text(), "keep me");
    }

    #[test]
    fn offset_ranges_keep_their_position() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("offset.xlsx");

        let notes = SheetData {
            name: "Notes".into(),
            header: false,
            rows: vec![
                Vec::new(),
                Vec::new(),
                Vec::new(),
                vec![Cell::Empty, Cell::Number(42.0), Cell::text("  padded  ")],
            ],
        };
        write_workbook(&path, &[notes]).unwrap();

        let read = read_workbook(&path).unwrap();
        assert_eq!(read[0].rows.len(), 4);
        assert_eq!(read[0].rows[3][1], Cell::Number(42.0));
        assert_eq!(read[0].rows[3][2], Cell::text("  padded  "));

        write_workbook(&path, &read).unwrap();
        assert_eq!(read_workbook(&path).unwrap(), read);
    }

    #[test]
    fn missing_file_is_a_file_access_error() {
        let err = read_workbook(Path::new("/nonexistent/dir/none.xlsx")).unwrap_err();
        assert!(matches!(err, AppError::FileAccess { .. }));
    }

    #[test]
    fn garbage_file_is_a_file_access_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.xlsx");
        fs::write(&path, b"definitely not a zip archive").unwrap();
        let err = read_workbook(&path).unwrap_err();
        assert!(matches!(err, AppError::FileAccess { .. }));
    }

    #[test]
    fn numeric_text_is_a_number_but_na_is_not() {
        assert_eq!(Cell::text(" 90 ").as_number(), Some(90.0));
        assert_eq!(Cell::text("N/A").as_number(), None);
        assert_eq!(Cell::Number(120.0).as_text(), "120");
    }
}
