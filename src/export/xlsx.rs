// src/export/xlsx.rs

use crate::errors::AppResult;
use crate::export::notify_export_success;
use crate::models::LogEntry;
use crate::models::SchemaVersion;
use crate::store::codec::entry_to_row;
use crate::store::workbook::Cell;
use crate::ui::messages::info;
use crate::utils::excel_date::{date_to_serial, datetime_to_serial, time_to_serial};
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatPattern, Workbook, Worksheet};
use std::path::Path;
use unicode_width::UnicodeWidthStr;

/// Export XLSX with banded rows and auto column widths.
pub(crate) fn export_xlsx(entries: &[&LogEntry], path: &Path) -> AppResult<()> {
    info(format!("Exporting to XLSX: {}", path.display()));

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Export")?;

    // ---------------------------
    // Header
    // ---------------------------
    let headers = SchemaVersion::CURRENT.columns();

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0xFFFFFF))
        .set_background_color(Color::RGB(0x2F75B5))
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    for (col, header) in headers.iter().enumerate() {
        worksheet.write_with_format(0, col as u16, *header, &header_format)?;
    }

    worksheet.set_freeze_panes(1, 0)?;

    let mut col_widths: Vec<usize> = headers.iter().map(|h| UnicodeWidthStr::width(*h)).collect();

    let band1 = Color::RGB(0xEAF3FB);
    let band2 = Color::RGB(0xFFFFFF);

    // ---------------------------
    // Rows
    // ---------------------------
    for (row_index, entry) in entries.iter().enumerate() {
        let row = (row_index + 1) as u32;
        let band_color = if row_index % 2 == 0 { band1 } else { band2 };

        for (col, cell) in entry_to_row(entry).iter().enumerate() {
            write_xlsx_cell(worksheet, row, col as u16, cell, band_color)?;

            let shown = match cell {
                Cell::Time(t) => t.format("%H:%M").to_string(),
                other => other.as_text(),
            };
            col_widths[col] = col_widths[col].max(UnicodeWidthStr::width(shown.as_str()));
        }
    }

    for (c, w) in col_widths.iter().enumerate() {
        worksheet.set_column_width(c as u16, *w as f64 + 2.0)?;
    }

    workbook.save(path)?;

    notify_export_success("XLSX", path, entries.len());
    Ok(())
}

/// Write one typed cell on a banded background.
fn write_xlsx_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    cell: &Cell,
    bg: Color,
) -> AppResult<()> {
    let base = Format::new()
        .set_background_color(bg)
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    match cell {
        Cell::Empty => {
            worksheet.write_blank(row, col, &base)?;
        }
        Cell::Text(s) => {
            worksheet.write_with_format(row, col, s.as_str(), &base)?;
        }
        Cell::Bool(b) => {
            worksheet.write_with_format(row, col, *b, &base)?;
        }
        Cell::Number(n) => {
            let fmt = base.set_align(FormatAlign::Right);
            worksheet.write_with_format(row, col, *n, &fmt)?;
        }
        Cell::Date(d) => {
            let fmt = base.set_num_format("yyyy-mm-dd");
            worksheet.write_with_format(row, col, date_to_serial(d), &fmt)?;
        }
        Cell::Time(t) => {
            let fmt = base.set_num_format("hh:mm");
            worksheet.write_with_format(row, col, time_to_serial(t), &fmt)?;
        }
        Cell::DateTime(dt) => {
            let fmt = base.set_num_format("yyyy-mm-dd hh:mm");
            worksheet.write_with_format(row, col, datetime_to_serial(dt), &fmt)?;
        }
    }

    Ok(())
}
