use crate::store::workbook::Cell;

/// One row of an imported machining report, tagged with its source sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub machine_type: String,
    pub machine: String,
    pub description: Option<String>,
    pub project: String,
    /// `None` when the source cell is not numeric.
    pub minutes: Option<f64>,
    pub hours: Option<f64>,
    /// The full normalized row, aligned with the table's columns.
    pub values: Vec<Cell>,
}
