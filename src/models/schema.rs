//! Versioned column layout of the log table.
//!
//! V1 is the simple six-column log, V2 the detailed ten-column one. V2 is
//! the only layout ever written; V1 tables are read and migrated.

use crate::errors::{AppError, AppResult};

pub const COL_DATE: &str = "Date";
pub const COL_START: &str = "Start Time";
pub const COL_END: &str = "End Time";
pub const COL_MINUTES: &str = "Total Minutes";
pub const COL_HOURS: &str = "Total Hours";
pub const COL_MACHINE: &str = "Machine";
pub const COL_PROJECT: &str = "Project";
pub const COL_MATERIAL: &str = "Material";
pub const COL_OPERATOR: &str = "Operator";
pub const COL_DESCRIPTION: &str = "Description";

pub const V1_COLUMNS: [&str; 6] = [
    COL_DATE,
    COL_START,
    COL_END,
    COL_MACHINE,
    COL_OPERATOR,
    COL_HOURS,
];

pub const V2_COLUMNS: [&str; 10] = [
    COL_DATE,
    COL_START,
    COL_END,
    COL_MINUTES,
    COL_HOURS,
    COL_MACHINE,
    COL_PROJECT,
    COL_MATERIAL,
    COL_OPERATOR,
    COL_DESCRIPTION,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaVersion {
    V1,
    V2,
}

impl SchemaVersion {
    pub const CURRENT: SchemaVersion = SchemaVersion::V2;

    pub fn columns(self) -> &'static [&'static str] {
        match self {
            SchemaVersion::V1 => &V1_COLUMNS,
            SchemaVersion::V2 => &V2_COLUMNS,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SchemaVersion::V1 => "v1 (6 columns)",
            SchemaVersion::V2 => "v2 (10 columns)",
        }
    }

    /// Detect the layout from a header row. Trailing blank headers are ignored.
    pub fn detect(header: &[String]) -> AppResult<Self> {
        let mut names: Vec<String> = header.iter().map(|h| h.trim().to_string()).collect();
        while names.last().is_some_and(|h| h.is_empty()) {
            names.pop();
        }

        for version in [SchemaVersion::V2, SchemaVersion::V1] {
            if names.iter().map(String::as_str).eq(version.columns().iter().copied()) {
                return Ok(version);
            }
        }

        // Report against V2 unless the header carries none of its extra columns.
        let has_v2_only = [COL_MINUTES, COL_PROJECT, COL_MATERIAL, COL_DESCRIPTION]
            .iter()
            .any(|c| names.iter().any(|n| n == c));
        let closest = if has_v2_only {
            SchemaVersion::V2
        } else {
            SchemaVersion::V1
        };

        let missing: Vec<&str> = closest
            .columns()
            .iter()
            .copied()
            .filter(|c| !names.iter().any(|n| n == c))
            .collect();

        if missing.is_empty() {
            // Right names, wrong order.
            return Err(AppError::Schema {
                missing: vec![format!("column order {:?}", closest.columns())],
                available: names,
            });
        }

        Err(AppError::schema(&missing, &names))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(cols: &[&str]) -> Vec<String> {
        cols.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn detects_both_layouts() {
        assert_eq!(
            SchemaVersion::detect(&header(&V2_COLUMNS)).unwrap(),
            SchemaVersion::V2
        );
        let mut v1 = header(&V1_COLUMNS);
        v1.push(String::new());
        assert_eq!(SchemaVersion::detect(&v1).unwrap(), SchemaVersion::V1);
    }

    #[test]
    fn unknown_header_lists_present_columns() {
        let err = SchemaVersion::detect(&header(&["Date", "Machine", "Hours"])).unwrap_err();
        match err {
            AppError::Schema { missing, available } => {
                assert!(missing.contains(&"Total Hours".to_string()));
                assert_eq!(available, vec!["Date", "Machine", "Hours"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
