//! Viewer for multi-sheet machining reports: load, normalize, pick a project
//! and machines, aggregate hours.

use crate::config::ReportColumns;
use crate::core::aggregate::{Branch, Group, Order, group_sum, nested};
use crate::core::filter::{Selection, unique_values};
use crate::core::normalize::{
    MACHINE_TYPE_COL, NormalizedTable, concat, derive_hours, normalize_sheet, to_report_rows,
};
use crate::errors::{AppError, AppResult};
use crate::models::ReportRow;
use crate::store::workbook::read_workbook;
use clap::ValueEnum;
use std::path::Path;

/// Grouping of the report bar chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportKey {
    Machine,
    Project,
    MachineType,
    Task,
}

impl ReportKey {
    pub fn key_of(self, r: &ReportRow) -> String {
        match self {
            ReportKey::Machine => r.machine.clone(),
            ReportKey::Project => r.project.clone(),
            ReportKey::MachineType => r.machine_type.clone(),
            ReportKey::Task => task_of(r),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ReportKey::Machine => "Machine",
            ReportKey::Project => "Project",
            ReportKey::MachineType => MACHINE_TYPE_COL,
            ReportKey::Task => "Task",
        }
    }
}

fn task_of(r: &ReportRow) -> String {
    r.description
        .clone()
        .unwrap_or_else(|| "(no description)".to_string())
}

/// All sheets of a report, normalized and merged.
#[derive(Debug, Clone)]
pub struct LoadedReport {
    pub sheets: Vec<String>,
    pub table: NormalizedTable,
    pub rows: Vec<ReportRow>,
    pub has_hours: bool,
    pub has_description: bool,
}

/// What the user picked and what it adds up to.
#[derive(Debug, Clone)]
pub struct ReportView {
    pub projects: Vec<String>,
    pub project: String,
    pub machines: Vec<String>,
    pub selected_machines: Vec<String>,
    pub rows: Vec<ReportRow>,
    pub totals: Vec<Group>,
    pub breakdown: Option<Vec<Branch>>,
}

pub struct ReportLogic;

impl ReportLogic {
    pub fn load(path: &Path, cols: &ReportColumns) -> AppResult<LoadedReport> {
        let sheets = read_workbook(path)?;
        let names = sheets.iter().map(|s| s.name.clone()).collect();

        let mut table = concat(sheets.iter().map(normalize_sheet).collect());
        let has_hours = derive_hours(&mut table, &cols.minutes);
        let has_description = table.has_column(&cols.description);
        let rows = to_report_rows(&table, cols)?;

        Ok(LoadedReport {
            sheets: names,
            table,
            rows,
            has_hours,
            has_description,
        })
    }

    /// Narrow the report to one project (the first observed when none is given)
    /// and the chosen machines of that project.
    pub fn view(
        report: &LoadedReport,
        project: Option<&str>,
        machines: &Selection,
        by: ReportKey,
    ) -> AppResult<ReportView> {
        let projects = unique_values(&report.rows, |r| r.project.as_str());
        let project = match project.map(str::trim) {
            Some(p) if projects.iter().any(|x| x == p) => p.to_string(),
            Some(p) => {
                return Err(AppError::UnknownValue {
                    column: "project".into(),
                    value: p.to_string(),
                    available: projects,
                });
            }
            None => projects
                .first()
                .cloned()
                .ok_or_else(|| AppError::NoData("no project values in the report".into()))?,
        };

        let in_project: Vec<ReportRow> = report
            .rows
            .iter()
            .filter(|r| r.project == project)
            .cloned()
            .collect();

        let available = unique_values(&in_project, |r| r.machine.as_str());
        let selected_machines = machines.resolve(&available);

        let rows: Vec<ReportRow> = in_project
            .into_iter()
            .filter(|r| selected_machines.iter().any(|m| *m == r.machine))
            .collect();

        let totals = if report.has_hours {
            group_sum(&rows, |r| by.key_of(r), |r| r.hours, Order::Key)
        } else {
            Vec::new()
        };

        let breakdown = (report.has_hours && report.has_description).then(|| {
            nested(
                &rows,
                |r| r.machine.clone(),
                |r| task_of(r),
                |r| r.hours,
            )
        });

        Ok(ReportView {
            projects,
            project,
            machines: available,
            selected_machines,
            rows,
            totals,
            breakdown,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::workbook::{Cell, SheetData, write_workbook};

    fn cols() -> ReportColumns {
        ReportColumns::default()
    }

    fn t(s: &str) -> Cell {
        Cell::text(s)
    }

    fn header() -> Vec<Cell> {
        let c = cols();
        vec![
            t(&format!(" {} ", c.machine)),
            t(&c.description),
            t(&c.project),
            t(&c.minutes),
            t("Unnamed: 4"),
        ]
    }

    fn write_report(path: &Path) {
        let lathe = SheetData {
            name: "Lathe".into(),
            header: true,
            rows: vec![
                header(),
                vec![t("L1"), t("turning"), t("P-1"), Cell::Number(120.0), Cell::Empty],
                vec![t("L2"), t("facing"), t("P-2"), Cell::Number(60.0), Cell::Empty],
            ],
        };
        let cnc = SheetData {
            name: "CNC".into(),
            header: true,
            rows: vec![
                header(),
                vec![t("C1"), t("milling"), t("P-1"), Cell::Number(90.0), Cell::Empty],
                vec![t("C1"), t("drilling"), t("P-1"), t("N/A"), Cell::Empty],
                vec![t("C2"), t("milling"), t("P-1"), Cell::Number(30.0), Cell::Empty],
            ],
        };
        write_workbook(path, &[lathe, cnc]).unwrap();
    }

    #[test]
    fn loads_every_sheet_and_tags_machine_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.xlsx");
        write_report(&path);

        let report = ReportLogic::load(&path, &cols()).unwrap();
        assert_eq!(report.sheets, vec!["Lathe", "CNC"]);
        assert_eq!(report.rows.len(), 5);
        assert!(report.has_hours);
        assert!(!report.table.columns.iter().any(|c| c.starts_with("Unnamed")));
        assert_eq!(report.rows[2].machine_type, "CNC");
        assert_eq!(report.rows[3].hours, None);
    }

    #[test]
    fn default_view_is_first_project_all_machines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.xlsx");
        write_report(&path);
        let report = ReportLogic::load(&path, &cols()).unwrap();

        let view = ReportLogic::view(&report, None, &Selection::All, ReportKey::Machine).unwrap();
        assert_eq!(view.projects, vec!["P-1", "P-2"]);
        assert_eq!(view.project, "P-1");
        assert_eq!(view.machines, vec!["L1", "C1", "C2"]);
        assert_eq!(view.rows.len(), 4);

        let keys: Vec<&str> = view.totals.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["C1", "C2", "L1"]);
        assert_eq!(view.totals[0].total, 1.5);

        let tree = view.breakdown.unwrap();
        assert_eq!(tree[1].key, "C1");
        assert_eq!(tree[1].children.len(), 2);
    }

    #[test]
    fn machine_selection_and_unknown_project() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.xlsx");
        write_report(&path);
        let report = ReportLogic::load(&path, &cols()).unwrap();

        let only_c1 = Selection::Only(vec!["C1".into()]);
        let view = ReportLogic::view(&report, Some("P-1"), &only_c1, ReportKey::Task).unwrap();
        assert_eq!(view.selected_machines, vec!["C1"]);
        let keys: Vec<&str> = view.totals.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["drilling", "milling"]);

        let err = ReportLogic::view(&report, Some("P-9"), &Selection::All, ReportKey::Machine)
            .unwrap_err();
        assert!(matches!(err, AppError::UnknownValue { .. }));
    }
}
