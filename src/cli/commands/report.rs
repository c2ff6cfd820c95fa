use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::aggregate::grand_total;
use crate::core::filter::Selection;
use crate::core::normalize::HOURS_COL;
use crate::core::report::{LoadedReport, ReportLogic, ReportView};
use crate::errors::AppResult;
use crate::ui::chart::{bar_chart, breakdown};
use crate::ui::messages::{bullets, info, section, warning};
use crate::utils::formatting::{bold, hours, opt_hours};
use crate::utils::table::Table;
use std::path::Path;

/// View an uploaded machining report: project, machines, totals and breakdown.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Report {
        workbook,
        project,
        machines,
        by,
    } = cmd
    {
        let report = ReportLogic::load(Path::new(workbook), &cfg.report)?;
        info(format!(
            "Loaded {} rows from {} sheet(s): {}",
            report.rows.len(),
            report.sheets.len(),
            report.sheets.join(", ")
        ));

        let selection = Selection::from_values(machines);
        let view = ReportLogic::view(&report, project.as_deref(), &selection, *by)?;

        if project.is_none() {
            bullets("Projects", &view.projects);
            info(format!("Showing the first project: {}", view.project));
        }

        if view.selected_machines.is_empty() {
            warning("Select at least one machine of this project.");
            bullets("Machines", &view.machines);
            return Ok(());
        }

        print_rows(&report, &view);

        if !report.has_hours {
            warning(format!(
                "Column '{}' not found: hours cannot be charted.",
                cfg.report.minutes
            ));
            return Ok(());
        }

        section(format!("Project {}", view.project));
        print!(
            "{}",
            bar_chart(&format!("Total hours by {}", by.label()), &view.totals)
        );
        println!("{} {} h", bold("Total:"), hours(grand_total(&view.totals)));

        match &view.breakdown {
            Some(tree) => {
                println!();
                print!("{}", breakdown("Machine → task", tree));
            }
            None => warning(format!(
                "Column '{}' not found: machine → task breakdown skipped.",
                cfg.report.description
            )),
        }
    }
    Ok(())
}

/// The filtered rows with every normalized column.
fn print_rows(report: &LoadedReport, view: &ReportView) {
    section(format!(
        "{} rows for project {} ({})",
        view.rows.len(),
        view.project,
        view.selected_machines.join(", ")
    ));

    let hours_idx = report.table.column_index(HOURS_COL);

    let mut table = Table::new(&report.table.columns);
    for r in &view.rows {
        let mut cells: Vec<String> = r
            .values
            .iter()
            .enumerate()
            .map(|(i, c)| {
                if Some(i) == hours_idx {
                    opt_hours(c.as_number())
                } else {
                    c.as_text()
                }
            })
            .collect();
        cells.resize(report.table.columns.len(), String::new());
        table.add_row(cells);
    }
    println!("{}", table.render());
}
