use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::query::EntryFilter;
use crate::errors::AppResult;
use crate::models::{LogEntry, SchemaVersion};
use crate::store::LogStore;
use crate::ui::messages::{info, warning};
use crate::utils::formatting::{bold, hours, mins2readable};
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List {
        period,
        machines,
        projects,
        operators,
    } = cmd
    {
        let filter = EntryFilter::from_args(period.as_deref(), machines, projects, operators)?;

        let store_cfg = cfg.store();
        let store = LogStore::new(&store_cfg);
        let loaded = store.load_table()?;

        if loaded.version != SchemaVersion::CURRENT {
            info(format!(
                "Table '{}' uses the {} layout; run `machlog migrate` to upgrade it.",
                store.table_name(),
                loaded.version.label()
            ));
        }

        let entries = filter.apply(&loaded.entries);
        if entries.is_empty() {
            warning("No entries found for the selected filters.");
            return Ok(());
        }

        print_entries(&entries);
    }
    Ok(())
}

fn print_entries(entries: &[&LogEntry]) {
    let mut table = Table::new(&[
        "Date", "Start", "End", "Duration", "Hours", "Machine", "Project", "Material",
        "Operator", "Description",
    ]);

    for e in entries {
        table.add_row(vec![
            e.date.format("%Y-%m-%d").to_string(),
            e.start.format("%H:%M").to_string(),
            e.end.format("%H:%M").to_string(),
            mins2readable(e.total_minutes),
            hours(e.total_hours),
            e.machine.clone(),
            e.project.clone(),
            e.material.clone().unwrap_or_default(),
            e.operator.clone(),
            e.description.clone().unwrap_or_default(),
        ]);
    }

    println!("{}", table.render());

    let minutes: i64 = entries.iter().map(|e| e.total_minutes).sum();
    let total: f64 = entries.iter().map(|e| e.total_hours).sum();
    println!(
        "{} {} entries, {} ({} h)",
        bold("Total:"),
        entries.len(),
        mins2readable(minutes),
        hours(total)
    );
}
