use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::aggregate::grand_total;
use crate::core::query::{EntryFilter, summarize};
use crate::errors::AppResult;
use crate::store::LogStore;
use crate::ui::chart::bar_chart;
use crate::ui::messages::{section, warning};
use crate::utils::formatting::{bold, hours};
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Summary {
        by,
        period,
        machines,
        projects,
        operators,
        chart,
    } = cmd
    {
        let filter = EntryFilter::from_args(period.as_deref(), machines, projects, operators)?;

        let store_cfg = cfg.store();
        let store = LogStore::new(&store_cfg);
        let all = store.load_all()?;
        let entries = filter.apply(&all);

        if entries.is_empty() {
            warning("No entries found for the selected filters.");
            return Ok(());
        }

        let groups = summarize(&entries, *by);

        section(format!("Total hours by {}", by.label().to_lowercase()));
        let mut table = Table::new(&[by.label(), "Hours"]);
        for g in &groups {
            table.add_row(vec![g.key.clone(), hours(g.total)]);
        }
        println!("{}", table.render());
        println!(
            "{} {} h over {} entries",
            bold("Total:"),
            hours(grand_total(&groups)),
            entries.len()
        );

        if *chart {
            println!();
            print!("{}", bar_chart(&format!("Hours by {}", by.label()), &groups));
        }
    }
    Ok(())
}
