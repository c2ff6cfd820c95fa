use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::add::AddLogic;
use crate::core::validate::Rules;
use crate::errors::{AppError, AppResult};
use crate::models::EntryForm;
use crate::store::LogStore;
use crate::utils::date;
use crate::utils::time::parse_required_time;

/// Log a machine usage session.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Add {
        date,
        start,
        end,
        machine,
        project,
        material,
        operator,
        description,
    } = cmd
    {
        //
        // 1. Parse date and times (mandatory)
        //
        let d = if date.eq_ignore_ascii_case("today") {
            date::today()
        } else {
            date::parse_date(date).ok_or_else(|| AppError::InvalidDate(date.to_string()))?
        };
        let start = parse_required_time(start)?;
        let end = parse_required_time(end)?;

        //
        // 2. Build the form; validation happens in the logic layer
        //
        let form = EntryForm {
            date: d,
            start,
            end,
            machine: machine.clone(),
            project: project.clone(),
            material: material.clone(),
            operator: operator.clone(),
            description: description.clone(),
        };

        //
        // 3. Execute logic
        //
        let store_cfg = cfg.store();
        let store = LogStore::new(&store_cfg);
        let rules = Rules {
            require_project: cfg.require_project,
        };

        AddLogic::apply(&store, &rules, &form)?;
    }

    Ok(())
}
