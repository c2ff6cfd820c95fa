use crate::cli::parser::Cli;
use crate::config::Config;
use crate::errors::AppResult;
use crate::store::audit;
use crate::store::{InitOutcome, LogStore};

/// Handle the `init` command
///
/// This initializes:
///  - the config directory and file (skipped in test mode)
///  - the storage workbook and its log table
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    cfg.init_all(cli.test)?;

    let store_cfg = cfg.store();
    let store = LogStore::new(&store_cfg);

    println!("⚙️  Initializing machlog…");
    println!("📄 Config file : {}", Config::config_file().display());
    println!("📗 Workbook    : {}", store.path().display());
    println!("📑 Table       : {}", store.table_name());

    let outcome = store.ensure_initialized()?;
    let message = match outcome {
        InitOutcome::CreatedFile => "Workbook created",
        InitOutcome::AddedTable => "Log table added to existing workbook",
        InitOutcome::AlreadyPresent => "Workbook already initialized",
    };
    println!("✅ {}", message);

    audit::record_or_warn(store.path(), "init", store.table_name(), message);

    println!("🎉 machlog initialization completed!");
    Ok(())
}
