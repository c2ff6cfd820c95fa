use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::log::LogLogic;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if matches!(cmd, Commands::Log { print: true }) {
        let store_cfg = cfg.store();
        LogLogic::print_log(&store_cfg.storage_path)?;
    }

    Ok(())
}
