use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::backup::BackupLogic;
use crate::errors::AppResult;
use crate::store::LogStore;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Backup {
        out,
        compress,
        force,
    } = cmd
    {
        let store_cfg = cfg.store();
        let store = LogStore::new(&store_cfg);
        BackupLogic::backup(&store, out, *compress, *force)?;
    }

    Ok(())
}
