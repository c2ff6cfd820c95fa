use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::export::ExportLogic;
use crate::store::LogStore;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        out,
        period,
        force,
    } = cmd
    {
        let store_cfg = cfg.store();
        let store = LogStore::new(&store_cfg);
        ExportLogic::export(&store, *format, out, period, *force)?;
    }
    Ok(())
}
