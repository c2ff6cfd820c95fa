use crate::config::Config;
use crate::errors::AppResult;
use crate::store::LogStore;
use crate::store::audit;
use crate::ui::messages::{info, success};

/// Rewrite a legacy table in the current layout.
pub fn handle(cfg: &Config) -> AppResult<()> {
    let store_cfg = cfg.store();
    let store = LogStore::new(&store_cfg);

    match store.migrate()? {
        Some(rows) => {
            success(format!(
                "Table '{}' migrated to the current layout ({} rows).",
                store.table_name(),
                rows
            ));
            audit::record_or_warn(
                store.path(),
                "migrate",
                store.table_name(),
                &format!("{} rows rewritten", rows),
            );
        }
        None => info(format!(
            "Table '{}' already uses the current layout.",
            store.table_name()
        )),
    }

    Ok(())
}
