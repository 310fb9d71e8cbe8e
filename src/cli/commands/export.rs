use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::export::ExportLogic;
use crate::errors::AppResult;
use crate::store::EntryStore;
use crate::ui::messages::success;
use std::path::Path;
use std::time::Duration;

pub fn handle(cmd: &Commands, cfg: &Config, store: &EntryStore) -> AppResult<()> {
    if let Commands::Export { dest, gap, force } = cmd {
        let gap = Duration::from_secs(gap.unwrap_or(cfg.export_gap).max(1));
        ExportLogic::export(store, Path::new(dest), gap, *force)?;
        success(format!("Journal exported to {}", dest));
    }

    Ok(())
}
