use crate::cli::parser::Commands;
use crate::core::clean::CleanLogic;
use crate::errors::AppResult;
use crate::store::EntryStore;
use crate::ui::messages::{info, success};

pub fn handle(cmd: &Commands, store: &EntryStore) -> AppResult<()> {
    if let Commands::Clean { backup, dry_run } = cmd {
        let stats = CleanLogic::analyze(store);
        info(format!(
            "Total rows: {} | Empty rows: {} | Non-empty rows: {}",
            stats.total,
            stats.blank,
            stats.total - stats.blank
        ));

        if *dry_run {
            return Ok(());
        }
        if stats.blank == 0 {
            info("No empty rows found. No cleaning needed.");
            return Ok(());
        }

        let report = CleanLogic::apply(store, *backup)?;
        if let Some(path) = &report.backup {
            info(format!("Backup created: {}", path.display()));
        }
        success(format!(
            "Removed {} empty rows, {} rows left.",
            report.removed, report.remaining
        ));
    }

    Ok(())
}
