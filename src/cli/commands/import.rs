use crate::cli::parser::Commands;
use crate::core::import::ImportLogic;
use crate::errors::{AppError, AppResult};
use crate::store::EntryStore;
use crate::ui::messages::{success, warning};
use std::path::Path;

pub fn handle(cmd: &Commands, store: &EntryStore) -> AppResult<()> {
    if let Commands::Import { source, sort } = cmd {
        let report = ImportLogic::import(store, Path::new(source), *sort)?;

        success(format!(
            "Imported {} entries ({} skipped)",
            report.imported, report.skipped
        ));
        if report.deferred > 0 {
            warning(format!(
                "{} entries kept in temporary storage",
                report.deferred
            ));
        }
        if report.lost > 0 {
            return Err(AppError::EntryLost(format!(
                "{} imported entries could not be saved",
                report.lost
            )));
        }
    }

    Ok(())
}
