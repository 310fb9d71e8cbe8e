use crate::cli::parser::Commands;
use crate::core::backup::BackupLogic;
use crate::errors::AppResult;
use crate::store::EntryStore;
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, store: &EntryStore) -> AppResult<()> {
    if let Commands::Backup {
        dest,
        compress,
        force,
    } = cmd
    {
        let path = BackupLogic::backup(store, dest, *compress, *force)?;
        success(format!("Backup created: {}", path.display()));
    }

    Ok(())
}
