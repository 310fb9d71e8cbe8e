use crate::cli::parser::Commands;
use crate::core::tasks::{TaskFilter, TaskLogic};
use crate::errors::AppResult;
use crate::store::EntryStore;
use crate::ui::messages::success;
use std::path::Path;

/// Handle `complete` and `extract`.
pub fn handle(cmd: &Commands, store: &EntryStore) -> AppResult<()> {
    match cmd {
        Commands::Complete { position } => {
            let text = TaskLogic::complete(store, *position)?;
            success(format!("Task #{} completed: {}", position, text));
            Ok(())
        }
        Commands::Extract {
            dest,
            pending,
            completed,
            force,
        } => {
            let filter = match (*pending, *completed) {
                (true, _) => TaskFilter::Pending,
                (_, true) => TaskFilter::Completed,
                _ => TaskFilter::All,
            };
            let count = TaskLogic::extract(store, Path::new(dest), filter, *force)?;
            success(format!(
                "Extracted {} {}tasks to {}",
                count,
                filter.label(),
                dest
            ));
            Ok(())
        }
        _ => Ok(()),
    }
}
