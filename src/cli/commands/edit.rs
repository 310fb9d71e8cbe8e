use crate::cli::commands::join_words;
use crate::cli::parser::Commands;
use crate::errors::{AppError, AppResult};
use crate::store::EntryStore;
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, store: &EntryStore) -> AppResult<()> {
    if let Commands::Edit { position, text } = cmd {
        let text = join_words(text);
        if !store.update(*position, &text) {
            return Err(AppError::InvalidPosition(*position));
        }
        success(format!("Entry #{} updated.", position));
    }

    Ok(())
}
