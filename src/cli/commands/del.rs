use crate::cli::parser::Commands;
use crate::errors::{AppError, AppResult};
use crate::store::EntryStore;
use crate::ui::messages::{info, success, warning};

use std::io::{self, Write};

/// Ask a yes/no confirmation from the user
fn ask_confirmation(prompt: &str) -> bool {
    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}

pub fn handle(cmd: &Commands, store: &EntryStore) -> AppResult<()> {
    if let Commands::Del { position, yes } = cmd {
        let target = store
            .read(None)
            .into_iter()
            .find(|r| r.position == *position)
            .ok_or(AppError::InvalidPosition(*position))?;

        if !*yes {
            let prompt = format!(
                "Delete entry #{} ({} | {})? This action is irreversible.",
                position, target.entry.timestamp, target.entry.text
            );
            if !ask_confirmation(&prompt) {
                info("Operation cancelled.");
                return Ok(());
            }
        }

        if !store.delete(*position) {
            return Err(AppError::InvalidPosition(*position));
        }
        success(format!("Entry #{} has been deleted.", position));
    }

    Ok(())
}
