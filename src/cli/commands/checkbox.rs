use crate::cli::commands::{join_words, report_outcome};
use crate::cli::parser::Commands;
use crate::core::toggle::{ToggleLogic, ToggleTarget};
use crate::errors::{AppError, AppResult};
use crate::models::{Entry, checkbox};
use crate::store::EntryStore;
use crate::ui::messages::success;

/// Handle `todo`, `done` and `toggle`.
pub fn handle(cmd: &Commands, store: &EntryStore) -> AppResult<()> {
    match cmd {
        Commands::Todo { text } => {
            let content = join_words(text);
            let entry = Entry::now(checkbox::unchecked(&content));
            report_outcome(store.append(&entry), &format!("Added todo item: {}", content))
        }
        Commands::Done { text } => {
            let content = join_words(text);
            let entry = Entry::now(checkbox::checked(&content));
            report_outcome(
                store.append(&entry),
                &format!("Added completed item: {}", content),
            )
        }
        Commands::Toggle { target } => {
            let raw = join_words(target);
            let target = ToggleTarget::parse(&raw)
                .ok_or_else(|| AppError::EntryNotFound("empty toggle target".into()))?;

            let toggled = ToggleLogic::apply(store, &target)?;
            let state = if toggled.checked { "Checked" } else { "Unchecked" };
            success(format!("{} #{}: {}", state, toggled.position, toggled.content));
            Ok(())
        }
        _ => Ok(()),
    }
}
