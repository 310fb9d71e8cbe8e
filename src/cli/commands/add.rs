use crate::cli::commands::{join_words, report_outcome};
use crate::cli::parser::Commands;
use crate::errors::{AppError, AppResult};
use crate::models::Entry;
use crate::models::entry::{TASK, is_base_column};
use crate::store::EntryStore;

/// Parse `key=value`; the key must be a new column name.
pub fn parse_field(raw: &str) -> AppResult<(String, String)> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| AppError::InvalidField(raw.to_string()))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(AppError::InvalidField(raw.to_string()));
    }
    if is_base_column(key) {
        return Err(AppError::ReservedColumn(key.to_string()));
    }
    Ok((key.to_string(), value.to_string()))
}

/// Append a free-text entry.
pub fn handle(cmd: &Commands, store: &EntryStore) -> AppResult<()> {
    if let Commands::Add { text, fields, task } = cmd {
        let mut entry = Entry::now(join_words(text));

        for raw in fields {
            let (k, v) = parse_field(raw)?;
            entry = entry.with_field(k, v);
        }
        if *task {
            entry = entry.with_field(TASK, 1);
        }

        let what = if entry.is_blank() {
            format!("Timestamp recorded: {}", entry.timestamp)
        } else {
            format!("Entry added at {}", entry.timestamp)
        };
        report_outcome(store.append(&entry), &what)?;
    }

    Ok(())
}
