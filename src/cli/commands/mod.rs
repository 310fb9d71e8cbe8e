pub mod add;
pub mod backup;
pub mod checkbox;
pub mod clean;
pub mod config;
pub mod del;
pub mod edit;
pub mod export;
pub mod import;
pub mod init;
pub mod list;
pub mod recover;
pub mod search;
pub mod session;
pub mod tasks;

use crate::errors::{AppError, AppResult};
use crate::models::Record;
use crate::store::AppendOutcome;
use crate::ui::messages::{success, warning};

/// Join positional words back into one text.
pub(crate) fn join_words(words: &[String]) -> String {
    words.join(" ")
}

/// Turn an append outcome into user feedback; data loss is an error.
pub(crate) fn report_outcome(outcome: AppendOutcome, what: &str) -> AppResult<()> {
    match outcome {
        AppendOutcome::Committed => {
            success(what);
            Ok(())
        }
        AppendOutcome::Deferred(_) => {
            warning(format!("{} (kept in temporary storage)", what));
            Ok(())
        }
        AppendOutcome::Lost(reason) => Err(AppError::EntryLost(reason)),
    }
}

pub(crate) fn print_records(records: &[Record]) {
    for rec in records {
        let extras: Vec<String> = rec
            .entry
            .extra_fields()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect();

        if extras.is_empty() {
            println!("{:>5} | {} | {}", rec.position, rec.entry.timestamp, rec.entry.text);
        } else {
            println!(
                "{:>5} | {} | {} [{}]",
                rec.position,
                rec.entry.timestamp,
                rec.entry.text,
                extras.join(", ")
            );
        }
    }
}

pub(crate) fn print_json(records: &[Record]) -> AppResult<()> {
    println!("{}", serde_json::to_string_pretty(records)?);
    Ok(())
}
