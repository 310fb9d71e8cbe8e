use crate::errors::{AppError, AppResult};
use crate::models::Entry;
use crate::models::entry::COMPLETED;
use crate::store::EntryStore;
use crate::store::table;
use crate::utils::fs::ensure_writable;
use csv::StringRecord;
use std::fs;
use std::path::Path;
use tracing::info;

/// Which tasks an operation looks at.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TaskFilter {
    All,
    /// Tasks not marked completed.
    #[default]
    Pending,
    Completed,
}

impl TaskFilter {
    pub fn matches(self, entry: &Entry) -> bool {
        entry.is_task()
            && match self {
                TaskFilter::All => true,
                TaskFilter::Pending => !entry.is_completed(),
                TaskFilter::Completed => entry.is_completed(),
            }
    }

    pub fn label(self) -> &'static str {
        match self {
            TaskFilter::All => "",
            TaskFilter::Pending => "pending ",
            TaskFilter::Completed => "completed ",
        }
    }
}

pub struct TaskLogic;

impl TaskLogic {
    /// Mark the task at `position` as completed; returns its text.
    pub fn complete(store: &EntryStore, position: usize) -> AppResult<String> {
        let record = store
            .read(None)
            .into_iter()
            .find(|r| r.position == position)
            .ok_or(AppError::InvalidPosition(position))?;

        if !record.entry.is_task() {
            return Err(AppError::NotATask(position));
        }
        if !record.entry.is_completed() && !store.set_field(position, COMPLETED, "1") {
            return Err(AppError::WriteFailed(format!(
                "completing task #{}",
                position
            )));
        }

        info!(position, "task completed");
        Ok(record.entry.text)
    }

    /// Write the tasks selected by `filter` to `dest` as CSV with the data
    /// file's header. Returns the number of rows written.
    pub fn extract(
        store: &EntryStore,
        dest: &Path,
        filter: TaskFilter,
        force: bool,
    ) -> AppResult<usize> {
        store.recover_pending();

        let schema = store
            .schema()
            .ok_or_else(|| AppError::MissingHeader(store.path().display().to_string()))?;
        let tasks = store.read_filtered(None, |e| filter.matches(e));
        if tasks.is_empty() {
            return Err(AppError::EntryNotFound(format!(
                "no {}tasks in {}",
                filter.label(),
                store.path().display()
            )));
        }

        ensure_writable(dest, force)?;
        if let Some(parent) = dest.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let rows: Vec<StringRecord> = tasks
            .iter()
            .map(|r| schema.row_for(&r.entry).into())
            .collect();
        fs::write(dest, table::encode(&schema, &rows)?)?;

        info!(dest = %dest.display(), count = rows.len(), "tasks extracted");
        Ok(rows.len())
    }
}
