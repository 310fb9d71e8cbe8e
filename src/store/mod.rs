//! Append-only journal store over a single CSV data file.
//!
//! Every public operation turns failures into explicit values (an
//! [`AppendOutcome`], a `bool`, an `Option` or an empty `Vec`) and hands a
//! [`Notice`] to the configured [`Reporter`]; nothing here panics or returns
//! an error to the input loop.
//!
//! All file access goes through one mutex per store, so a heartbeat thread
//! and the interactive caller can share the store behind an `Arc`.

pub mod recovery;
pub mod report;
pub mod schema;
pub mod table;

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::{Entry, Record};
use crate::models::entry::{TEXT, TIMESTAMP};
use recovery::{DrainReport, RecoveryArea};
use report::{Notice, Reporter};
use schema::Schema;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use table::Table;
use tracing::{debug, error, warn};

/// Where an appended entry ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppendOutcome {
    /// Written to the data file.
    Committed,
    /// Written to the recovery area; merged on a later write.
    Deferred(String),
    /// Written nowhere.
    Lost(String),
}

impl AppendOutcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, AppendOutcome::Committed)
    }

    pub fn is_deferred(&self) -> bool {
        matches!(self, AppendOutcome::Deferred(_))
    }

    pub fn is_lost(&self) -> bool {
        matches!(self, AppendOutcome::Lost(_))
    }
}

pub struct EntryStore {
    primary: PathBuf,
    recovery: RecoveryArea,
    reporter: Arc<dyn Reporter>,
    lock: Mutex<()>,
}

impl EntryStore {
    /// Build a store without touching the filesystem.
    pub fn new(
        primary: impl Into<PathBuf>,
        recovery_dir: impl Into<PathBuf>,
        reporter: Arc<dyn Reporter>,
    ) -> Self {
        Self {
            primary: primary.into(),
            recovery: RecoveryArea::new(recovery_dir),
            reporter,
            lock: Mutex::new(()),
        }
    }

    /// Build a store and make sure the data file exists.
    pub fn open(
        primary: impl Into<PathBuf>,
        recovery_dir: impl Into<PathBuf>,
        reporter: Arc<dyn Reporter>,
    ) -> Self {
        let store = Self::new(primary, recovery_dir, reporter);
        store.ensure_initialized();
        store
    }

    pub fn from_config(cfg: &Config, reporter: Arc<dyn Reporter>) -> Self {
        Self::open(cfg.data_path(), cfg.recovery_path(), reporter)
    }

    pub fn path(&self) -> &Path {
        &self.primary
    }

    pub fn recovery(&self) -> &RecoveryArea {
        &self.recovery
    }

    fn guard(&self) -> MutexGuard<'_, ()> {
        // the mutex protects no data, only the file
        self.lock.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn fail(&self, operation: &'static str, e: &AppError) {
        error!(operation, path = %self.primary.display(), error = %e, "data file operation failed");
        self.reporter.report(&Notice::Failed {
            operation,
            reason: e.to_string(),
        });
    }

    /// Create the data file with the base header if it does not exist.
    ///
    /// On failure the store stays usable: appends fall back to the recovery area.
    pub fn ensure_initialized(&self) -> bool {
        let _g = self.guard();
        match table::ensure_file(&self.primary) {
            Ok(_) => true,
            Err(e) => {
                self.fail("initialize data file", &e);
                false
            }
        }
    }

    /// Append `entry` after draining any pending recovery files.
    pub fn append(&self, entry: &Entry) -> AppendOutcome {
        let _g = self.guard();

        let drained = self.drain_locked();
        let attempt = match drained.blocked {
            // keep submission order: nothing may overtake a pending file
            Some(reason) => Err(AppError::Other(reason)),
            None => table::append_entry(&self.primary, entry),
        };

        let reason = match attempt {
            Ok(()) => {
                debug!(timestamp = %entry.timestamp, "entry committed");
                return AppendOutcome::Committed;
            }
            Err(e) => e.to_string(),
        };

        warn!(path = %self.primary.display(), error = %reason, "data file unavailable, deferring entry");

        match self.recovery.write_overflow(entry) {
            Ok(file) => {
                self.reporter.report(&Notice::Deferred {
                    reason: reason.clone(),
                    file,
                });
                AppendOutcome::Deferred(reason)
            }
            Err(e) => {
                let reason = format!("{}; recovery area: {}", reason, e);
                error!(
                    timestamp = %entry.timestamp,
                    text = %entry.text,
                    error = %reason,
                    "entry lost"
                );
                self.reporter.report(&Notice::Lost {
                    reason: reason.clone(),
                });
                AppendOutcome::Lost(reason)
            }
        }
    }

    /// Merge pending recovery files into the data file.
    pub fn recover_pending(&self) -> DrainReport {
        let _g = self.guard();
        self.drain_locked()
    }

    fn drain_locked(&self) -> DrainReport {
        let report = self.recovery.drain_into(&self.primary);
        if report.recovered > 0 {
            self.reporter.report(&Notice::Recovered {
                rows: report.recovered,
                files: report.files,
            });
        }
        if report.discarded > 0 {
            self.reporter.report(&Notice::Discarded {
                files: report.discarded,
            });
        }
        report
    }

    /// Current header of the data file.
    pub fn schema(&self) -> Option<Schema> {
        let _g = self.guard();
        match table::read_schema(&self.primary) {
            Ok(schema) => Some(schema),
            Err(e) => {
                self.fail("read header", &e);
                None
            }
        }
    }

    fn load(&self, operation: &'static str) -> Option<Table> {
        if !self.primary.exists() {
            return None;
        }
        match table::read_table(&self.primary) {
            Ok(t) => Some(t),
            Err(e) => {
                self.fail(operation, &e);
                None
            }
        }
    }

    /// Last `limit` entries (all of them for `None` or `Some(0)`).
    pub fn read(&self, limit: Option<usize>) -> Vec<Record> {
        self.read_filtered(limit, |_| true)
    }

    /// Last `limit` entries matching `predicate`.
    pub fn read_filtered<F>(&self, limit: Option<usize>, predicate: F) -> Vec<Record>
    where
        F: Fn(&Entry) -> bool,
    {
        let table = {
            let _g = self.guard();
            match self.load("read entries") {
                Some(t) => t,
                None => return Vec::new(),
            }
        };

        let mut records: Vec<Record> = table
            .entries()
            .enumerate()
            .filter(|(_, e)| predicate(e))
            .map(|(position, entry)| Record { position, entry })
            .collect();

        if let Some(n) = limit.filter(|n| *n > 0)
            && records.len() > n
        {
            records.drain(..records.len() - n);
        }
        records
    }

    /// Case-insensitive substring search over the text column.
    pub fn search(&self, query: &str) -> Vec<Record> {
        let needle = query.to_lowercase();
        self.read_filtered(None, |e| e.text.to_lowercase().contains(&needle))
    }

    /// Replace the text of the row at `position`.
    ///
    /// Positions are row indexes at the time of the call; a concurrent
    /// rewrite can shift them and the last write wins.
    pub fn update(&self, position: usize, new_text: &str) -> bool {
        self.rewrite("update entry", |table| {
            let col = match table.schema.index_of(TEXT) {
                Some(c) => c,
                None => return Err(AppError::MissingHeader(TEXT.into())),
            };
            let row = table
                .rows
                .get(position)
                .ok_or(AppError::InvalidPosition(position))?;
            let mut fields: Vec<String> = table
                .schema
                .normalize(row)
                .iter()
                .map(str::to_string)
                .collect();
            fields[col] = new_text.to_string();
            table.rows[position] = fields.into();
            Ok(())
        })
    }

    /// Set column `name` of the row at `position`, adding the column when the
    /// header lacks it. Base columns are addressed by their names too.
    pub fn set_field(&self, position: usize, name: &str, value: &str) -> bool {
        self.rewrite("update field", |table| {
            if position >= table.rows.len() {
                return Err(AppError::InvalidPosition(position));
            }
            table.schema.extend(&[name.to_string()]);
            let col = match table.schema.index_of(name) {
                Some(c) => c,
                None => return Err(AppError::MissingHeader(name.into())),
            };
            let mut fields: Vec<String> = table
                .schema
                .normalize(&table.rows[position])
                .iter()
                .map(str::to_string)
                .collect();
            fields[col] = value.to_string();
            table.rows[position] = fields.into();
            Ok(())
        })
    }

    /// Add `entries` and reorder every row by timestamp.
    ///
    /// The sort is stable, so rows sharing a timestamp keep their relative
    /// order and existing rows come before imported ones.
    pub fn merge_sorted(&self, entries: &[Entry]) -> bool {
        self.rewrite("merge entries", |table| {
            for entry in entries {
                let missing = table.schema.missing_for(entry);
                table.schema.extend(&missing);
            }
            for entry in entries {
                table.rows.push(table.schema.row_for(entry).into());
            }
            let col = table
                .schema
                .index_of(TIMESTAMP)
                .ok_or_else(|| AppError::MissingHeader(TIMESTAMP.into()))?;
            table
                .rows
                .sort_by(|a, b| a.get(col).unwrap_or("").cmp(b.get(col).unwrap_or("")));
            Ok(())
        })
    }

    /// Remove the row at `position`; out-of-range positions leave the file untouched.
    pub fn delete(&self, position: usize) -> bool {
        self.rewrite("delete entry", |table| {
            if position >= table.rows.len() {
                return Err(AppError::InvalidPosition(position));
            }
            table.rows.remove(position);
            Ok(())
        })
    }

    /// Keep only entries matching `keep`; returns how many rows were removed.
    pub fn retain<F>(&self, keep: F) -> Option<usize>
    where
        F: Fn(&Entry) -> bool,
    {
        let mut removed = 0;
        let ok = self.rewrite("remove entries", |table| {
            let before = table.rows.len();
            let schema = table.schema.clone();
            table.rows.retain(|r| keep(&schema.entry_from(r)));
            removed = before - table.rows.len();
            Ok(())
        });
        ok.then_some(removed)
    }

    /// Read-modify-write of the whole file under the store lock.
    /// Nothing is written when `edit` fails.
    fn rewrite<F>(&self, operation: &'static str, edit: F) -> bool
    where
        F: FnOnce(&mut Table) -> AppResult<()>,
    {
        let _g = self.guard();
        let result = table::read_table(&self.primary).and_then(|mut t| {
            edit(&mut t)?;
            table::write_table(&self.primary, &t)
        });

        match result {
            Ok(()) => true,
            Err(AppError::InvalidPosition(p)) => {
                debug!(operation, position = p, "position out of range");
                false
            }
            Err(e) => {
                self.fail(operation, &e);
                false
            }
        }
    }
}
