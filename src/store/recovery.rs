//! Overflow directory for entries that could not reach the data file.
//!
//! Each file holds a header and (normally) one row, named
//! `temp_<YYYYMMDD_HHMMSS_mmm>_<seq>.csv` so that a plain name sort gives
//! submission order. A file is either drained (merged, then deleted) or
//! discarded (unreadable, deleted); it stays put only while the data file is
//! unreachable.

use crate::errors::{AppError, AppResult};
use crate::models::Entry;
use crate::models::entry::TIMESTAMP;
use crate::store::schema::Schema;
use crate::store::table::{self, encode};
use crate::utils::fs::sync_parent;
use crate::utils::timestamp::file_stamp;
use chrono::Local;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{error, info, warn};

const PREFIX: &str = "temp_";
const EXTENSION: &str = "csv";
const MAX_NAME_ATTEMPTS: usize = 64;

/// Outcome of one drain pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DrainReport {
    /// Rows appended to the data file.
    pub recovered: usize,
    /// Files merged and deleted.
    pub files: usize,
    /// Unreadable files deleted without merging.
    pub discarded: usize,
    /// Set when the data file rejected a write; remaining files were left in place.
    pub blocked: Option<String>,
}

impl DrainReport {
    pub fn is_noop(&self) -> bool {
        self.files == 0 && self.discarded == 0 && self.blocked.is_none()
    }
}

#[derive(Debug)]
pub struct RecoveryArea {
    dir: PathBuf,
    seq: AtomicU64,
}

impl RecoveryArea {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            seq: AtomicU64::new(0),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Recovery files currently waiting, oldest first.
    /// A missing directory simply means nothing is pending.
    pub fn pending(&self) -> Vec<PathBuf> {
        let read = match fs::read_dir(&self.dir) {
            Ok(r) => r,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                warn!(dir = %self.dir.display(), error = %e, "cannot list recovery directory");
                return Vec::new();
            }
        };

        let mut files: Vec<PathBuf> = read
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == EXTENSION))
            .collect();
        files.sort();
        files
    }

    /// Persist `entry` as a new single-row file and return its path.
    pub fn write_overflow(&self, entry: &Entry) -> AppResult<PathBuf> {
        fs::create_dir_all(&self.dir)?;

        let schema = Schema::for_entry(entry);
        let row = schema.row_for(entry);
        let data = encode(&schema, &[row.into()])?;

        for _ in 0..MAX_NAME_ATTEMPTS {
            let seq = self.seq.fetch_add(1, Ordering::Relaxed);
            let name = format!(
                "{}{}_{:04}.{}",
                PREFIX,
                file_stamp(&Local::now()),
                seq,
                EXTENSION
            );
            let path = self.dir.join(name);

            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(mut f) => {
                    if let Err(e) = f.write_all(&data).and_then(|_| f.sync_all()) {
                        drop(f);
                        let _ = fs::remove_file(&path);
                        return Err(e.into());
                    }
                    sync_parent(&path);
                    return Ok(path);
                }
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(e.into()),
            }
        }

        Err(AppError::Other(format!(
            "no free recovery file name in {}",
            self.dir.display()
        )))
    }

    /// Merge every pending file into `primary`, oldest first.
    ///
    /// Stops at the first write the data file rejects; that file and all
    /// later ones stay in place for the next pass.
    pub fn drain_into(&self, primary: &Path) -> DrainReport {
        let mut report = DrainReport::default();

        for path in self.pending() {
            let entries = match read_overflow(&path) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!(file = %path.display(), error = %e, "discarding unreadable recovery file");
                    if let Err(e) = fs::remove_file(&path) {
                        error!(file = %path.display(), error = %e, "cannot delete recovery file");
                    }
                    report.discarded += 1;
                    continue;
                }
            };

            for entry in &entries {
                if let Err(e) = table::append_entry(primary, entry) {
                    warn!(file = %path.display(), error = %e, "data file unavailable, recovery postponed");
                    report.blocked = Some(e.to_string());
                    return report;
                }
                report.recovered += 1;
            }

            // a file we cannot delete is merged again next time
            if let Err(e) = fs::remove_file(&path) {
                error!(file = %path.display(), error = %e, "cannot delete drained recovery file");
            }
            report.files += 1;
        }

        if report.recovered > 0 {
            info!(
                rows = report.recovered,
                files = report.files,
                "recovered entries from temporary files"
            );
        }
        report
    }
}

fn read_overflow(path: &Path) -> AppResult<Vec<Entry>> {
    let table = table::read_table(path)?;
    if !table.schema.contains(TIMESTAMP) {
        return Err(AppError::MissingHeader(path.display().to_string()));
    }
    Ok(table.entries().collect())
}
