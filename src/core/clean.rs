use crate::errors::{AppError, AppResult};
use crate::store::EntryStore;
use crate::utils::path::with_suffix;
use std::fs;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CleanStats {
    pub total: usize,
    pub blank: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanReport {
    pub removed: usize,
    pub remaining: usize,
    pub backup: Option<PathBuf>,
}

/// Drops entries without text (heartbeat markers) from the data file.
pub struct CleanLogic;

impl CleanLogic {
    pub fn analyze(store: &EntryStore) -> CleanStats {
        let records = store.read(None);
        CleanStats {
            total: records.len(),
            blank: records.iter().filter(|r| r.entry.is_blank()).count(),
        }
    }

    pub fn apply(store: &EntryStore, backup: bool) -> AppResult<CleanReport> {
        // pending recovery files must not be cleaned into a stale file
        store.recover_pending();

        let backup = if backup {
            let dest = with_suffix(store.path(), ".backup");
            fs::copy(store.path(), &dest)?;
            Some(dest)
        } else {
            None
        };

        let removed = store
            .retain(|e| !e.is_blank())
            .ok_or_else(|| AppError::WriteFailed("removing blank entries".into()))?;
        let remaining = store.read(None).len();

        info!(removed, remaining, "removed blank entries");
        Ok(CleanReport {
            removed,
            remaining,
            backup,
        })
    }
}
