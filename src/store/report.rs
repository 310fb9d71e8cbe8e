//! Notifications from the store to whoever shows them to the user.
//!
//! The store never prints anything itself: every degraded or failed outcome
//! is handed to a [`Reporter`] supplied at construction time.

use std::fmt;
use std::path::PathBuf;
use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Warning,
    Error,
    /// Data was lost.
    Critical,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The entry went to the recovery area instead of the data file.
    Deferred { reason: String, file: PathBuf },
    /// The entry could not be written anywhere.
    Lost { reason: String },
    /// Recovery files were merged back into the data file.
    Recovered { rows: usize, files: usize },
    /// Unreadable recovery files were deleted.
    Discarded { files: usize },
    /// A read or rewrite of the data file failed.
    Failed {
        operation: &'static str,
        reason: String,
    },
}

impl Notice {
    pub fn severity(&self) -> Severity {
        match self {
            Notice::Recovered { .. } => Severity::Info,
            Notice::Deferred { .. } | Notice::Discarded { .. } => Severity::Warning,
            Notice::Failed { .. } => Severity::Error,
            Notice::Lost { .. } => Severity::Critical,
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Deferred { reason, file } => write!(
                f,
                "Entry saved to temporary storage ({}). Data file is unavailable: {}",
                file.display(),
                reason
            ),
            Notice::Lost { reason } => {
                write!(f, "WARNING: could not save entry anywhere! ({})", reason)
            }
            Notice::Recovered { rows, files } => write!(
                f,
                "Recovered {} entries from {} temporary files",
                rows, files
            ),
            Notice::Discarded { files } => {
                write!(f, "Discarded {} unreadable temporary files", files)
            }
            Notice::Failed { operation, reason } => write!(f, "{} failed: {}", operation, reason),
        }
    }
}

pub trait Reporter: Send + Sync {
    fn report(&self, notice: &Notice);
}

/// Drops every notice; logging still happens inside the store.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentReporter;

impl Reporter for SilentReporter {
    fn report(&self, _notice: &Notice) {}
}

/// Keeps notices in memory until the caller collects them.
#[derive(Debug, Default)]
pub struct MemoryReporter {
    notices: Mutex<Vec<Notice>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn take(&self) -> Vec<Notice> {
        std::mem::take(&mut *self.notices.lock().unwrap_or_else(|e| e.into_inner()))
    }
}

impl Reporter for MemoryReporter {
    fn report(&self, notice: &Notice) {
        self.notices
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(notice.clone());
    }
}
