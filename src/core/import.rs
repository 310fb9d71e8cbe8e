//! Bulk import of plain-text journals: one `<timestamp> ~ <text>` per line.

use crate::errors::{AppError, AppResult};
use crate::models::Entry;
use crate::store::{AppendOutcome, EntryStore};
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;
use tracing::{debug, info};

static LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4}-\d{2}-\d{2}\s+[A-Z]{3}\s+\d{2}:\d{2}:\d{2}\.\d{2})\s+~\s+(.+)$")
        .expect("import line pattern is valid")
});

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Parsed {
    pub entries: Vec<Entry>,
    /// 1-based numbers of non-empty lines that did not match.
    pub skipped: Vec<usize>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImportReport {
    pub imported: usize,
    pub skipped: usize,
    pub deferred: usize,
    pub lost: usize,
}

pub struct ImportLogic;

impl ImportLogic {
    pub fn parse(content: &str) -> Parsed {
        let mut parsed = Parsed::default();
        for (i, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match LINE_RE.captures(line) {
                Some(caps) => parsed.entries.push(Entry::new(&caps[1], &caps[2])),
                None => {
                    debug!(line = i + 1, "skipping malformed import line");
                    parsed.skipped.push(i + 1);
                }
            }
        }
        parsed
    }

    /// Import `source` into `store`. With `sort` the whole file is reordered
    /// by timestamp in one rewrite; otherwise each entry is appended in file order.
    pub fn import(store: &EntryStore, source: &Path, sort: bool) -> AppResult<ImportReport> {
        let content = fs::read_to_string(source)?;
        let parsed = Self::parse(&content);
        if parsed.entries.is_empty() {
            return Err(AppError::NothingToImport(source.display().to_string()));
        }

        let mut report = ImportReport {
            skipped: parsed.skipped.len(),
            ..ImportReport::default()
        };

        if sort {
            store.recover_pending();
            if !store.merge_sorted(&parsed.entries) {
                return Err(AppError::WriteFailed(format!(
                    "merging {}",
                    source.display()
                )));
            }
            report.imported = parsed.entries.len();
        } else {
            for entry in &parsed.entries {
                match store.append(entry) {
                    AppendOutcome::Committed => report.imported += 1,
                    AppendOutcome::Deferred(_) => report.deferred += 1,
                    AppendOutcome::Lost(_) => report.lost += 1,
                }
            }
        }

        info!(
            source = %source.display(),
            imported = report.imported,
            skipped = report.skipped,
            sort,
            "import finished"
        );
        Ok(report)
    }
}
