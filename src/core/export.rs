//! Plain-text export: entry texts run together, with one line break for
//! every full `gap` that passed between two consecutive entries.

use crate::errors::AppResult;
use crate::models::Record;
use crate::store::EntryStore;
use crate::utils::fs::ensure_writable;
use crate::utils::timestamp::parse_timestamp;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub struct ExportLogic;

impl ExportLogic {
    /// Render `records`; blank entries and unparsable timestamps are skipped.
    pub fn render(records: &[Record], gap: Duration) -> String {
        let gap_ms = gap.as_millis().max(1) as i64;
        let mut out = String::new();
        let mut prev: Option<chrono::NaiveDateTime> = None;

        for rec in records.iter().filter(|r| !r.entry.is_blank()) {
            let Some(at) = parse_timestamp(&rec.entry.timestamp) else {
                continue;
            };
            if let Some(prev) = prev {
                let elapsed = (at - prev).num_milliseconds();
                // out-of-order rows count as no gap
                let breaks = (elapsed / gap_ms).max(0) as usize;
                out.push_str(&"\n".repeat(breaks));
            }
            out.push_str(&rec.entry.text);
            prev = Some(at);
        }
        out
    }

    /// Write the rendered journal to `dest`; returns the number of bytes written.
    pub fn export(store: &EntryStore, dest: &Path, gap: Duration, force: bool) -> AppResult<usize> {
        ensure_writable(dest, force)?;
        store.recover_pending();

        let text = Self::render(&store.read(None), gap);
        if let Some(parent) = dest.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(dest, &text)?;

        info!(dest = %dest.display(), bytes = text.len(), "journal exported");
        Ok(text.len())
    }
}
