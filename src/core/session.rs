//! Interactive entry loop: every non-empty input line becomes an entry.

use crate::core::heartbeat::Heartbeat;
use crate::errors::AppResult;
use crate::models::Entry;
use crate::store::{AppendOutcome, EntryStore};
use std::io::BufRead;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Line that ends the session, besides end of input.
pub const EXIT_COMMAND: &str = "/exit";

/// Upper bound on waiting for the heartbeat thread at shutdown.
pub const HEARTBEAT_STOP_TIMEOUT: Duration = Duration::from_secs(1);

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub committed: usize,
    pub deferred: usize,
    pub lost: usize,
    /// Rows merged back from the recovery area at shutdown.
    pub recovered_on_close: usize,
    /// `false` when the heartbeat thread had to be detached.
    pub heartbeat_stopped: bool,
}

impl SessionSummary {
    pub fn total(&self) -> usize {
        self.committed + self.deferred + self.lost
    }
}

pub fn run<R: BufRead>(
    store: Arc<EntryStore>,
    input: R,
    heartbeat: Option<Duration>,
) -> AppResult<SessionSummary> {
    let beat = match heartbeat {
        Some(every) => Some(Heartbeat::start(Arc::clone(&store), every)?),
        None => None,
    };

    let mut summary = SessionSummary {
        heartbeat_stopped: true,
        ..SessionSummary::default()
    };

    for line in input.lines() {
        let line = line?;
        let text = line.trim_end_matches(['\r', '\n']);

        if text.trim() == EXIT_COMMAND {
            break;
        }
        if text.is_empty() {
            continue;
        }

        match store.append(&Entry::now(text)) {
            AppendOutcome::Committed => summary.committed += 1,
            AppendOutcome::Deferred(_) => summary.deferred += 1,
            AppendOutcome::Lost(_) => summary.lost += 1,
        }
    }

    if let Some(beat) = beat {
        summary.heartbeat_stopped = beat.stop(HEARTBEAT_STOP_TIMEOUT);
    }

    summary.recovered_on_close = store.recover_pending().recovered;

    info!(
        committed = summary.committed,
        deferred = summary.deferred,
        lost = summary.lost,
        "session closed"
    );
    Ok(summary)
}
