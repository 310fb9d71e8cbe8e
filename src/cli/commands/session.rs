use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::session::{self, EXIT_COMMAND};
use crate::errors::{AppError, AppResult};
use crate::store::EntryStore;
use crate::ui::messages::{info, success, warning};
use std::io;
use std::sync::Arc;
use std::time::Duration;

pub fn handle(cmd: &Commands, cfg: &Config, store: Arc<EntryStore>) -> AppResult<()> {
    if let Commands::Session {
        heartbeat,
        no_heartbeat,
    } = cmd
    {
        let every = match heartbeat {
            Some(0) => None,
            Some(secs) => Some(Duration::from_secs(*secs)),
            None if cfg.heartbeat_enabled && !*no_heartbeat => Some(cfg.heartbeat_every()),
            None => None,
        };

        info(format!(
            "Writing to {}: one entry per line, {} or EOF to finish.",
            store.path().display(),
            EXIT_COMMAND
        ));

        let summary = session::run(store, io::stdin().lock(), every)?;

        if !summary.heartbeat_stopped {
            warning("Heartbeat thread did not stop in time.");
        }
        success(format!(
            "Session closed: {} saved, {} in temporary storage, {} lost.",
            summary.committed, summary.deferred, summary.lost
        ));
        if summary.lost > 0 {
            return Err(AppError::EntryLost(format!(
                "{} entries could not be saved",
                summary.lost
            )));
        }
    }

    Ok(())
}
