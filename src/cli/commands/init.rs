use crate::cli::parser::Cli;
use crate::config::Config;
use crate::errors::AppResult;
use crate::store::EntryStore;
use crate::store::report::SilentReporter;
use crate::ui::messages::{error, success};
use std::sync::Arc;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory and file (skipped in test mode)
///  - the data file with its base header
pub fn handle(cli: &Cli) -> AppResult<()> {
    let cfg = Config::init_all(cli.file.clone(), cli.test)?;

    println!("⚙️  Initializing zlog…");
    println!("📄 Data file     : {}", cfg.data_path().display());
    println!("🗂️  Recovery dir : {}", cfg.recovery_path().display());

    let store = EntryStore::new(
        cfg.data_path(),
        cfg.recovery_path(),
        Arc::new(SilentReporter),
    );
    if store.ensure_initialized() {
        success(format!("Data file ready at {}", cfg.data_path().display()));
    } else {
        error("Could not create the data file; entries will go to temporary storage.");
    }

    Ok(())
}
