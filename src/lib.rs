//! zlog library root.
//! Exposes the entry store, the CLI parser and the high-level run() function.

pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod logging;
pub mod models;
pub mod store;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::commands;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;
use std::sync::Arc;
use store::EntryStore;
use ui::messages::{ConsoleReporter, warning};

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let cmd = &cli.command;
    match cmd {
        Commands::Init => return commands::init::handle(cli),
        Commands::Config { .. } => return commands::config::handle(cmd, cfg),
        _ => {}
    }

    let store = Arc::new(EntryStore::from_config(cfg, Arc::new(ConsoleReporter)));

    match cmd {
        Commands::Add { .. } => commands::add::handle(cmd, &store),
        Commands::Todo { .. } | Commands::Done { .. } | Commands::Toggle { .. } => {
            commands::checkbox::handle(cmd, &store)
        }
        Commands::List { .. } => commands::list::handle(cmd, cfg, &store),
        Commands::Search { .. } => commands::search::handle(cmd, &store),
        Commands::Edit { .. } => commands::edit::handle(cmd, &store),
        Commands::Del { .. } => commands::del::handle(cmd, &store),
        Commands::Complete { .. } | Commands::Extract { .. } => {
            commands::tasks::handle(cmd, &store)
        }
        Commands::Import { .. } => commands::import::handle(cmd, &store),
        Commands::Export { .. } => commands::export::handle(cmd, cfg, &store),
        Commands::Recover => commands::recover::handle(&store),
        Commands::Clean { .. } => commands::clean::handle(cmd, &store),
        Commands::Backup { .. } => commands::backup::handle(cmd, &store),
        Commands::Session { .. } => commands::session::handle(cmd, cfg, Arc::clone(&store)),
        Commands::Init | Commands::Config { .. } => Ok(()),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    // 1️⃣ parse CLI
    let cli = Cli::parse();

    // 2️⃣ load config once
    let mut cfg = Config::load()?;

    // 3️⃣ a data file given on the command line brings its own recovery dir
    if let Some(file) = &cli.file {
        cfg.data_file = file.clone();
        cfg.recovery_dir = None;
    }

    // 4️⃣ diagnostics go to the daily log file; the guard flushes on drop
    let _log_guard = if cli.test {
        None
    } else {
        match logging::init(&cfg) {
            Ok(guard) => Some(guard),
            Err(e) => {
                warning(format!("Logging disabled: {}", e));
                None
            }
        }
    };

    dispatch(&cli, &cfg)
}
