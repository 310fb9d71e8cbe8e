//! Unified application error type.
//! The store converts these into explicit outcomes at its public boundary;
//! the CLI layer propagates them up to `main`.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ---------------------------
    // Store errors
    // ---------------------------
    #[error("Data file has no header row: {0}")]
    MissingHeader(String),

    #[error("No entry at position {0}")]
    InvalidPosition(usize),

    #[error("Entry not found: {0}")]
    EntryNotFound(String),

    #[error("Entry #{0} is not a checkbox item")]
    NotACheckbox(usize),

    #[error("Entry #{0} is not a task")]
    NotATask(usize),

    #[error("Could not update the data file: {0}")]
    WriteFailed(String),

    #[error("Could not save entry anywhere: {0}")]
    EntryLost(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid field '{0}', expected key=value")]
    InvalidField(String),

    #[error("Reserved column name: {0}")]
    ReservedColumn(String),

    #[error("No valid entries in {0}")]
    NothingToImport(String),

    // ---------------------------
    // Heartbeat errors
    // ---------------------------
    #[error("Heartbeat error: {0}")]
    Heartbeat(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration: {0}")]
    ConfigLoad(#[from] serde_yaml::Error),

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
