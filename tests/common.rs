#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;
use zlog::store::EntryStore;
use zlog::store::report::MemoryReporter;

pub const TS_A: &str = "2025-01-01 WED 00:00:00.00";
pub const TS_B: &str = "2025-01-01 WED 00:00:01.00";
pub const TS_C: &str = "2025-01-01 WED 00:00:02.00";

/// CLI command isolated from the real home directory.
pub fn zlog(home: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("zlog");
    cmd.env("HOME", home).env_remove("RUST_LOG");
    cmd
}

/// Fresh temp dir with the data file path inside it.
pub fn setup_journal() -> (TempDir, String) {
    let dir = tempfile::tempdir().expect("tempdir");
    let data = dir.path().join("journal.csv");
    (dir, data.to_string_lossy().to_string())
}

/// Store with `zlog.csv` and `temp/` inside `dir`, data file created.
pub fn open_store(dir: &Path) -> (Arc<EntryStore>, Arc<MemoryReporter>) {
    let reporter = Arc::new(MemoryReporter::new());
    let store = EntryStore::open(dir.join("zlog.csv"), dir.join("temp"), reporter.clone());
    (Arc::new(store), reporter)
}

/// Store whose data file lives in `dir/data/` (not created) and recovery area in `dir/temp/`.
pub fn detached_store(dir: &Path) -> (Arc<EntryStore>, Arc<MemoryReporter>, PathBuf) {
    let reporter = Arc::new(MemoryReporter::new());
    let data_dir = dir.join("data");
    let store = EntryStore::new(data_dir.join("zlog.csv"), dir.join("temp"), reporter.clone());
    (Arc::new(store), reporter, data_dir)
}

pub fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .expect("read data file")
        .lines()
        .map(str::to_string)
        .collect()
}

pub fn texts(store: &EntryStore) -> Vec<String> {
    store
        .read(None)
        .into_iter()
        .map(|r| r.entry.text)
        .collect()
}
