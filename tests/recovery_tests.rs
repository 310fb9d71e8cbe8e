mod common;
use common::{TS_A, TS_B, TS_C, detached_store, open_store, texts};
use std::fs;
use std::sync::Arc;
use zlog::models::Entry;
use zlog::store::EntryStore;
use zlog::store::recovery::RecoveryArea;
use zlog::store::report::{MemoryReporter, Notice, Severity};

#[test]
fn test_unreachable_data_file_defers_then_recovers() {
    let dir = tempfile::tempdir().unwrap();
    let (store, reporter, data_dir) = detached_store(dir.path());

    let outcome = store.append(&Entry::new(TS_A, "e1"));
    assert!(outcome.is_deferred(), "{outcome:?}");

    let pending = store.recovery().pending();
    assert_eq!(pending.len(), 1);
    let name = pending[0].file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("temp_") && name.ends_with(".csv"), "{name}");
    assert!(matches!(
        reporter.notices().as_slice(),
        [Notice::Deferred { .. }]
    ));

    fs::create_dir(&data_dir).unwrap();
    assert!(store.append(&Entry::new(TS_B, "e2")).is_committed());

    assert_eq!(texts(&store), vec!["e1", "e2"]);
    assert!(store.recovery().pending().is_empty());
    assert!(
        reporter
            .notices()
            .iter()
            .any(|n| matches!(n, Notice::Recovered { rows: 1, files: 1 }))
    );
}

#[test]
fn test_deferred_entries_keep_submission_order() {
    let dir = tempfile::tempdir().unwrap();
    let (store, _, data_dir) = detached_store(dir.path());

    for i in 0..20 {
        let outcome = store.append(&Entry::new(TS_A, format!("item {:02}", i)));
        assert!(outcome.is_deferred());
    }

    let pending = store.recovery().pending();
    assert_eq!(pending.len(), 20);
    let mut names: Vec<_> = pending.iter().map(|p| p.file_name().unwrap().to_owned()).collect();
    names.dedup();
    assert_eq!(names.len(), 20);

    fs::create_dir(&data_dir).unwrap();
    assert!(store.append(&Entry::new(TS_B, "last")).is_committed());

    let mut expected: Vec<String> = (0..20).map(|i| format!("item {:02}", i)).collect();
    expected.push("last".into());
    assert_eq!(texts(&store), expected);
}

#[test]
fn test_blocked_drain_leaves_files_in_place() {
    let dir = tempfile::tempdir().unwrap();
    let (store, _, data_dir) = detached_store(dir.path());

    store.append(&Entry::new(TS_A, "one"));
    store.append(&Entry::new(TS_B, "two"));

    let report = store.recover_pending();
    assert_eq!(report.recovered, 0);
    assert!(report.blocked.is_some());
    assert_eq!(store.recovery().pending().len(), 2);

    fs::create_dir(&data_dir).unwrap();
    let report = store.recover_pending();
    assert_eq!(report.recovered, 2);
    assert_eq!(report.files, 2);
    assert!(report.blocked.is_none());
    assert_eq!(texts(&store), vec!["one", "two"]);
}

#[test]
fn test_recovered_fields_extend_schema() {
    let dir = tempfile::tempdir().unwrap();
    let (store, _, data_dir) = detached_store(dir.path());

    store.append(&Entry::new(TS_A, "task while offline").with_field("task", 1));

    fs::create_dir(&data_dir).unwrap();
    store.append(&Entry::new(TS_B, "plain"));

    let schema = store.schema().unwrap();
    assert_eq!(schema.columns(), ["timestamp", "text", "task"]);
    let records = store.read(None);
    assert!(records[0].entry.is_task());
    assert!(!records[1].entry.is_task());
}

#[test]
fn test_no_recovery_area_is_a_noop() {
    let dir = tempfile::tempdir().unwrap();
    let (store, reporter) = open_store(dir.path());

    assert!(!dir.path().join("temp").exists());
    let report = store.recover_pending();
    assert!(report.is_noop());

    fs::create_dir(dir.path().join("temp")).unwrap();
    let report = store.recover_pending();
    assert!(report.is_noop());
    assert!(reporter.notices().is_empty());
}

#[test]
fn test_unreadable_recovery_files_are_discarded() {
    let dir = tempfile::tempdir().unwrap();
    let (store, reporter) = open_store(dir.path());

    let temp = dir.path().join("temp");
    fs::create_dir(&temp).unwrap();
    fs::write(temp.join("temp_20250101_000000_000_0000.csv"), "").unwrap();
    fs::write(
        temp.join("temp_20250101_000000_000_0001.csv"),
        "garbage without timestamp\nx\n",
    )
    .unwrap();
    fs::write(
        temp.join("temp_20250101_000000_000_0002.csv"),
        format!("timestamp,text\n{},survivor\n", TS_C),
    )
    .unwrap();
    fs::write(temp.join("notes.txt"), "not a recovery file").unwrap();

    let report = store.recover_pending();
    assert_eq!(report.discarded, 2);
    assert_eq!(report.recovered, 1);
    assert_eq!(report.files, 1);

    assert_eq!(texts(&store), vec!["survivor"]);
    assert!(store.recovery().pending().is_empty());
    assert!(temp.join("notes.txt").exists());
    assert!(
        reporter
            .notices()
            .iter()
            .any(|n| matches!(n, Notice::Discarded { files: 2 }))
    );
}

#[test]
fn test_entry_lost_when_recovery_area_unusable() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "a regular file").unwrap();

    let reporter = Arc::new(MemoryReporter::new());
    let store = EntryStore::new(
        dir.path().join("missing").join("zlog.csv"),
        blocker.join("temp"),
        reporter.clone(),
    );

    let outcome = store.append(&Entry::new(TS_A, "nowhere to go"));
    assert!(outcome.is_lost(), "{outcome:?}");

    let notices = reporter.take();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].severity(), Severity::Critical);
    assert!(notices[0].to_string().contains("could not save entry anywhere"));
}

#[test]
fn test_overflow_file_layout() {
    let dir = tempfile::tempdir().unwrap();
    let area = RecoveryArea::new(dir.path().join("nested").join("temp"));

    let entry = Entry::new(TS_A, "a, b").with_field("mood", "ok");
    let path = area.write_overflow(&entry).unwrap();

    assert!(path.starts_with(area.dir()));
    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines, vec!["timestamp,text,mood", "2025-01-01 WED 00:00:00.00,\"a, b\",ok"]);
    assert_eq!(area.pending(), vec![path]);
}

#[test]
fn test_empty_recovery_file_is_dropped_silently() {
    let dir = tempfile::tempdir().unwrap();
    let (store, reporter) = open_store(dir.path());

    let temp = dir.path().join("temp");
    fs::create_dir(&temp).unwrap();
    fs::write(temp.join("temp_20250101_000000_000_0000.csv"), "timestamp,text\n").unwrap();

    let report = store.recover_pending();
    assert_eq!(report.files, 1);
    assert_eq!(report.recovered, 0);
    assert!(store.recovery().pending().is_empty());
    assert!(reporter.notices().is_empty());
}
