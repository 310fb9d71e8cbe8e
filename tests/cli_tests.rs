mod common;
use common::{setup_journal, zlog};
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;

#[test]
fn test_add_and_list() {
    let (dir, data) = setup_journal();

    zlog(dir.path())
        .args(["--file", &data, "--test", "add", "hello", "world"])
        .assert()
        .success()
        .stdout(contains("Entry added"));

    zlog(dir.path())
        .args(["--file", &data, "--test", "list", "--all"])
        .assert()
        .success()
        .stdout(contains("0 | ").and(contains("hello world")));

    let content = fs::read_to_string(&data).unwrap();
    assert!(content.starts_with("timestamp,text\n"));
}

#[test]
fn test_add_without_text_records_timestamp() {
    let (dir, data) = setup_journal();

    zlog(dir.path())
        .args(["--file", &data, "--test", "add"])
        .assert()
        .success()
        .stdout(contains("Timestamp recorded"));

    zlog(dir.path())
        .args(["--file", &data, "--test", "clean", "--dry-run"])
        .assert()
        .success()
        .stdout(contains("Empty rows: 1"));
}

#[test]
fn test_tasks_and_fields() {
    let (dir, data) = setup_journal();

    zlog(dir.path())
        .args(["--file", &data, "--test", "add", "plain note"])
        .assert()
        .success();
    zlog(dir.path())
        .args(["--file", &data, "--test", "add", "--task", "-f", "mood=calm", "walk the dog"])
        .assert()
        .success();

    zlog(dir.path())
        .args(["--file", &data, "--test", "list", "--tasks"])
        .assert()
        .success()
        .stdout(contains("walk the dog").and(contains("mood=calm")))
        .stdout(contains("plain note").not());

    let header = fs::read_to_string(&data).unwrap();
    assert!(header.starts_with("timestamp,text,mood,task\n"));
}

#[test]
fn test_reserved_and_malformed_fields_fail() {
    let (dir, data) = setup_journal();

    zlog(dir.path())
        .args(["--file", &data, "--test", "add", "-f", "text=x", "hi"])
        .assert()
        .failure()
        .stderr(contains("Reserved column name"));

    zlog(dir.path())
        .args(["--file", &data, "--test", "add", "-f", "novalue", "hi"])
        .assert()
        .failure()
        .stderr(contains("expected key=value"));
}

#[test]
fn test_search_edit_delete() {
    let (dir, data) = setup_journal();

    for text in ["Morning coffee", "standup meeting", "evening COFFEE"] {
        zlog(dir.path())
            .args(["--file", &data, "--test", "add", text])
            .assert()
            .success();
    }

    zlog(dir.path())
        .args(["--file", &data, "--test", "search", "coffee"])
        .assert()
        .success()
        .stdout(contains("Morning coffee").and(contains("evening COFFEE")))
        .stdout(contains("2 matching entries"));

    zlog(dir.path())
        .args(["--file", &data, "--test", "edit", "1", "standup, moved to 10:00"])
        .assert()
        .success()
        .stdout(contains("Entry #1 updated"));

    zlog(dir.path())
        .args(["--file", &data, "--test", "del", "0", "--yes"])
        .assert()
        .success()
        .stdout(contains("Entry #0 has been deleted"));

    zlog(dir.path())
        .args(["--file", &data, "--test", "list", "--all"])
        .assert()
        .success()
        .stdout(contains("standup, moved to 10:00"))
        .stdout(contains("Morning coffee").not());

    zlog(dir.path())
        .args(["--file", &data, "--test", "del", "9", "--yes"])
        .assert()
        .failure()
        .stderr(contains("No entry at position 9"));
}

#[test]
fn test_del_cancelled_without_confirmation() {
    let (dir, data) = setup_journal();

    zlog(dir.path())
        .args(["--file", &data, "--test", "add", "keep me"])
        .assert()
        .success();

    zlog(dir.path())
        .args(["--file", &data, "--test", "del", "0"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(contains("Operation cancelled"));

    assert!(fs::read_to_string(&data).unwrap().contains("keep me"));
}

#[test]
fn test_list_json() {
    let (dir, data) = setup_journal();

    zlog(dir.path())
        .args(["--file", &data, "--test", "add", "-f", "tag=home", "json entry"])
        .assert()
        .success();

    zlog(dir.path())
        .args(["--file", &data, "--test", "list", "--json"])
        .assert()
        .success()
        .stdout(contains("\"text\": \"json entry\""))
        .stdout(contains("\"tag\": \"home\""))
        .stdout(contains("\"position\": 0"));
}

#[test]
fn test_todo_done_toggle() {
    let (dir, data) = setup_journal();

    zlog(dir.path())
        .args(["--file", &data, "--test", "todo", "buy", "milk"])
        .assert()
        .success()
        .stdout(contains("Added todo item: buy milk"));
    zlog(dir.path())
        .args(["--file", &data, "--test", "done", "pay rent"])
        .assert()
        .success();

    zlog(dir.path())
        .args(["--file", &data, "--test", "toggle", "milk"])
        .assert()
        .success()
        .stdout(contains("Checked #0: buy milk"));

    zlog(dir.path())
        .args(["--file", &data, "--test", "list", "--checkboxes"])
        .assert()
        .success()
        .stdout(contains("2 total, 2 checked, 0 open (100%)"));

    zlog(dir.path())
        .args(["--file", &data, "--test", "toggle", "groceries"])
        .assert()
        .failure()
        .stderr(contains("no checkbox matching 'groceries'"));
}

#[test]
fn test_session_reads_stdin() {
    let (dir, data) = setup_journal();

    zlog(dir.path())
        .args(["--file", &data, "--test", "session", "--no-heartbeat"])
        .write_stdin("first line\n\nsecond line\n/exit\nignored\n")
        .assert()
        .success()
        .stdout(contains("Session closed: 2 saved"));

    let content = fs::read_to_string(&data).unwrap();
    assert!(content.contains("first line"));
    assert!(content.contains("second line"));
    assert!(!content.contains("ignored"));
}

#[test]
fn test_unreachable_data_file_defers_and_recover_merges() {
    let (dir, data) = setup_journal();
    // a directory where the data file should be
    fs::create_dir(&data).unwrap();

    zlog(dir.path())
        .args(["--file", &data, "--test", "add", "saved for later"])
        .assert()
        .success()
        .stdout(contains("kept in temporary storage"));

    assert_eq!(fs::read_dir(dir.path().join("temp")).unwrap().count(), 1);

    fs::remove_dir(&data).unwrap();

    zlog(dir.path())
        .args(["--file", &data, "--test", "recover"])
        .assert()
        .success()
        .stdout(contains("Recovered 1 entries"));

    assert!(fs::read_to_string(&data).unwrap().contains("saved for later"));

    zlog(dir.path())
        .args(["--file", &data, "--test", "recover"])
        .assert()
        .success()
        .stdout(contains("Nothing to recover"));
}

#[test]
fn test_entry_lost_exits_with_error() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "regular file").unwrap();
    let data = blocker.join("journal.csv").to_string_lossy().to_string();

    zlog(dir.path())
        .args(["--file", &data, "--test", "add", "doomed"])
        .assert()
        .failure()
        .stderr(contains("could not save entry anywhere").count(1))
        .stderr(contains("Error:").not());
}

#[test]
fn test_clean_and_backup() {
    let (dir, data) = setup_journal();

    zlog(dir.path())
        .args(["--file", &data, "--test", "add", "real"])
        .assert()
        .success();
    zlog(dir.path())
        .args(["--file", &data, "--test", "add"])
        .assert()
        .success();

    zlog(dir.path())
        .args(["--file", &data, "--test", "clean", "--backup"])
        .assert()
        .success()
        .stdout(contains("Removed 1 empty rows, 1 rows left"));
    assert!(dir.path().join("journal.csv.backup").exists());

    let dest = dir.path().join("copy.csv").to_string_lossy().to_string();
    zlog(dir.path())
        .args(["--file", &data, "--test", "backup", "--dest", &dest])
        .assert()
        .success()
        .stdout(contains("Backup created"));
    zlog(dir.path())
        .args(["--file", &data, "--test", "backup", "--dest", &dest])
        .assert()
        .failure()
        .stderr(contains("already exists"));
}

#[test]
fn test_init_creates_data_file() {
    let (dir, data) = setup_journal();

    zlog(dir.path())
        .args(["--file", &data, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Data file ready"));

    assert_eq!(fs::read_to_string(&data).unwrap(), "timestamp,text\n");
    assert!(!dir.path().join(".zlog").join("zlog.conf").exists());
}

#[test]
fn test_config_print_uses_defaults() {
    let (dir, data) = setup_journal();

    zlog(dir.path())
        .args(["--file", &data, "--test", "config", "--print"])
        .assert()
        .success()
        .stdout(contains("data_file:").and(contains("journal.csv")))
        .stdout(contains("heartbeat_interval: 5"));
}

#[test]
fn test_complete_hides_task_from_pending_list() {
    let (dir, data) = setup_journal();

    zlog(dir.path())
        .args(["--file", &data, "--test", "add", "--task", "water plants"])
        .assert()
        .success();
    zlog(dir.path())
        .args(["--file", &data, "--test", "add", "--task", "call plumber"])
        .assert()
        .success();

    zlog(dir.path())
        .args(["--file", &data, "--test", "complete", "0"])
        .assert()
        .success()
        .stdout(contains("Task #0 completed: water plants"));

    zlog(dir.path())
        .args(["--file", &data, "--test", "list", "--tasks"])
        .assert()
        .success()
        .stdout(contains("call plumber"))
        .stdout(contains("water plants").not());

    zlog(dir.path())
        .args(["--file", &data, "--test", "list", "--completed"])
        .assert()
        .success()
        .stdout(contains("water plants"))
        .stdout(contains("call plumber").not());

    let out = dir.path().join("done.csv").to_string_lossy().to_string();
    zlog(dir.path())
        .args(["--file", &data, "--test", "extract", "--dest", &out, "--completed"])
        .assert()
        .success()
        .stdout(contains("Extracted 1 completed tasks"));
    assert!(fs::read_to_string(&out).unwrap().contains("water plants"));

    zlog(dir.path())
        .args(["--file", &data, "--test", "complete", "5"])
        .assert()
        .failure()
        .stderr(contains("No entry at position 5"));
}

#[test]
fn test_import_and_export() {
    let (dir, data) = setup_journal();

    let source = dir.path().join("old.txt");
    fs::write(
        &source,
        "2025-02-22 SAT 18:22:30.00 ~ later\n\
         broken line\n\
         2025-02-22 SAT 18:22:00.00 ~ earlier\n",
    )
    .unwrap();

    zlog(dir.path())
        .args(["--file", &data, "--test", "import", &source.to_string_lossy(), "--sort"])
        .assert()
        .success()
        .stdout(contains("Imported 2 entries (1 skipped)"));

    let out = dir.path().join("journal.txt").to_string_lossy().to_string();
    zlog(dir.path())
        .args(["--file", &data, "--test", "export", "--dest", &out, "--gap", "10"])
        .assert()
        .success()
        .stdout(contains("Journal exported"));

    assert_eq!(fs::read_to_string(&out).unwrap(), "earlier\n\n\nlater");
}
