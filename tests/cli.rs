//! Integration tests for top-level CLI behavior.

use std::path::Path;
use std::process::{Command, Output};

fn run_agenda_watch(dir: &Path, args: &[&str]) -> Output {
    let bin = env!("CARGO_BIN_EXE_agenda-watch");
    Command::new(bin)
        .args(args)
        .current_dir(dir)
        .env_clear()
        .output()
        .expect("failed to run agenda-watch binary")
}

const DOTENV: &str = "\
CONN_STR=UseDevelopmentStorage=true
QUEUE_NAME=changes
ENDPOINT_URL=http://127.0.0.1:9
AZURE_OPENAI_API_KEY=unused
";

#[test]
fn help_lists_both_modes() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_agenda_watch(dir.path(), &["--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("init"));
    assert!(stdout.contains("compare"));
}

#[test]
fn invalid_subcommand_exits_with_error() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_agenda_watch(dir.path(), &["nonsense"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("unrecognized subcommand"));
}

#[test]
fn missing_configuration_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_agenda_watch(dir.path(), &["compare"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("missing required configuration value CONN_STR"));
}

#[test]
fn dotenv_configuration_is_loaded() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(".env"), DOTENV).unwrap();

    let output = run_agenda_watch(dir.path(), &["init"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("failed to read agenda data/agenda.html"), "stderr: {stderr}");
}

#[test]
fn init_with_empty_agenda_creates_snapshot_directories() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(".env"), DOTENV).unwrap();
    std::fs::write(dir.path().join("agenda.html"), "<html><body></body></html>").unwrap();

    let output = run_agenda_watch(
        dir.path(),
        &["init", "--agenda", "agenda.html", "--original-dir", "snap/original", "--temp-dir", "snap/temp"],
    );

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(dir.path().join("snap/original").is_dir());
    assert!(dir.path().join("snap/temp").is_dir());
}

#[test]
fn malformed_dotenv_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(".env"), "CONN_STR=UseDevelopmentStorage=true\nnot a valid line\n").unwrap();

    let output = run_agenda_watch(dir.path(), &["init"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("failed to load .env"), "stderr: {stderr}");
    assert!(!stderr.contains("missing required configuration value"));
}
