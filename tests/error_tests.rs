//! Error scenario integration tests

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

const UNREACHABLE_URL: &str = "http://127.0.0.1:1";

fn vidnote_bin(config_home: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_vidnote"));
    cmd.env("XDG_CONFIG_HOME", config_home)
        .env_remove("VIDNOTE_CONFIG")
        .env_remove("OBSIDIAN_API_URL")
        .env_remove("OBSIDIAN_API_KEY")
        .env_remove("OBSIDIAN_VAULT")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn save_reports_unreachable_service() {
    let dir = tempfile::tempdir().unwrap();
    vidnote_bin(dir.path())
        .args(["save", "-t", "Talk", "-m", "hello", "--vault", "Main"])
        .args(["--api-url", UNREACHABLE_URL])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "Check that Obsidian is running and the Local REST API plugin is enabled",
        ));
}

#[test]
fn note_put_reports_unreachable_service() {
    let dir = tempfile::tempdir().unwrap();
    vidnote_bin(dir.path())
        .args(["note", "put", "Talk", "-m", "hello", "--vault", "Main"])
        .args(["--api-url", UNREACHABLE_URL])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "Could not reach Obsidian. Check that Obsidian is running and the Local REST API plugin is enabled.",
        ));
}

#[test]
fn save_rejects_dot_segments_in_title() {
    let dir = tempfile::tempdir().unwrap();
    vidnote_bin(dir.path())
        .args(["save", "-t", "Talks/../Other", "-m", "hello", "--on-conflict", "overwrite"])
        .args(["--vault", "Main", "--api-url", UNREACHABLE_URL])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("segments"));
}

#[test]
fn save_without_vault_is_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    vidnote_bin(dir.path())
        .args(["save", "-t", "Talk", "-m", "hello"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("vault_name"));
}

#[test]
fn save_without_title_is_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    vidnote_bin(dir.path())
        .args(["save", "-m", "hello", "--vault", "Main", "--api-url", UNREACHABLE_URL])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("title"));
}

#[test]
fn save_with_empty_body_is_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    vidnote_bin(dir.path())
        .args(["save", "-t", "Talk", "--vault", "Main", "--api-url", UNREACHABLE_URL])
        .write_stdin("   \n")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("body"));
}

#[test]
fn strict_exists_fails_when_unreachable() {
    let dir = tempfile::tempdir().unwrap();
    vidnote_bin(dir.path())
        .args(["note", "exists", "Talk", "--vault", "Main", "--api-url", UNREACHABLE_URL])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Could not reach Obsidian"));
}

#[test]
fn invalid_timestamp_error() {
    let dir = tempfile::tempdir().unwrap();
    vidnote_bin(dir.path())
        .args(["render", "-u", "abc123", "-T", "soon", "-m", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid timestamp"));
}

#[test]
fn invalid_video_error() {
    let dir = tempfile::tempdir().unwrap();
    vidnote_bin(dir.path())
        .args(["render", "-u", "https://example.com/watch?v=abc", "-m", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid video"));
}

#[test]
fn render_without_video_is_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    vidnote_bin(dir.path())
        .args(["render", "-m", "x"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Nothing to render"));
}

#[test]
fn malformed_message_reports_line() {
    let dir = tempfile::tempdir().unwrap();
    let messages = dir.path().join("messages.jsonl");
    std::fs::write(&messages, "{\"type\":\"VIDEO_PAUSED\",\"data\":{}}\n").unwrap();

    vidnote_bin(dir.path())
        .args(["render", "-m", "x", "--messages"])
        .arg(&messages)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("line 1"));
}

#[test]
fn config_get_unknown_key() {
    let dir = tempfile::tempdir().unwrap();
    vidnote_bin(dir.path())
        .args(["config", "get", "unknown_key"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Valid keys"));
}

#[test]
fn config_set_unknown_key() {
    let dir = tempfile::tempdir().unwrap();
    vidnote_bin(dir.path())
        .args(["config", "set", "unknown_key", "value"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Valid keys"));
}

#[test]
fn config_set_invalid_conflict_policy() {
    let dir = tempfile::tempdir().unwrap();
    vidnote_bin(dir.path())
        .args(["config", "set", "on_conflict", "merge"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("on_conflict"));
}

#[test]
fn config_set_invalid_api_url() {
    let dir = tempfile::tempdir().unwrap();
    vidnote_bin(dir.path())
        .args(["config", "set", "api_url", "localhost:27123"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("api_url"));
}

#[test]
fn config_set_invalid_bool() {
    let dir = tempfile::tempdir().unwrap();
    vidnote_bin(dir.path())
        .args(["config", "set", "notify", "maybe"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("true"));
}

#[test]
fn unreadable_config_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("broken.toml");
    std::fs::write(&config, "this is = = not toml").unwrap();

    vidnote_bin(dir.path())
        .args(["save", "-t", "Talk", "-m", "hello", "--config"])
        .arg(&config)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("vault_name"));
}
