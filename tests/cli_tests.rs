//! CLI integration tests

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Binary with an isolated config location and no connection env vars
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
fn help_output() {
    let dir = tempfile::tempdir().unwrap();
    vidnote_bin(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Obsidian"))
        .stdout(predicate::str::contains("save"))
        .stdout(predicate::str::contains("render"))
        .stdout(predicate::str::contains("note"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn save_help_lists_options() {
    let dir = tempfile::tempdir().unwrap();
    vidnote_bin(dir.path())
        .args(["save", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--video"))
        .stdout(predicate::str::contains("--timestamp"))
        .stdout(predicate::str::contains("--on-conflict"))
        .stdout(predicate::str::contains("--messages"))
        .stdout(predicate::str::contains("--notify"));
}

#[test]
fn version_output() {
    let dir = tempfile::tempdir().unwrap();
    vidnote_bin(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("vidnote"))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn config_path_command() {
    let dir = tempfile::tempdir().unwrap();
    vidnote_bin(dir.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("vidnote"))
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn config_path_honors_override() {
    let dir = tempfile::tempdir().unwrap();
    let custom = dir.path().join("custom.toml");
    vidnote_bin(dir.path())
        .args(["config", "path", "--config"])
        .arg(&custom)
        .assert()
        .success()
        .stdout(predicate::str::contains("custom.toml"));
}

#[test]
fn config_set_then_get() {
    let dir = tempfile::tempdir().unwrap();

    vidnote_bin(dir.path())
        .args(["config", "set", "vault_name", "Main"])
        .assert()
        .success();

    vidnote_bin(dir.path())
        .args(["config", "get", "vault_name"])
        .assert()
        .success()
        .stdout(predicate::str::diff("Main\n"));

    vidnote_bin(dir.path())
        .args(["config", "get", "folder"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(not set)"));
}

#[test]
fn config_list_masks_api_key() {
    let dir = tempfile::tempdir().unwrap();

    vidnote_bin(dir.path())
        .args(["config", "set", "api_key", "0123456789abcdef"])
        .assert()
        .success();

    vidnote_bin(dir.path())
        .args(["config", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0123...cdef"))
        .stdout(predicate::str::contains("0123456789abcdef").not());
}

#[test]
fn config_init_twice_fails() {
    let dir = tempfile::tempdir().unwrap();

    vidnote_bin(dir.path()).args(["config", "init"]).assert().success();
    vidnote_bin(dir.path())
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn render_from_flags() {
    let dir = tempfile::tempdir().unwrap();
    vidnote_bin(dir.path())
        .args([
            "render",
            "-u",
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "--video-title",
            "Rust Talk",
            "-T",
            "150",
            "-m",
            "Great point",
        ])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("# Rust Talk\n"))
        .stdout(predicate::str::contains("## Timestamp: 00:02:30"))
        .stdout(predicate::str::contains(
            "[YouTube link](https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=00:02:30)",
        ))
        .stdout(predicate::str::contains("## Note\nGreat point"));
}

#[test]
fn render_from_relay_messages() {
    let dir = tempfile::tempdir().unwrap();
    let messages = dir.path().join("messages.jsonl");
    std::fs::write(
        &messages,
        concat!(
            r#"{"type":"VIDEO_INFO_UPDATED","data":{"title":"Talk","videoId":"abc123","timestamp":"00:00:00"}}"#,
            "\n",
            r#"{"type":"VIDEO_TIMESTAMP_UPDATED","data":{"timestamp":"00:01:05"}}"#,
            "\n",
        ),
    )
    .unwrap();

    vidnote_bin(dir.path())
        .args(["render", "-m", "note text", "--messages"])
        .arg(&messages)
        .assert()
        .success()
        .stdout(predicate::str::contains("# Talk"))
        .stdout(predicate::str::contains("watch?v=abc123&t=00:01:05"));
}

#[test]
fn render_ignores_messages_for_other_targets() {
    let dir = tempfile::tempdir().unwrap();
    let messages = dir.path().join("messages.jsonl");
    std::fs::write(
        &messages,
        concat!(
            r#"{"type":"VIDEO_INFO_UPDATED","data":{"title":"Talk","videoId":"abc123","timestamp":"00:00:00"},"target":"side-panel"}"#,
            "\n",
            r#"{"type":"VIDEO_INFO_UPDATED","data":{"title":"Popup video","videoId":"zzz999","timestamp":"00:07:00"},"target":"popup"}"#,
            "\n",
            r#"{"type":"VIDEO_TIMESTAMP_UPDATED","data":{"timestamp":"00:00:42"}}"#,
            "\n",
        ),
    )
    .unwrap();

    vidnote_bin(dir.path())
        .args(["render", "-m", "x", "--target", "side-panel", "--messages"])
        .arg(&messages)
        .assert()
        .success()
        .stdout(predicate::str::contains("# Talk"))
        .stdout(predicate::str::contains("watch?v=abc123&t=00:00:42"))
        .stdout(predicate::str::contains("zzz999").not());
}

#[test]
fn render_keeps_observed_position_for_same_video() {
    let dir = tempfile::tempdir().unwrap();
    let messages = dir.path().join("messages.jsonl");
    std::fs::write(
        &messages,
        concat!(
            r#"{"type":"VIDEO_INFO_UPDATED","data":{"title":"Talk","videoId":"abc123","timestamp":"00:00:00"}}"#,
            "\n",
            r#"{"type":"VIDEO_TIMESTAMP_UPDATED","data":{"timestamp":"00:03:15"}}"#,
            "\n",
        ),
    )
    .unwrap();

    vidnote_bin(dir.path())
        .args(["render", "-m", "x", "-u", "https://youtu.be/abc123", "--messages"])
        .arg(&messages)
        .assert()
        .success()
        .stdout(predicate::str::contains("# Talk"))
        .stdout(predicate::str::contains("&t=00:03:15"));
}

#[test]
fn render_reads_body_from_stdin() {
    let dir = tempfile::tempdir().unwrap();
    vidnote_bin(dir.path())
        .args(["render", "-u", "abc123", "--video-title", "Talk"])
        .write_stdin("from stdin")
        .assert()
        .success()
        .stdout(predicate::str::contains("## Note\nfrom stdin"))
        .stdout(predicate::str::contains("&t=00:00:00"));
}

#[tokio::test(flavor = "multi_thread")]
async fn save_creates_note_on_service() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/vault/Notes/Talk.md"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/vault/Notes/Talk.md"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let uri = server.uri();
    let dir = tempfile::tempdir().unwrap();
    let config_home = dir.path().to_path_buf();

    let output = tokio::task::spawn_blocking(move || {
        vidnote_bin(&config_home)
            .args(["save", "-u", "abc123", "--video-title", "Talk", "-m", "hello"])
            .args(["--vault", "Main", "--folder", "Notes", "--api-url", uri.as_str()])
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(output.status.success(), "save failed: {}", stderr);
    assert!(stderr.contains("Note saved"), "unexpected stderr: {}", stderr);
}

#[tokio::test(flavor = "multi_thread")]
async fn save_appends_with_configured_policy() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/vault/Talk.md"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "content": "old",
            "frontmatter": {},
            "path": "Talk.md",
            "stat": {"ctime": 0, "mtime": 0, "size": 3},
            "tags": []
        })))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/vault/Talk.md"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let uri = server.uri();
    let dir = tempfile::tempdir().unwrap();
    let config_home = dir.path().to_path_buf();

    let output = tokio::task::spawn_blocking(move || {
        vidnote_bin(&config_home)
            .args(["save", "-t", "Talk", "-m", "new", "--raw", "--on-conflict", "append"])
            .args(["--vault", "Main", "--api-url", uri.as_str()])
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(output.status.success(), "save failed: {}", stderr);
    assert!(stderr.contains("appended"), "unexpected stderr: {}", stderr);

    let requests = server.received_requests().await.unwrap();
    let put = requests
        .iter()
        .find(|r| r.method.as_str() == "PUT")
        .unwrap();
    assert_eq!(String::from_utf8_lossy(&put.body), "old\n\nnew");
}

#[tokio::test(flavor = "multi_thread")]
async fn note_exists_prints_result() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/vault/Talk.md"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("HEAD"))
        .and(path("/vault/Other.md"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let uri = server.uri();
    let dir = tempfile::tempdir().unwrap();
    let config_home = dir.path().to_path_buf();

    let (found, missing) = tokio::task::spawn_blocking(move || {
        let run = |title: &str| {
            vidnote_bin(&config_home)
                .args(["note", "exists", title, "--vault", "Main", "--api-url", uri.as_str()])
                .output()
                .unwrap()
        };
        (run("Talk"), run("Other"))
    })
    .await
    .unwrap();

    assert!(found.status.success());
    assert_eq!(String::from_utf8_lossy(&found.stdout), "true\n");
    assert!(missing.status.success());
    assert_eq!(String::from_utf8_lossy(&missing.stdout), "false\n");
}

#[test]
fn environment_supplies_connection_settings() {
    let dir = tempfile::tempdir().unwrap();
    vidnote_bin(dir.path())
        .env("OBSIDIAN_API_URL", "http://127.0.0.1:1")
        .env("OBSIDIAN_VAULT", "Main")
        .args(["note", "exists", "Talk", "--lenient"])
        .assert()
        .success()
        .stdout(predicate::str::diff("false\n"));
}
