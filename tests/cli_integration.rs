//! CLI integration tests.
//!
//! These tests invoke the vidx binary and verify command output and behaviour.

#![allow(deprecated)] // cargo_bin is deprecated but still works

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to get a Command for the vidx binary, run inside `dir`.
fn vidx(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("vidx").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("VIDX_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

/// Helper to create a temp directory with .vidx/config.json.
fn setup_project(config: &str) -> TempDir {
    let temp = TempDir::new().unwrap();
    let vidx_dir = temp.path().join(".vidx");
    fs::create_dir_all(&vidx_dir).unwrap();
    fs::write(vidx_dir.join("config.json"), config).unwrap();
    temp
}

fn quick_feedback(dir: &TempDir) -> Command {
    let mut cmd = vidx(dir);
    cmd.args(["feedback", "--latency-ms", "0", "--dwell-ms", "0"]);
    cmd
}

// ============================================================================
// Basic CLI tests
// ============================================================================

#[test]
fn test_no_args_shows_help_message() {
    let temp = TempDir::new().unwrap();
    vidx(&temp)
        .assert()
        .success()
        .stdout(predicate::str::contains("vidx"))
        .stdout(predicate::str::contains("Quick start"));
}

#[test]
fn test_help_lists_commands() {
    let temp = TempDir::new().unwrap();
    vidx(&temp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("feedback"))
        .stdout(predicate::str::contains("media"))
        .stdout(predicate::str::contains("categories"));
}

#[test]
fn test_completions_bash() {
    let temp = TempDir::new().unwrap();
    vidx(&temp)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("vidx"));
}

// ============================================================================
// Categories
// ============================================================================

#[test]
fn test_categories_lists_all_six() {
    let temp = TempDir::new().unwrap();
    vidx(&temp)
        .arg("categories")
        .assert()
        .success()
        .stdout(predicate::str::contains("Bug Report"))
        .stdout(predicate::str::contains("Feature Request"))
        .stdout(predicate::str::contains("UI/UX Feedback"))
        .stdout(predicate::str::contains("Performance"))
        .stdout(predicate::str::contains("Content Quality"))
        .stdout(predicate::str::contains("General Feedback"));
}

#[test]
fn test_categories_json() {
    let temp = TempDir::new().unwrap();
    let output = vidx(&temp).args(["categories", "--json"]).output().unwrap();
    assert!(output.status.success());

    let list: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 6);
    assert_eq!(list[2]["value"], "ui");
    assert_eq!(list[2]["label"], "UI/UX Feedback");
}

// ============================================================================
// Media URLs
// ============================================================================

#[test]
fn test_media_image_rewrites_storage_prefix() {
    let temp = TempDir::new().unwrap();
    vidx(&temp)
        .args([
            "media",
            "image",
            "/home/azureuser/recallstore/recall-api/../recallhq/thumbs/a.png",
        ])
        .assert()
        .success()
        .stdout("https://videoindex.app/learnpod_static/thumbs/a.png\n");
}

#[test]
fn test_media_video_rewrites_temp_marker() {
    let temp = TempDir::new().unwrap();
    vidx(&temp)
        .args(["media", "video", "/data/recallhq/temp/clip.mp4"])
        .assert()
        .success()
        .stdout("https://videoindex.app/learnpod_static/clip.mp4\n");
}

#[test]
fn test_media_video_without_path_is_origin() {
    let temp = TempDir::new().unwrap();
    vidx(&temp)
        .args(["media", "video"])
        .assert()
        .success()
        .stdout("https://videoindex.app\n");
}

#[test]
fn test_media_uses_configured_origin() {
    let temp = setup_project(r#"{ "media": { "base_url": "http://localhost:3000" } }"#);
    vidx(&temp)
        .args(["media", "video", "/x/recallhq/temp/a.mp4"])
        .assert()
        .success()
        .stdout("http://localhost:3000/learnpod_static/a.mp4\n");
}

// ============================================================================
// Feedback
// ============================================================================

#[test]
fn test_feedback_valid_prints_json() {
    let temp = TempDir::new().unwrap();
    let output = quick_feedback(&temp)
        .args([
            "--name", "Ana", "--email", "a@b.co", "--rating", "4", "--category", "bug",
            "--text", "Found a crash",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let sent: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(sent["name"], "Ana");
    assert_eq!(sent["email"], "a@b.co");
    assert_eq!(sent["rating"], 4);
    assert_eq!(sent["category"], "bug");
    assert_eq!(sent["feedback"], "Found a crash");
    assert!(sent["submitted_at"].is_string());
}

#[test]
fn test_feedback_empty_lists_every_error() {
    let temp = TempDir::new().unwrap();
    quick_feedback(&temp)
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Name is required"))
        .stderr(predicate::str::contains("Email is required"))
        .stderr(predicate::str::contains("Rating is required"))
        .stderr(predicate::str::contains("Category is required"))
        .stderr(predicate::str::contains("Feedback is required"));
}

#[test]
fn test_feedback_invalid_email() {
    let temp = TempDir::new().unwrap();
    quick_feedback(&temp)
        .args([
            "--name", "Ana", "--email", "ana", "-r", "5", "-c", "general", "-t", "Nice",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Email is invalid"))
        .stderr(predicate::str::contains("1 field(s)"));
}

#[test]
fn test_feedback_too_long() {
    let temp = TempDir::new().unwrap();
    let text = "x".repeat(501);
    quick_feedback(&temp)
        .args([
            "--name", "Ana", "--email", "a@b.co", "-r", "3", "-c", "ui", "-t", text.as_str(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Feedback must be 500 characters or less",
        ));
}

#[test]
fn test_feedback_unknown_category() {
    let temp = TempDir::new().unwrap();
    quick_feedback(&temp)
        .args(["-c", "praise"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown feedback category: praise"));
}

#[test]
fn test_feedback_transport_failure() {
    let temp = TempDir::new().unwrap();
    quick_feedback(&temp)
        .args([
            "--name", "Ana", "--email", "a@b.co", "-r", "4", "-c", "bug", "-t", "Crash",
            "--fail-with", "offline",
        ])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("offline"));
}

// ============================================================================
// Config
// ============================================================================

#[test]
fn test_config_get_default() {
    let temp = TempDir::new().unwrap();
    vidx(&temp)
        .args(["config", "get", "feedback.submit_latency_ms"])
        .assert()
        .success()
        .stdout("1500\n");
}

#[test]
fn test_config_set_persists() {
    let temp = TempDir::new().unwrap();
    vidx(&temp)
        .args(["config", "set", "feedback.auto_close_ms", "250"])
        .assert()
        .success();

    let saved = fs::read_to_string(temp.path().join(".vidx/config.json")).unwrap();
    assert!(saved.contains("\"auto_close_ms\": 250"));

    vidx(&temp)
        .args(["config", "get", "feedback.auto_close_ms"])
        .assert()
        .success()
        .stdout("250\n");
}

#[test]
fn test_config_set_invalid_value() {
    let temp = TempDir::new().unwrap();
    vidx(&temp)
        .args(["config", "set", "media.base_url", "videoindex.app"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("media.base_url"));
}

#[test]
fn test_config_unknown_key() {
    let temp = TempDir::new().unwrap();
    vidx(&temp)
        .args(["config", "get", "search.colour"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown config key: search.colour"));
}

#[test]
fn test_config_show_section() {
    let temp = TempDir::new().unwrap();
    vidx(&temp)
        .args(["config", "show", "--section", "search"])
        .assert()
        .success()
        .stdout(predicate::str::contains("placeholder"))
        .stdout(predicate::str::contains("Search learning pods..."));
}

#[test]
fn test_config_reset_with_yes() {
    let temp = setup_project(r#"{ "search": { "placeholder": "Find..." } }"#);
    vidx(&temp)
        .args(["config", "reset", "-y"])
        .assert()
        .success();
    vidx(&temp)
        .args(["config", "get", "search.placeholder"])
        .assert()
        .success()
        .stdout("Search learning pods...\n");
}

#[test]
fn test_explicit_config_path() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("custom.json");
    vidx(&temp)
        .args(["config", "set", "logging.level", "debug", "--config"])
        .arg(&file)
        .assert()
        .success();
    assert!(file.exists());
    assert!(!temp.path().join(".vidx").exists());
}

#[test]
fn test_broken_config_reports_parse_error() {
    let temp = setup_project("{ not json");
    vidx(&temp)
        .arg("categories")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config JSON"));
}
