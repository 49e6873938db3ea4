//! CLI integration tests using assert_cmd.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

fn assessa(data_dir: &Path) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("assessa").unwrap();
    cmd.env_remove("ASSESSA_DATA_DIR")
        .env_remove("RUST_LOG")
        .arg("--data-dir")
        .arg(data_dir);
    cmd
}

fn json_output(cmd: &mut Command) -> Value {
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).unwrap()
}

fn create_profile(data_dir: &Path, name: &str) -> String {
    let profile = json_output(assessa(data_dir).args(["create-profile", name]));
    profile["id"].as_str().unwrap().to_string()
}

#[test]
fn first_run_seeds_the_document() {
    let dir = TempDir::new().unwrap();

    let profiles = json_output(assessa(dir.path()).arg("profiles"));
    assert_eq!(profiles, Value::Array(vec![]));
    assert!(dir.path().join("assessa.json").exists());
}

#[test]
fn instruments_are_listed() {
    let dir = TempDir::new().unwrap();
    let instruments = json_output(assessa(dir.path()).arg("instruments"));
    let ids: Vec<&str> = instruments
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["PHQ-9", "GAD-7", "PHQ-2", "GAD-2"]);
    assert_eq!(instruments[0]["maxTotal"], 27);
}

#[test]
fn record_and_read_back() {
    let dir = TempDir::new().unwrap();
    let id = create_profile(dir.path(), "Ana");

    let result = json_output(assessa(dir.path()).args([
        "record",
        "--profile",
        id.as_str(),
        "--test",
        "PHQ-9",
        "--answers",
        "1,1,1,1,1,1,1,1,1",
        "--note",
        "after exams",
    ]));
    assert_eq!(result["scores"]["total"], 9);
    assert_eq!(result["scores"]["severity"], "Mild");

    let history = json_output(assessa(dir.path()).args([
        "history",
        "--profile",
        id.as_str(),
        "--timeframe",
        "30",
    ]));
    assert_eq!(history.as_array().unwrap().len(), 1);

    let summary = json_output(assessa(dir.path()).arg("summary"));
    assert_eq!(summary["count"], 1);
    assert_eq!(summary["averageScoreByInstrument"]["PHQ-9"], 9.0);

    let series = json_output(assessa(dir.path()).arg("series"));
    assert_eq!(series["PHQ-9"]["scores"], serde_json::json!([9]));

    let profiles = json_output(assessa(dir.path()).arg("profiles"));
    assert_eq!(profiles[0]["resultCount"], 1);
}

#[test]
fn incomplete_answers_fail() {
    let dir = TempDir::new().unwrap();
    let id = create_profile(dir.path(), "Ana");

    assessa(dir.path())
        .args(["record", "--profile", id.as_str(), "--test", "GAD-7", "--answers", "1,2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no answer for question"));
}

#[test]
fn bad_timeframe_is_rejected() {
    let dir = TempDir::new().unwrap();
    assessa(dir.path())
        .args(["history", "--timeframe", "forever"])
        .assert()
        .failure();
}

#[test]
fn settings_get_and_set() {
    let dir = TempDir::new().unwrap();

    let theme = json_output(assessa(dir.path()).args(["settings", "get", "ui.theme"]));
    assert_eq!(theme, "light");

    let settings =
        json_output(assessa(dir.path()).args(["settings", "set", "audio.musicVolume", "0.8"]));
    assert_eq!(settings["audio"]["musicVolume"], 0.8);
    assert_eq!(settings["audio"]["backgroundMusic"], true);

    json_output(assessa(dir.path()).args(["settings", "set", "ui.theme", "dark"]));
    let theme = json_output(assessa(dir.path()).args(["settings", "get", "ui.theme"]));
    assert_eq!(theme, "dark");

    assessa(dir.path())
        .args(["settings", "set", "audio.soundEffects", "loud"])
        .assert()
        .failure();
}

#[test]
fn delete_profile_cascades() {
    let dir = TempDir::new().unwrap();
    let id = create_profile(dir.path(), "Ana");
    json_output(assessa(dir.path()).args([
        "record", "--profile", id.as_str(), "--test", "GAD-2", "--answers", "0,1",
    ]));

    let deletion = json_output(assessa(dir.path()).args(["delete-profile", id.as_str()]));
    assert_eq!(deletion["profileRemoved"], true);
    assert_eq!(deletion["resultsRemoved"], 1);

    let history = json_output(assessa(dir.path()).arg("history"));
    assert_eq!(history, Value::Array(vec![]));
}

#[test]
fn export_and_restore_into_a_fresh_directory() {
    let source = TempDir::new().unwrap();
    let target = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();

    let id = create_profile(source.path(), "Ana");
    json_output(assessa(source.path()).args([
        "record", "--profile", id.as_str(), "--test", "PHQ-2", "--answers", "3,3",
    ]));

    let exported = json_output(
        assessa(source.path())
            .arg("export")
            .arg("--out-dir")
            .arg(out.path()),
    );
    let file = exported["file"].as_str().unwrap().to_string();
    assert!(file.contains("assessa-backup-"));

    let restored = json_output(assessa(target.path()).args(["restore", file.as_str()]));
    assert_eq!(restored["profiles"], 1);
    assert_eq!(restored["testResults"], 1);

    let profiles = json_output(assessa(target.path()).arg("profiles"));
    assert_eq!(profiles[0]["id"], id.as_str());
}

#[test]
fn restore_rejects_garbage() {
    let dir = TempDir::new().unwrap();
    let bad = dir.path().join("bad.json");
    std::fs::write(&bad, r#"{"profiles": []}"#).unwrap();

    assessa(dir.path())
        .arg("restore")
        .arg(&bad)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid backup format"));
}

#[test]
fn text_report() {
    let dir = TempDir::new().unwrap();
    let id = create_profile(dir.path(), "Ana");
    json_output(assessa(dir.path()).args([
        "record", "--profile", id.as_str(), "--test", "GAD-2", "--answers", "2,2",
    ]));

    assessa(dir.path())
        .args(["report", "--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Profile: Ana"))
        .stdout(predicate::str::contains("Score: 4 (Positive screen)"));
}

#[test]
fn reset_requires_confirmation() {
    let dir = TempDir::new().unwrap();
    create_profile(dir.path(), "Ana");

    assessa(dir.path()).arg("reset").assert().failure();
    let profiles = json_output(assessa(dir.path()).arg("profiles"));
    assert_eq!(profiles.as_array().unwrap().len(), 1);

    json_output(assessa(dir.path()).args(["reset", "--yes"]));
    let profiles = json_output(assessa(dir.path()).arg("profiles"));
    assert_eq!(profiles, Value::Array(vec![]));
}
