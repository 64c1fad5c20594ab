//! Integration tests for the `calsift` CLI binary.
//!
//! These use `assert_cmd` and `predicates` to exercise the classify and
//! resolve subcommands through the actual binary, including stdin piping,
//! file I/O, and validation failures.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn events_json() -> String {
    std::fs::read_to_string(fixture("events.json")).expect("events fixture must exist")
}

/// Run a subcommand with fixture paths and return parsed stdout JSON.
fn run_json(args: &[&str]) -> serde_json::Value {
    let output = Command::cargo_bin("calsift")
        .unwrap()
        .args(args)
        .output()
        .expect("binary should run");
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

// ─────────────────────────────────────────────────────────────────────────────
// Classify subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn classify_events_from_stdin() {
    Command::cargo_bin("calsift")
        .unwrap()
        .args(["classify", "-r", &fixture("rules.json")])
        .write_stdin(events_json())
        .assert()
        .success()
        .stdout(predicate::str::contains("Fußball U16 Jungen"))
        .stdout(predicate::str::contains("groups"));
}

#[test]
fn classify_with_roster_and_manual_pins() {
    let schedule = run_json(&[
        "classify",
        "-e",
        &fixture("events.json"),
        "-r",
        &fixture("rules.json"),
        "-m",
        &fixture("manual.json"),
        "-g",
        &fixture("groups.json"),
    ]);

    let groups = schedule["groups"].as_array().unwrap();
    let names: Vec<&str> = groups.iter().map(|g| g["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["Jugend", "Vorstand"]);

    // Rules put both recurring series into "Jugend"; the manual pin sends
    // the board meeting to "Vorstand"; nothing is left over.
    assert_eq!(groups[0]["series"].as_array().unwrap().len(), 2);
    assert_eq!(groups[1]["series"].as_array().unwrap().len(), 1);
    assert!(schedule["ungrouped"].as_array().unwrap().is_empty());
}

#[test]
fn classify_without_roster_uses_placeholder_names() {
    let schedule = run_json(&[
        "classify",
        "-e",
        &fixture("events.json"),
        "-r",
        &fixture("rules.json"),
    ]);

    let groups = schedule["groups"].as_array().unwrap();
    assert_eq!(groups[0]["name"], "group-1");
    // No manual file: the board meeting stays ungrouped.
    assert_eq!(schedule["ungrouped"][0]["title"], "Vorstandssitzung");
}

#[test]
fn classify_sorts_instances_by_start_time() {
    let schedule = run_json(&[
        "classify",
        "-e",
        &fixture("events.json"),
        "-r",
        &fixture("rules.json"),
    ]);

    let series = schedule["groups"][0]["series"].as_array().unwrap();
    let fussball = series
        .iter()
        .find(|s| s["title"] == "Fußball U16 Jungen")
        .expect("series must be present");
    assert_eq!(fussball["instance_count"], 2);
    assert_eq!(fussball["instances"][0]["uid"], "ev-001");
    assert_eq!(fussball["instances"][1]["uid"], "ev-002");
}

#[test]
fn classify_writes_output_file() {
    let out_path = "/tmp/calsift-test-classify-output.json";
    let _ = std::fs::remove_file(out_path);

    Command::cargo_bin("calsift")
        .unwrap()
        .args([
            "classify",
            "-e",
            &fixture("events.json"),
            "-r",
            &fixture("rules.json"),
            "-o",
            out_path,
        ])
        .assert()
        .success();

    let content = std::fs::read_to_string(out_path).expect("output file must exist");
    assert!(content.contains("Fußball U16 Jungen"));

    let _ = std::fs::remove_file(out_path);
}

// ─────────────────────────────────────────────────────────────────────────────
// Resolve subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn resolve_domain_filter_applies_blacklist() {
    let resolved = run_json(&[
        "resolve",
        "-e",
        &fixture("events.json"),
        "-f",
        &fixture("filter_domain.json"),
        "-r",
        &fixture("rules.json"),
    ]);

    let titles: Vec<&str> = resolved
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["title"].as_str().unwrap())
        .collect();
    assert_eq!(
        titles,
        vec!["Fußball U16 Jungen", "Fußball U16 Jungen"],
        "the blacklisted Jugendabend series must not be exported"
    );
}

#[test]
fn resolve_domain_filter_without_rules_fails() {
    Command::cargo_bin("calsift")
        .unwrap()
        .args([
            "resolve",
            "-e",
            &fixture("events.json"),
            "-f",
            &fixture("filter_domain.json"),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("needs --rules"));
}

#[test]
fn resolve_personal_filter_freezes_the_snapshot() {
    let resolved = run_json(&[
        "resolve",
        "-e",
        &fixture("events.json"),
        "-f",
        &fixture("filter_personal.json"),
    ]);

    let uids: Vec<&str> = resolved
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["uid"].as_str().unwrap())
        .collect();
    // ev-004 was ingested after the filter was created; ev-003 before.
    assert_eq!(uids, vec!["ev-003"]);
}

#[test]
fn resolve_ambiguous_filter_record_fails() {
    Command::cargo_bin("calsift")
        .unwrap()
        .args([
            "resolve",
            "-e",
            &fixture("events.json"),
            "-f",
            &fixture("filter_ambiguous.json"),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid filter record"));
}

#[test]
fn resolve_writes_output_file() {
    let out_path = "/tmp/calsift-test-resolve-output.json";
    let _ = std::fs::remove_file(out_path);

    Command::cargo_bin("calsift")
        .unwrap()
        .args([
            "resolve",
            "-e",
            &fixture("events.json"),
            "-f",
            &fixture("filter_personal.json"),
            "-o",
            out_path,
        ])
        .assert()
        .success();

    let content = std::fs::read_to_string(out_path).expect("output file must exist");
    assert!(content.contains("ev-003"));

    let _ = std::fs::remove_file(out_path);
}

// ─────────────────────────────────────────────────────────────────────────────
// Error handling and usage
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn invalid_events_json_fails() {
    Command::cargo_bin("calsift")
        .unwrap()
        .args(["classify", "-r", &fixture("rules.json")])
        .write_stdin("this is not json {{{")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse events JSON"));
}

#[test]
fn missing_rules_file_fails_with_path_in_message() {
    Command::cargo_bin("calsift")
        .unwrap()
        .args(["classify", "-e", &fixture("events.json"), "-r", "/nonexistent/rules.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("/nonexistent/rules.json"));
}

#[test]
fn help_flag_shows_usage() {
    Command::cargo_bin("calsift")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("classify"))
        .stdout(predicate::str::contains("resolve"));
}

#[test]
fn unknown_subcommand_fails() {
    Command::cargo_bin("calsift")
        .unwrap()
        .arg("frobnicate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error").or(predicate::str::contains("unrecognized")));
}
