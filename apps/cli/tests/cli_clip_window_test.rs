//! Integration tests for the `sfops clip-window` command.

use assert_cmd::Command;
use predicates::prelude::*;

fn clip_window_json(args: &[&str]) -> serde_json::Value {
    let assert = Command::cargo_bin("sfops").unwrap().arg("clip-window").args(args).arg("--json").assert().success();
    serde_json::from_slice(&assert.get_output().stdout).expect("clip-window JSON should be valid")
}

#[test]
fn test_uniform_views_span_the_record() {
    let views = clip_window_json(&["48000", "--clip-secs", "1", "--num-clips", "3"]);
    let views = views.as_array().unwrap();
    assert_eq!(views.len(), 3);

    let bounds: Vec<(f64, f64)> =
        views.iter().map(|v| (v["start"].as_f64().unwrap(), v["end"].as_f64().unwrap())).collect();
    assert_eq!(bounds, vec![(0.0, 23_999.0), (12_000.0, 35_999.0), (24_000.0, 47_999.0)]);
}

#[test]
fn test_start_sample_offsets_window() {
    let views = clip_window_json(&["24000", "--clip-secs", "1", "--num-clips", "1", "--start-sample", "1000"]);
    assert_eq!(views[0]["start"].as_f64().unwrap(), 1000.0);
    assert_eq!(views[0]["end"].as_f64().unwrap(), 24_999.0);
}

#[test]
fn test_short_record_starts_at_zero() {
    let views = clip_window_json(&["100", "--seed", "3"]);
    assert_eq!(views[0]["start"].as_f64().unwrap(), 0.0);
}

#[test]
fn test_seeded_random_clip_is_reproducible() {
    let a = clip_window_json(&["480000", "--seed", "42"]);
    let b = clip_window_json(&["480000", "--seed", "42"]);
    assert_eq!(a, b);

    let start = a[0]["start"].as_f64().unwrap();
    assert!((0.0..=480_000.0 - 47_976.0).contains(&start));
}

#[test]
fn test_human_output() {
    Command::cargo_bin("sfops")
        .unwrap()
        .args(["clip-window", "48000", "--clip-secs", "1", "--num-clips", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("24000 samples"))
        .stdout(predicate::str::contains("[1] 24000..=47999"));
}

#[test]
fn test_zero_clips_rejected() {
    Command::cargo_bin("sfops")
        .unwrap()
        .args(["clip-window", "48000", "--num-clips", "0"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--num-clips"));
}

#[test]
fn test_clip_window_ignores_project_config() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join(".sfopsrc"), "[cluster\n").unwrap();

    Command::cargo_bin("sfops")
        .unwrap()
        .current_dir(temp_dir.path())
        .arg("--project")
        .arg(temp_dir.path())
        .args(["clip-window", "48000", "--clip-secs", "1", "--num-clips", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[0] 0..=23999"));
}
