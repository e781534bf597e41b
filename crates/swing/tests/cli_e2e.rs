#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const BUNDLED_SONGS: usize = 55;

/// A swing invocation isolated from the user's configuration and environment.
struct Swing {
    home: TempDir,
}

impl Swing {
    fn new() -> Self {
        Self {
            home: TempDir::new().unwrap(),
        }
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("swing").unwrap();
        cmd.env("HOME", self.home.path())
            .env("XDG_CONFIG_HOME", self.home.path().join(".config"))
            .env_remove("SWING_OUTPUT")
            .env_remove("SWING_LIMIT")
            .env_remove("SWING_TOP")
            .env_remove("SWING_LOG");
        cmd
    }

    fn write_config(&self, contents: &str) {
        let dir = self.home.path().join(".config").join("swing");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("swing.toml"), contents).unwrap();
    }
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.output().unwrap();
    assert!(output.status.success(), "{:?}", output);
    String::from_utf8(output.stdout).unwrap()
}

#[test]
fn test_version_names_the_tool() {
    Swing::new()
        .cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("swing"));
}

#[test]
fn test_help_has_description() {
    Swing::new()
        .cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "CLI tool for searching and analyzing jazz standards with chord progressions",
        ));
}

#[test]
fn test_no_command_prints_help_and_fails() {
    Swing::new()
        .cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_unknown_command_fails() {
    Swing::new()
        .cmd()
        .arg("transpose")
        .assert()
        .failure()
        .stderr(predicate::str::contains("transpose"));
}

#[test]
fn test_stats_total() {
    Swing::new()
        .cmd()
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("Jazz Standards Database Statistics"))
        .stdout(predicate::str::contains(format!(
            "Total songs: {}",
            BUNDLED_SONGS
        )));
}

#[test]
fn test_stats_output_is_stable() {
    let swing = Swing::new();
    let first = stdout_of(swing.cmd().args(["stats", "--detailed"]));
    let second = stdout_of(swing.cmd().args(["stats", "--detailed"]));
    assert_eq!(first, second);
    assert!(first.contains("Top composers"));
}

#[test]
fn test_search_miles_davis() {
    Swing::new()
        .cmd()
        .args(["search", "miles", "davis"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found"))
        .stdout(predicate::str::contains("matching 'miles davis'"));
}

#[test]
fn test_search_without_matches_succeeds() {
    Swing::new()
        .cmd()
        .args(["search", "qqqqqqqqqq"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 0 songs matching 'qqqqqqqqqq'"));
}

#[test]
fn test_search_with_unbalanced_quote_fails() {
    Swing::new()
        .cmd()
        .args(["search", "\"blue"])
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("Error:"));
}

#[test]
fn test_search_with_unknown_filter_field_fails() {
    Swing::new()
        .cmd()
        .args(["search", "blue", "mood:sad"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("mood"));
}

#[test]
fn test_search_json() {
    let swing = Swing::new();
    let stdout = stdout_of(swing.cmd().args(["search", "so", "what", "--output", "json"]));
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["search"]["query"], "so what");
    assert_eq!(value["search"]["hits"][0]["song"]["title"], "So What");
}

#[test]
fn test_search_limit_keeps_count() {
    let swing = Swing::new();
    let stdout = stdout_of(
        swing
            .cmd()
            .args(["search", "davis", "--limit", "2", "--output", "json"]),
    );
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["search"]["hits"].as_array().unwrap().len(), 2);
    assert!(value["search"]["count"].as_u64().unwrap() > 2);
}

#[test]
fn test_filter_by_time_signature() {
    let swing = Swing::new();
    let stdout = stdout_of(
        swing
            .cmd()
            .args(["filter", "--time", "3/4", "--output", "json"]),
    );
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let songs = value["songs"].as_array().unwrap();
    assert_eq!(songs.len(), 5);
    assert!(songs.iter().all(|song| song["time_signature"] == "3/4"));
}

#[test]
fn test_filter_rejects_bad_era() {
    Swing::new()
        .cmd()
        .args(["filter", "--era", "fifties"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--era"));
}

#[test]
fn test_show_song() {
    Swing::new()
        .cmd()
        .args(["show", "autumn", "leaves"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Autumn Leaves\n"))
        .stdout(predicate::str::contains("Changes"));
}

#[test]
fn test_show_unknown_title_succeeds_with_hint() {
    Swing::new()
        .cmd()
        .args(["show", "Xyzzy Plugh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Song 'Xyzzy Plugh' not found."));
}

#[test]
fn test_list_keys() {
    Swing::new()
        .cmd()
        .args(["list", "keys"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Distinct keys:"));
}

#[test]
fn test_similar_to_so_what() {
    let swing = Swing::new();
    let stdout = stdout_of(swing.cmd().args(["similar", "So What", "--output", "json"]));
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["reference"]["title"], "So What");
    assert_eq!(value["similar"][0]["song"]["title"], "Impressions");
}

#[test]
fn test_similar_to_changes() {
    Swing::new()
        .cmd()
        .args(["similar", "--changes", "D-7|G7|C^7|C^7", "--key", "C"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Songs with changes similar to 'D-7|G7|C^7|C^7'",
        ));
}

#[test]
fn test_similar_rejects_bad_chords() {
    Swing::new()
        .cmd()
        .args(["similar", "--changes", "D-7|Gmaj7"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_config_file_sets_output() {
    let swing = Swing::new();
    swing.write_config("output = \"json\"\n");
    let stdout = stdout_of(swing.cmd().arg("stats"));
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["stats"]["total"], BUNDLED_SONGS);
}

#[test]
fn test_flag_overrides_environment() {
    let swing = Swing::new();
    let stdout = stdout_of(
        swing
            .cmd()
            .env("SWING_OUTPUT", "json")
            .args(["stats", "--output", "text"]),
    );
    assert!(stdout.contains(&format!("Total songs: {}", BUNDLED_SONGS)));
}

#[test]
fn test_invalid_configured_output_fails() {
    Swing::new()
        .cmd()
        .env("SWING_OUTPUT", "yaml")
        .arg("stats")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("yaml"));
}
