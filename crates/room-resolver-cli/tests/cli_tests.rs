//! Integration tests for the `rooms` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to run the show, search, dates
//! and info subcommands against the `rooms.json` fixture.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper: path to the rooms.json fixture.
fn rooms_json_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/rooms.json")
}

/// Helper: `rooms --schedule <fixture>` ready for more arguments.
fn rooms() -> Command {
    let mut cmd = Command::cargo_bin("rooms").unwrap();
    cmd.env_remove("ROOMS_JSON")
        .env_remove("RUST_LOG")
        .args(["--schedule", rooms_json_path()]);
    cmd
}

// ─────────────────────────────────────────────────────────────────────────────
// show: free rooms
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn show_free_rooms_before_first_lecture() {
    rooms()
        .args(["show", "--date", "01.03.2024", "--time", "08:30"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Free rooms on 01.03.2024 from 08:30"))
        .stdout(predicate::str::contains("  C303"))
        .stdout(predicate::str::contains("  A101").not())
        .stdout(predicate::str::contains("  B202").not());
}

#[test]
fn show_free_rooms_after_a_lecture_ends() {
    rooms()
        .args(["show", "--date", "01.03.2024", "--time", "10:30"])
        .assert()
        .success()
        .stdout(predicate::str::contains("  A101"))
        .stdout(predicate::str::contains("  C303"))
        .stdout(predicate::str::contains("  B202").not());
}

#[test]
fn show_room_with_one_finished_event_is_free() {
    // B202's first lecture ended at 12:15; the 13:00 one has not started.
    rooms()
        .args(["show", "--date", "01.03.2024", "--time", "12:30"])
        .assert()
        .success()
        .stdout(predicate::str::contains("  B202"));
}

#[test]
fn show_other_day_without_time_uses_midnight() {
    rooms()
        .args(["show", "--date", "2024-03-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Free rooms on 01.03.2024\n"))
        .stdout(predicate::str::contains("  C303"));
}

#[test]
fn show_unbooked_day_lists_every_room() {
    rooms()
        .args(["show", "--date", "02.03.2024", "--time", "09:00"])
        .assert()
        .success()
        .stdout(predicate::str::contains("  A101"))
        .stdout(predicate::str::contains("  B202"))
        .stdout(predicate::str::contains("  C303"));
}

// ─────────────────────────────────────────────────────────────────────────────
// show: room events
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn show_room_events() {
    rooms()
        .args(["show", "--date", "01.03.2024", "--room", "B202"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Room schedule for 01.03.2024"))
        .stdout(predicate::str::contains("10:30-12:15 Datenbanken (WWI22A)"))
        .stdout(predicate::str::contains("13:00-15:00 Projektmanagement (WWI22A)"));
}

#[test]
fn show_unknown_room_falls_back_to_free_rooms() {
    rooms()
        .args(["show", "--date", "01.03.2024", "--time", "10:30", "--room", "Z999"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Free rooms on 01.03.2024 from 10:30"));
}

#[test]
fn show_room_without_events_in_german() {
    rooms()
        .args(["--lang", "de", "show", "--date", "02.03.2024", "--room", "A101"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Raumtermine für den 02.03.2024"))
        .stdout(predicate::str::contains("Keine Termine eingetragen"));
}

#[test]
fn show_json_output() {
    let output = rooms()
        .args(["--format", "json", "show", "--date", "01.03.2024", "--room", "A101"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["title"], "Room schedule for 01.03.2024");
    assert_eq!(value["resolution"]["kind"], "room_events");
    assert_eq!(value["resolution"]["value"]["status"], "listed");
    assert_eq!(value["lines"][0], "09:00-10:00 Analysis (TINF23B)");
}

// ─────────────────────────────────────────────────────────────────────────────
// search / dates / info
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn search_is_case_insensitive() {
    rooms()
        .args(["search", "c3"])
        .assert()
        .success()
        .stdout("C303\n");
}

#[test]
fn search_without_input_lists_all_rooms_in_order() {
    rooms()
        .arg("search")
        .assert()
        .success()
        .stdout("A101\nB202\nC303\n");
}

#[test]
fn dates_for_room() {
    rooms()
        .args(["dates", "A101"])
        .assert()
        .success()
        .stdout("01.03.2024\n04.03.2024\n");
}

#[test]
fn dates_for_unknown_room_is_empty() {
    rooms().args(["dates", "Z999"]).assert().success().stdout("");
}

#[test]
fn info_summarises_document() {
    rooms()
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains("Last updated: 28.02.2024, 18:05"))
        .stdout(predicate::str::contains("Rooms:        3"))
        .stdout(predicate::str::contains("Events:       4"));
}

#[test]
fn schedule_path_from_environment() {
    Command::cargo_bin("rooms")
        .unwrap()
        .env("ROOMS_JSON", rooms_json_path())
        .args(["search", "a"])
        .assert()
        .success()
        .stdout("A101\n");
}

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn missing_schedule_file_fails() {
    Command::cargo_bin("rooms")
        .unwrap()
        .env_remove("ROOMS_JSON")
        .args(["--schedule", "/nonexistent/rooms.json", "info"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read schedule"));
}

#[test]
fn invalid_date_is_rejected() {
    rooms()
        .args(["show", "--date", "31.02.2024"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date"));
}

#[test]
fn non_json_schedule_fails() {
    let path = std::env::temp_dir().join("rooms-cli-test-not-json.json");
    std::fs::write(&path, "this is not json").unwrap();

    Command::cargo_bin("rooms")
        .unwrap()
        .env_remove("ROOMS_JSON")
        .arg("--schedule")
        .arg(&path)
        .arg("info")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse schedule"));

    let _ = std::fs::remove_file(&path);
}
