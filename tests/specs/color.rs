// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `hush color` behavior.

use crate::prelude::*;

#[test]
fn resolves_name_to_escaped_sequence() {
    hush_cmd()
        .args(["color", "BRIGHT_RED_ON_BLUE"])
        .assert()
        .success()
        .stdout("\\e[1;31;44m\n");
}

#[test]
fn names_are_case_insensitive() {
    hush_cmd()
        .args(["color", "red"])
        .assert()
        .success()
        .stdout("\\e[22;31m\n");
}

#[test]
fn background_only() {
    hush_cmd()
        .args(["color", "ON_BLUE"])
        .assert()
        .success()
        .stdout("\\e[44m\n");
}

#[test]
fn json_output_includes_codes() {
    let output = hush_cmd()
        .args(["color", "BRIGHT_RED_ON_BLUE", "-o", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["name"], "BRIGHT_RED_ON_BLUE");
    assert_eq!(json["sequence"], "\x1b[1;31;44m");
    assert_eq!(json["codes"], serde_json::json!([1, 31, 44]));
}

#[test]
fn unknown_name_exits_two() {
    hush_cmd()
        .args(["color", "PURPLE"])
        .assert()
        .code(2)
        .stdout("")
        .stderr(predicates::str::contains("invalid color"));
}

#[test]
fn validate_accepts_escape_sequence() {
    hush_cmd()
        .args(["color", "--validate", "\x1b[1;31;44m"])
        .assert()
        .success()
        .stdout("valid: \\e[1;31;44m\n");
}

#[test]
fn validate_rejects_plain_text() {
    hush_cmd()
        .args(["color", "--validate", "not a sequence"])
        .assert()
        .code(2)
        .stdout(predicates::str::starts_with("invalid"));
}

#[test]
fn list_shows_every_foreground() {
    hush_cmd()
        .args(["color", "--list"])
        .assert()
        .success()
        .stdout(
            predicates::str::contains("BRIGHT_WHITE")
                .and(predicates::str::contains("BLACK"))
                .and(predicates::str::contains("\\e[1;36m")),
        );
}

#[test]
fn list_as_json() {
    let output = hush_cmd()
        .args(["color", "--list", "-o", "json"])
        .output()
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json.as_array().map(Vec::len), Some(16));
}
