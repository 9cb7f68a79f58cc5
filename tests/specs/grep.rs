// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `hush grep` behavior.

use std::fs;

use tempfile::TempDir;

use crate::prelude::*;

#[test]
fn prints_only_matching_lines_from_stdin() {
    hush_cmd()
        .args(["grep", "value"])
        .write_stdin(NOISY)
        .assert()
        .success()
        .stdout("The value of x is y\nThe value of foo is bar\n");
}

#[test]
fn no_match_exits_one_with_empty_output() {
    hush_cmd()
        .args(["grep", "absent"])
        .write_stdin(NOISY)
        .assert()
        .code(1)
        .stdout("");
}

#[test]
fn empty_input_exits_one() {
    hush_cmd().args(["grep", "x"]).write_stdin("").assert().code(1).stdout("");
}

#[test]
fn final_line_without_newline_is_kept_verbatim() {
    hush_cmd()
        .args(["grep", "tail"])
        .write_stdin("head\nthe tail")
        .assert()
        .success()
        .stdout("the tail");
}

#[test]
fn any_of_several_patterns_matches() {
    hush_cmd()
        .args(["grep", "x is", "foo"])
        .write_stdin(NOISY)
        .assert()
        .success()
        .stdout("The value of x is y\nThe value of foo is bar\n");
}

#[test]
fn regex_and_fixed_strings() {
    hush_cmd()
        .args(["grep", "^The .* y$"])
        .write_stdin(NOISY)
        .assert()
        .success()
        .stdout("The value of x is y\n");

    hush_cmd()
        .args(["grep", "-F", "x.y"])
        .write_stdin("xay\nx.y\n")
        .assert()
        .success()
        .stdout("x.y\n");
}

#[test]
fn ignore_case() {
    hush_cmd()
        .args(["grep", "-i", "DEBUGGING"])
        .write_stdin(NOISY)
        .assert()
        .success()
        .stdout("Some debugging output here\n");
}

#[test]
fn invert_match_shows_the_rest() {
    hush_cmd()
        .args(["grep", "--invert-match", "value"])
        .write_stdin(NOISY)
        .assert()
        .success()
        .stdout("Some debugging output here\n");
}

#[test]
fn reads_files_in_order() {
    let dir = TempDir::new().unwrap();
    let first = dir.path().join("first.log");
    let second = dir.path().join("second.log");
    fs::write(&first, "keep 1\ndrop\n").unwrap();
    fs::write(&second, "drop\nkeep 2\n").unwrap();

    hush_cmd()
        .arg("grep")
        .arg("keep")
        .arg("-f")
        .arg(&first)
        .arg("-f")
        .arg(&second)
        .assert()
        .success()
        .stdout("keep 1\nkeep 2\n");
}

#[test]
fn large_input_is_filtered_completely() {
    let mut input = String::new();
    for i in 0..50_000 {
        if i % 1000 == 0 {
            input.push_str(&format!("keep {i}\n"));
        } else {
            input.push_str(&format!("noise {i} {}\n", "z".repeat(30)));
        }
    }
    let expected: String = (0..50).map(|i| format!("keep {}\n", i * 1000)).collect();

    let output = hush_cmd()
        .args(["grep", "--chunk-size", "100", "^keep"])
        .write_stdin(input)
        .output()
        .unwrap();
    assert!(output.status.success());
    similar_asserts::assert_eq!(String::from_utf8(output.stdout).unwrap(), expected);
}

#[test]
fn highlight_wraps_lines_when_color_is_forced() {
    hush_cmd()
        .args(["grep", "foo", "--highlight", "BRIGHT_RED", "--color", "always"])
        .write_stdin(NOISY)
        .assert()
        .success()
        .stdout("\x1b[1;31mThe value of foo is bar\x1b[0m\n");
}

#[test]
fn highlight_is_dropped_without_a_terminal() {
    hush_cmd()
        .args(["grep", "foo", "--highlight", "BRIGHT_RED"])
        .write_stdin(NOISY)
        .assert()
        .success()
        .stdout("The value of foo is bar\n");
}

#[test]
fn invalid_pattern_exits_two() {
    hush_cmd()
        .args(["grep", "(unclosed"])
        .write_stdin(NOISY)
        .assert()
        .code(2)
        .stdout("")
        .stderr(predicates::str::contains("invalid filter pattern"));
}

#[test]
fn invalid_highlight_exits_two() {
    hush_cmd()
        .args(["grep", "x", "--highlight", "PURPLE"])
        .write_stdin(NOISY)
        .assert()
        .code(2)
        .stderr(predicates::str::contains("invalid color"));
}

#[test]
fn missing_file_exits_two() {
    hush_cmd()
        .args(["grep", "x", "-f", "does/not/exist.log"])
        .assert()
        .code(2)
        .stderr(predicates::str::contains("exist.log"));
}
