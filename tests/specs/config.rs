// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `hush.toml` discovery and precedence.

use std::fs;

use tempfile::TempDir;

use crate::prelude::*;

fn project(config: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join(".git")).unwrap();
    fs::write(dir.path().join("hush.toml"), config).unwrap();
    dir
}

#[test]
fn discovered_config_applies() {
    let dir = project("[grep]\nignore_case = true\n");
    hush_cmd()
        .current_dir(dir.path())
        .args(["grep", "VALUE OF FOO"])
        .write_stdin(NOISY)
        .assert()
        .success()
        .stdout("The value of foo is bar\n");
}

#[test]
fn explicit_config_path_wins() {
    let dir = project("[grep]\nignore_case = false\n");
    let other = dir.path().join("other.toml");
    fs::write(&other, "[grep]\nignore_case = true\n").unwrap();
    hush_cmd()
        .current_dir(dir.path())
        .args(["grep", "VALUE OF FOO", "-C"])
        .arg(&other)
        .write_stdin(NOISY)
        .assert()
        .success();
}

#[test]
fn config_from_environment() {
    let dir = project("");
    let other = dir.path().join("env.toml");
    fs::write(&other, "[grep]\nignore_case = true\n").unwrap();
    hush_cmd()
        .current_dir(dir.path())
        .env("HUSH_CONFIG", &other)
        .args(["grep", "SOME DEBUGGING"])
        .write_stdin(NOISY)
        .assert()
        .success()
        .stdout("Some debugging output here\n");
}

#[test]
fn invalid_config_exits_two() {
    let dir = project("[grep]\nchunk_size = 0\n");
    hush_cmd()
        .current_dir(dir.path())
        .args(["grep", "x"])
        .write_stdin(NOISY)
        .assert()
        .code(2)
        .stderr(predicates::str::contains("chunk_size"));
}

#[test]
fn unknown_config_key_exits_two() {
    let dir = project("[grep]\nbogus = 1\n");
    hush_cmd()
        .current_dir(dir.path())
        .args(["grep", "x"])
        .write_stdin(NOISY)
        .assert()
        .code(2)
        .stderr(predicates::str::contains("bogus"));
}

#[test]
fn verbose_logs_to_stderr_only() {
    hush_cmd()
        .args(["grep", "-v", "foo"])
        .write_stdin(NOISY)
        .assert()
        .success()
        .stdout("The value of foo is bar\n")
        .stderr(predicates::str::contains("filter pipeline"));
}
