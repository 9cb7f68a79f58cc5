// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Test helpers for behavioral specifications.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

pub use assert_cmd::prelude::*;
pub use predicates;
pub use predicates::prelude::PredicateBooleanExt;
use assert_cmd::Command;

/// Returns a Command configured to run the hush binary, isolated from the
/// caller's environment.
pub fn hush_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("hush"));
    cmd.env_remove("HUSH_CONFIG")
        .env_remove("HUSH_LOG")
        .env_remove("NO_COLOR");
    cmd
}

/// Noisy program output used across the grep specs.
pub const NOISY: &str = "Some debugging output here\nThe value of x is y\nThe value of foo is bar\n";
