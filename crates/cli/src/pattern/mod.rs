// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Line predicates for output filtering.
//!
//! Compiled patterns pick the cheapest matcher that fits:
//! - Single literal: memchr::memmem
//! - Multiple literals (or case-insensitive literals): aho-corasick
//! - Anything with regex syntax: regex crate

pub mod matcher;

pub use matcher::{CompiledPattern, FnPredicate, Invert, LinePredicate, PatternBuilder, PatternError, from_fn};

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
