// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Console output interception.
//!
//! - [`grep_stdout`] runs a block and shows only the matching lines of its
//!   output, live, through a pipe read by a background thread.
//! - [`with_suppressed`] hides a block's output and keeps it in a
//!   [`SuppressedLog`].
//! - [`color`] resolves symbolic color names to ANSI escape sequences.
//!
//! Blocks write through [`out!`] / [`outln!`], which target the calling
//! thread's current console (see [`console`]).

pub mod cli;
pub mod color;
pub mod config;
pub mod console;
pub mod discovery;
pub mod error;
pub mod filter;
pub mod lines;
pub mod pattern;
pub mod pipeline;
pub mod session;
pub mod splice;
pub mod sql;
pub mod suppress;

#[cfg(test)]
mod test_utils;

pub use error::{Error, ExitCode, Result};
pub use pipeline::{FilterOutcome, FilterPipeline, filter_output, grep_stdout};
pub use session::Session;
pub use suppress::{
    SuppressedLog, suppress_stdout, suppressed_output, with_stdout_suppressed, with_suppressed,
};
