// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types and exit codes.
//!
//! Configuration errors (bad pattern, bad color) are raised before any
//! output is redirected. Resource errors (pipe, thread spawn) abort before
//! the ambient stream is touched. Errors raised while output is redirected
//! are reported only after the stream has been restored.

use std::io;

use crate::pattern::PatternError;

/// Errors produced by the interception toolkit.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The filter pattern is invalid or failed while evaluating a line.
    #[error(transparent)]
    Pattern(#[from] PatternError),

    /// A color argument is neither a known color name nor an escape sequence.
    #[error("invalid color: {0:?}")]
    InvalidColor(String),

    /// The OS refused to create a pipe.
    #[error("failed to create pipe: {0}")]
    Pipe(#[source] io::Error),

    /// A pipeline thread could not be started.
    #[error("failed to spawn {thread} thread: {source}")]
    Spawn {
        thread: &'static str,
        #[source]
        source: io::Error,
    },

    /// Swapping or restoring the ambient output target failed.
    #[error("failed to redirect output: {0}")]
    Redirect(#[source] io::Error),

    /// Process stdout is already redirected by another splice.
    #[error("stdout is already redirected")]
    AlreadyRedirected,

    /// Reading from the pipe failed for a reason other than end of stream.
    #[error("failed to read captured output: {0}")]
    Read(#[source] io::Error),

    /// Forwarding a matched line to the original output failed.
    #[error("failed to write filtered output: {0}")]
    Write(#[source] io::Error),

    /// The configuration file could not be read or parsed.
    #[error("invalid config {path}: {message}")]
    Config { path: String, message: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Process exit codes, grep-style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// At least one line matched (or the command succeeded).
    Success = 0,
    /// The command ran but nothing matched.
    NoMatch = 1,
    /// Invalid arguments, configuration, or an I/O failure.
    Error = 2,
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        std::process::ExitCode::from(code as u8)
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
