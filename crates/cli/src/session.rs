// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! A session bundles the suppressed-output log, filter settings and an
//! optional connection to re-establish after filtering.
//!
//! Prefer a `Session` over the free functions when more than one component
//! suppresses output: the log is owned here instead of being process-wide.

use std::io::Write as _;

use crate::config::Config;
use crate::console::OutputHandle;
use crate::error::Result;
use crate::filter::FilterOptions;
use crate::pattern::{CompiledPattern, LinePredicate};
use crate::pipeline::{FilterOutcome, FilterPipeline};
use crate::sql::{EchoOptions, EchoingConnection, Reconnect};
use crate::suppress::{SuppressedLog, with_stdout_suppressed, with_suppressed};

#[derive(Default)]
pub struct Session {
    log: SuppressedLog,
    options: FilterOptions,
    echo: EchoOptions,
    connection: Option<Box<dyn Reconnect>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Session using the `[grep]` and `[sql]` settings of `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            options: config.grep.filter_options()?,
            echo: config.sql.echo_options(),
            ..Self::default()
        })
    }

    pub fn with_options(mut self, options: FilterOptions) -> Self {
        self.options = options;
        self
    }

    /// Connection re-validated after every [`Session::grep`].
    pub fn with_connection(mut self, connection: Box<dyn Reconnect>) -> Self {
        self.connection = Some(connection);
        self
    }

    pub fn log(&self) -> &SuppressedLog {
        &self.log
    }

    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    /// Wrap `conn` so each statement is echoed in the session's color.
    pub fn echoing<C>(&self, conn: C) -> Result<EchoingConnection<C>> {
        EchoingConnection::new(conn, self.echo.clone())
    }

    /// Run `block` with console output suppressed into this session's log.
    pub fn suppress<T, F>(&self, block: F) -> T
    where
        F: FnOnce(&mut OutputHandle) -> T,
    {
        with_suppressed(&self.log, block)
    }

    /// Like [`Session::suppress`], but silences process stdout itself,
    /// including `println!` and child processes.
    pub fn suppress_stdout<T, F>(&self, block: F) -> Result<T>
    where
        F: FnOnce(&mut OutputHandle) -> T,
    {
        with_stdout_suppressed(&self.log, block)
    }

    /// Run `block` showing only console lines matching `pattern`.
    pub fn grep<T, F>(&mut self, pattern: &str, block: F) -> Result<FilterOutcome<T>>
    where
        F: FnOnce() -> T + Send,
        T: Send,
    {
        let pattern = CompiledPattern::compile(pattern)?;
        self.filter(&pattern, block)
    }

    /// [`Session::grep`] with a caller-supplied predicate.
    pub fn filter<T, F>(&mut self, pattern: &dyn LinePredicate, block: F) -> Result<FilterOutcome<T>>
    where
        F: FnOnce() -> T + Send,
        T: Send,
    {
        let mut pipeline = FilterPipeline::new(pattern)
            .options(self.options.clone())
            .suppressed_log(self.log.clone());
        if let Some(conn) = self.connection.as_deref_mut() {
            pipeline = pipeline.reconnect(conn);
        }
        pipeline.run(block)
    }

    /// Write the accumulated suppressed output to `out`.
    pub fn dump_log(&self, out: &mut OutputHandle) -> std::io::Result<()> {
        out.write_all(self.log.contents().as_bytes())?;
        out.flush()
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
