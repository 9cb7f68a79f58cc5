// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Database collaborators.
//!
//! The toolkit does not talk to a database itself. These traits describe
//! the two things it needs from one: executing statements (so they can be
//! echoed or imported) and re-establishing a connection after its output
//! has been redirected.

use std::io::BufRead;

use anyhow::Context;

use crate::color;
use crate::error::{Error, Result};

/// Something that executes SQL statements.
pub trait Execute {
    fn execute(&mut self, sql: &str) -> anyhow::Result<()>;
}

impl<E: Execute + ?Sized> Execute for &mut E {
    fn execute(&mut self, sql: &str) -> anyhow::Result<()> {
        (**self).execute(sql)
    }
}

/// A persistent connection that may need re-establishing.
pub trait Reconnect {
    /// Verify the connection, reconnecting if it dropped.
    fn reconnect(&mut self) -> anyhow::Result<()>;
}

/// Options for [`EchoingConnection`].
#[derive(Debug, Clone, Default)]
pub struct EchoOptions {
    /// Escape sequence or color name; cyan when unset.
    pub color: Option<String>,
}

/// Connection wrapper that prints each statement, colored, before running it.
#[derive(Debug)]
pub struct EchoingConnection<C> {
    inner: C,
    color: String,
}

impl<C> EchoingConnection<C> {
    /// Wrap `inner`. Fails if `options.color` is not a valid color.
    pub fn new(inner: C, options: EchoOptions) -> Result<Self> {
        let color = match options.color {
            Some(c) => color::parse_color(&c)?,
            None => color::resolve("CYAN").ok_or_else(|| Error::InvalidColor("CYAN".to_string()))?,
        };
        Ok(Self { inner, color })
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn into_inner(self) -> C {
        self.inner
    }
}

impl<C: Execute> Execute for EchoingConnection<C> {
    fn execute(&mut self, sql: &str) -> anyhow::Result<()> {
        crate::outln!("{}{}{}", self.color, sql, color::RESET)?;
        self.inner.execute(sql)
    }
}

/// Execute every statement in a SQL dump, returning how many ran.
///
/// Statements end with `;` at the end of a line. Blank statements are
/// skipped; a trailing statement without a terminator is still executed.
pub fn import_dump<R: BufRead, C: Execute>(mut reader: R, conn: &mut C) -> anyhow::Result<usize> {
    let mut statement = String::new();
    let mut line = String::new();
    let mut executed = 0;

    loop {
        line.clear();
        let n = reader.read_line(&mut line).context("failed to read SQL dump")?;
        statement.push_str(&line);
        if n > 0 && !line.ends_with(";\n") {
            continue;
        }
        if !statement.trim().is_empty() {
            executed += 1;
            conn.execute(&statement)
                .with_context(|| format!("statement {} failed", executed))?;
        }
        statement.clear();
        if n == 0 {
            break;
        }
    }

    tracing::debug!("imported {} statements", executed);
    Ok(executed)
}

#[cfg(test)]
#[path = "sql_tests.rs"]
mod tests;
