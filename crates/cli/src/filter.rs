// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Filter stage: forwards the lines of a byte stream that match a pattern.
//!
//! Reads block until data or end of stream. Each complete line is tested as
//! soon as it is reassembled and every match is written and flushed at
//! once, so filtered output keeps pace with the producer. At end of stream
//! the trailing newline-less fragment, if any, is tested once.

use std::io::{self, ErrorKind, Read, Write};

use crate::color;
use crate::error::{Error, Result};
use crate::lines::LineBuffer;
use crate::pattern::LinePredicate;

/// Default read size in bytes.
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

/// Filter stage settings.
#[derive(Debug, Clone)]
pub struct FilterOptions {
    /// Maximum bytes per read.
    pub chunk_size: usize,
    /// Escape sequence wrapped around each forwarded line.
    pub highlight: Option<String>,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            highlight: None,
        }
    }
}

/// Counters reported when the stream ends.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FilterStats {
    /// Bytes read from the stream.
    pub bytes: u64,
    /// Lines tested, including a final fragment.
    pub lines: usize,
    /// Lines forwarded.
    pub matched: usize,
}

/// Read `reader` to end of stream, writing lines that match `pattern` to `sink`.
pub fn run<R, W>(
    mut reader: R,
    pattern: &dyn LinePredicate,
    sink: &mut W,
    options: &FilterOptions,
) -> Result<FilterStats>
where
    R: Read,
    W: Write + ?Sized,
{
    let mut forward = Forwarder {
        pattern,
        sink,
        highlight: options.highlight.as_deref(),
        stats: FilterStats::default(),
    };
    let mut buffer = LineBuffer::new();
    let mut chunk = vec![0u8; options.chunk_size.max(1)];

    loop {
        let n = match reader.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(Error::Read(e)),
        };
        forward.stats.bytes += n as u64;
        for line in buffer.feed(&chunk[..n]) {
            forward.line(&line, true)?;
        }
    }

    if let Some(fragment) = buffer.finish() {
        forward.line(&fragment, false)?;
    }

    Ok(forward.stats)
}

struct Forwarder<'a, W: Write + ?Sized> {
    pattern: &'a dyn LinePredicate,
    sink: &'a mut W,
    highlight: Option<&'a str>,
    stats: FilterStats,
}

impl<W: Write + ?Sized> Forwarder<'_, W> {
    fn line(&mut self, line: &[u8], newline: bool) -> Result<()> {
        self.stats.lines += 1;
        let text = String::from_utf8_lossy(line);
        if !self.pattern.matches(&text)? {
            return Ok(());
        }
        self.stats.matched += 1;
        self.emit(line, newline).map_err(Error::Write)
    }

    fn emit(&mut self, line: &[u8], newline: bool) -> io::Result<()> {
        match self.highlight {
            Some(seq) => {
                self.sink.write_all(seq.as_bytes())?;
                self.sink.write_all(line)?;
                self.sink.write_all(color::RESET.as_bytes())?;
            }
            None => self.sink.write_all(line)?,
        }
        if newline {
            self.sink.write_all(b"\n")?;
        }
        self.sink.flush()
    }
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
