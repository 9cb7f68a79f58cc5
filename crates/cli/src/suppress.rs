// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Output suppression and capture.
//!
//! [`with_suppressed`] hides a block's console output while handing the block
//! the original target for anything that should still be shown:
//!
//! ```ignore
//! let log = SuppressedLog::new();
//! with_suppressed(&log, |stdout| {
//!     writeln!(stdout, "About to call noisy()")?;
//!     noisy();
//!     writeln!(stdout, "Called noisy()")
//! })?;
//! ```
//!
//! Whatever the block wrote to the console is appended to a
//! [`SuppressedLog`] once the original target is back in place, on every
//! exit path including panics.
//!
//! [`with_suppressed`] only sees the console. [`with_stdout_suppressed`]
//! captures file descriptor 1 itself, so `println!` and child processes
//! are silenced too.

use std::io::{self, Read};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};
use std::thread::{self, ScopedJoinHandle};

use crate::console::{self, CaptureBuffer, OutputHandle, Redirect};
use crate::error::{Error, Result};
use crate::splice::{self, Splice, SpliceGuard, StdoutRedirect, StdoutSplice};

/// Append-only record of suppressed output.
///
/// Clones share the same record.
#[derive(Debug, Clone, Default)]
pub struct SuppressedLog {
    text: Arc<Mutex<String>>,
}

static GLOBAL: OnceLock<SuppressedLog> = OnceLock::new();

impl SuppressedLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide log, created on first use.
    pub fn global() -> &'static SuppressedLog {
        GLOBAL.get_or_init(SuppressedLog::new)
    }

    pub fn append(&self, text: &str) {
        self.lock().push_str(text);
    }

    /// Everything suppressed so far.
    pub fn contents(&self) -> String {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, String> {
        self.text.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Run `block` with this thread's console output captured into `log`.
///
/// `block` receives the original target. The original target is restored
/// exactly once, and the captured text appended, even if `block` panics.
pub fn with_suppressed<T, F>(log: &SuppressedLog, block: F) -> T
where
    F: FnOnce(&mut OutputHandle) -> T,
{
    let buffer = CaptureBuffer::new();
    let redirect = console::redirect_scoped(OutputHandle::new(buffer.clone()));
    let mut original = redirect.original().cloned().unwrap_or_else(OutputHandle::stdout);
    let _scope = Suppression {
        log,
        buffer,
        redirect: Some(redirect),
    };
    block(&mut original)
}

/// [`with_suppressed`] against [`SuppressedLog::global`].
pub fn suppress_stdout<T, F>(block: F) -> T
where
    F: FnOnce(&mut OutputHandle) -> T,
{
    with_suppressed(SuppressedLog::global(), block)
}

/// Contents of the process-wide suppressed-output log.
pub fn suppressed_output() -> String {
    SuppressedLog::global().contents()
}

struct Suppression<'a> {
    log: &'a SuppressedLog,
    buffer: CaptureBuffer,
    redirect: Option<Redirect>,
}

impl Drop for Suppression<'_> {
    fn drop(&mut self) {
        // Restore first so nothing written from here on is captured.
        drop(self.redirect.take());
        let captured = self.buffer.take();
        if !captured.is_empty() {
            self.log.append(&String::from_utf8_lossy(&captured));
        }
    }
}

/// Run `block` with process stdout captured into `log`.
///
/// `block` receives a handle to the real stdout. Stdout is restored and
/// the captured text appended on every exit path. Fails with
/// [`Error::AlreadyRedirected`] while another stdout redirection is active.
pub fn with_stdout_suppressed<T, F>(log: &SuppressedLog, block: F) -> Result<T>
where
    F: FnOnce(&mut OutputHandle) -> T,
{
    let splice = StdoutSplice;
    let claim = splice.claim()?;
    let mut original = splice.original()?;
    let (mut reader, writer) = splice::pipe()?;

    thread::scope(|scope| {
        let drain = thread::Builder::new()
            .name("hush-suppress".to_string())
            .spawn_scoped(scope, move || {
                let mut bytes = Vec::new();
                reader.read_to_end(&mut bytes).map(|_| bytes)
            })
            .map_err(|source| Error::Spawn {
                thread: "suppress",
                source,
            })?;
        let redirection = splice.redirect(writer, claim)?;
        let mut capture = StdoutCapture {
            log,
            redirection: Some(redirection),
            drain: Some(drain),
        };
        let value = block(&mut original);
        capture.finish()?;
        Ok(value)
    })
}

struct StdoutCapture<'scope, 'a> {
    log: &'a SuppressedLog,
    redirection: Option<StdoutRedirect>,
    drain: Option<ScopedJoinHandle<'scope, io::Result<Vec<u8>>>>,
}

impl StdoutCapture<'_, '_> {
    fn finish(&mut self) -> Result<()> {
        let restored = match self.redirection.take() {
            Some(redirection) => redirection.restore(),
            None => Ok(()),
        };
        let collected = self.collect();
        restored.and(collected)
    }

    // Only returns once every write end is closed, i.e. after restoring.
    fn collect(&mut self) -> Result<()> {
        let Some(drain) = self.drain.take() else {
            return Ok(());
        };
        match drain.join() {
            Ok(Ok(bytes)) => {
                if !bytes.is_empty() {
                    self.log.append(&String::from_utf8_lossy(&bytes));
                }
                Ok(())
            }
            Ok(Err(e)) => Err(Error::Read(e)),
            Err(_) => Err(Error::Read(io::Error::other("stdout reader panicked"))),
        }
    }
}

impl Drop for StdoutCapture<'_, '_> {
    fn drop(&mut self) {
        drop(self.redirection.take());
        if let Err(e) = self.collect() {
            tracing::warn!("failed to collect suppressed stdout: {}", e);
        }
    }
}

#[cfg(test)]
#[path = "suppress_tests.rs"]
mod tests;
