// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Ambient console output.
//!
//! Each thread has a current output target, process stdout unless
//! redirected. Code that wants its output to be capturable writes through
//! [`out()`] (or the [`out!`](crate::out) / [`outln!`](crate::outln) macros)
//! instead of `println!`.
//!
//! Targets are [`OutputHandle`]s: shared, clonable writers with identity.
//! Restoring a redirection reinstalls the very handle that was saved.

use std::cell::RefCell;
use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

thread_local! {
    static TARGET: RefCell<Option<OutputHandle>> = const { RefCell::new(None) };
}

static STDOUT: OnceLock<OutputHandle> = OnceLock::new();

/// A shared writer used as an output target.
#[derive(Clone)]
pub struct OutputHandle {
    inner: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl OutputHandle {
    pub fn new<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Box::new(writer))),
        }
    }

    /// The process stdout handle. Always the same handle.
    pub fn stdout() -> Self {
        STDOUT.get_or_init(|| OutputHandle::new(io::stdout())).clone()
    }

    /// True if both handles refer to the same target (not merely equal output).
    pub fn same_as(&self, other: &OutputHandle) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    // A writer that panicked mid-write leaves the stream usable.
    fn lock(&self) -> MutexGuard<'_, Box<dyn Write + Send>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Write for OutputHandle {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.lock().write(buf)
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.lock().write_all(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.lock().flush()
    }
}

impl fmt::Debug for OutputHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutputHandle")
            .field("target", &Arc::as_ptr(&self.inner))
            .finish()
    }
}

/// The calling thread's current output target.
///
/// The returned handle keeps its target alive. Holding a clone of a
/// redirected target past the end of a redirection (for example in a
/// detached thread) keeps a pipe's write end open.
pub fn out() -> OutputHandle {
    TARGET
        .with_borrow(|target| target.clone())
        .unwrap_or_else(OutputHandle::stdout)
}

/// Install `to` as this thread's output target, returning the previous one.
pub fn redirect(to: OutputHandle) -> OutputHandle {
    TARGET
        .replace(Some(to))
        .unwrap_or_else(OutputHandle::stdout)
}

/// Reinstall a target returned by [`redirect`].
///
/// The replaced target is flushed and released.
pub fn restore(previous: OutputHandle) {
    if let Some(mut current) = TARGET.replace(Some(previous))
        && let Err(e) = current.flush()
    {
        tracing::warn!("failed to flush redirected output: {}", e);
    }
}

/// Redirect this thread's output until the returned guard is dropped.
pub fn redirect_scoped(to: OutputHandle) -> Redirect {
    Redirect {
        previous: Some(redirect(to)),
    }
}

/// Guard restoring the previous output target when dropped.
#[must_use = "output is restored as soon as the guard is dropped"]
pub struct Redirect {
    previous: Option<OutputHandle>,
}

impl Redirect {
    /// The target that will be restored.
    pub fn original(&self) -> Option<&OutputHandle> {
        self.previous.as_ref()
    }
}

impl Drop for Redirect {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            restore(previous);
        }
    }
}

/// In-memory output target that can be read back.
#[derive(Clone, Default)]
pub struct CaptureBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl CaptureBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Captured bytes, lossily decoded.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.lock()).into_owned()
    }

    /// Remove and return everything captured so far.
    pub fn take(&self) -> Vec<u8> {
        std::mem::take(&mut *self.lock())
    }

    fn lock(&self) -> MutexGuard<'_, Vec<u8>> {
        self.bytes.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Write for CaptureBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Write to the ambient console, like `write!`.
#[macro_export]
macro_rules! out {
    ($($arg:tt)*) => {{
        use ::std::io::Write as _;
        ::std::write!($crate::console::out(), $($arg)*)
    }};
}

/// Write a line to the ambient console, like `writeln!`.
#[macro_export]
macro_rules! outln {
    () => {{
        use ::std::io::Write as _;
        ::std::writeln!($crate::console::out())
    }};
    ($($arg:tt)*) => {{
        use ::std::io::Write as _;
        ::std::writeln!($crate::console::out(), $($arg)*)
    }};
}

#[cfg(test)]
#[path = "console_tests.rs"]
mod tests;
