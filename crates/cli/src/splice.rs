// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Pipes and output redirection.
//!
//! A pipe is split into a [`PipeReader`] and a [`PipeWriter`], each owning
//! its file descriptor. The reader sees end of stream once every write end
//! has been dropped, so whoever holds a writer it does not need must drop it.
//!
//! A [`Splice`] redirects an ambient output stream into a pipe writer:
//! - [`ConsoleSplice`]: the calling thread's console target (see [`crate::console`])
//! - [`StdoutSplice`]: the process's file descriptor 1
//!
//! Every descriptor created here is close-on-exec, so child processes
//! never inherit a pipe end they do not know about.

use std::fs::{File, OpenOptions};
use std::io::{self, Read, Write};
use std::os::fd::{AsFd, BorrowedFd, OwnedFd};
use std::sync::atomic::{AtomicBool, Ordering};

use nix::fcntl::OFlag;
use nix::unistd;

use crate::console::{self, OutputHandle, Redirect};
use crate::error::{Error, Result};
use crate::suppress::{self, SuppressedLog};

/// Read end of a pipe.
#[derive(Debug)]
pub struct PipeReader(File);

/// Write end of a pipe.
#[derive(Debug)]
pub struct PipeWriter(File);

/// Create a pipe. Both ends are close-on-exec.
pub fn pipe() -> Result<(PipeReader, PipeWriter)> {
    let (read, write) = unistd::pipe2(OFlag::O_CLOEXEC).map_err(|e| Error::Pipe(e.into()))?;
    Ok((PipeReader(File::from(read)), PipeWriter(File::from(write))))
}

impl PipeWriter {
    /// Duplicate the write end. The reader sees end of stream only after
    /// every clone is dropped.
    pub fn try_clone(&self) -> io::Result<PipeWriter> {
        self.0.try_clone().map(PipeWriter)
    }
}

impl Read for PipeReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.0.read(buf)
    }
}

impl Write for PipeWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.flush()
    }
}

impl AsFd for PipeReader {
    fn as_fd(&self) -> BorrowedFd<'_> {
        self.0.as_fd()
    }
}

impl AsFd for PipeWriter {
    fn as_fd(&self) -> BorrowedFd<'_> {
        self.0.as_fd()
    }
}

/// Redirects an ambient output stream into a pipe.
pub trait Splice: Sync {
    /// Restores the ambient stream when dropped or explicitly restored.
    type Guard: SpliceGuard;

    /// Exclusive right to redirect, held until the guard is released.
    type Claim: Send;

    /// Reserve the ambient stream. Called before any other resource is
    /// acquired, so a conflicting redirection fails early.
    fn claim(&self) -> Result<Self::Claim>;

    /// Handle to the current destination of the ambient stream.
    ///
    /// Called before redirecting; the filter writes matches here.
    fn original(&self) -> Result<OutputHandle>;

    /// Route the ambient stream into `writer` until the guard is released.
    ///
    /// Runs on the thread whose output is being captured.
    fn redirect(&self, writer: PipeWriter, claim: Self::Claim) -> Result<Self::Guard>;

    /// Run `f` with this stream's output suppressed into `log`.
    fn suppress<R>(&self, log: &SuppressedLog, f: impl FnOnce() -> R) -> Result<R>;
}

/// An active redirection.
pub trait SpliceGuard {
    /// Restore the ambient stream, releasing the pipe writer.
    fn restore(self) -> Result<()>;
}

impl SpliceGuard for Redirect {
    fn restore(self) -> Result<()> {
        drop(self);
        Ok(())
    }
}

/// Splices the calling thread's console target.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSplice;

impl Splice for ConsoleSplice {
    type Guard = Redirect;
    type Claim = ();

    fn claim(&self) -> Result<()> {
        Ok(())
    }

    fn original(&self) -> Result<OutputHandle> {
        Ok(console::out())
    }

    fn redirect(&self, writer: PipeWriter, _claim: ()) -> Result<Redirect> {
        Ok(console::redirect_scoped(OutputHandle::new(writer)))
    }

    fn suppress<R>(&self, log: &SuppressedLog, f: impl FnOnce() -> R) -> Result<R> {
        Ok(suppress::with_suppressed(log, |_| f()))
    }
}

static STDOUT_REDIRECTED: AtomicBool = AtomicBool::new(false);

/// Marks process stdout as redirected until dropped.
#[derive(Debug)]
pub struct StdoutClaim(());

impl StdoutClaim {
    fn acquire() -> Result<Self> {
        if STDOUT_REDIRECTED.swap(true, Ordering::AcqRel) {
            return Err(Error::AlreadyRedirected);
        }
        Ok(StdoutClaim(()))
    }
}

impl Drop for StdoutClaim {
    fn drop(&mut self) {
        STDOUT_REDIRECTED.store(false, Ordering::Release);
    }
}

/// Close-on-exec duplicate of file descriptor 1.
fn dup_stdout() -> io::Result<OwnedFd> {
    io::stdout().as_fd().try_clone_to_owned()
}

/// Splices the process's file descriptor 1.
///
/// Captures everything written to stdout by any thread, including
/// `println!` and inherited child output. Only one redirection may be
/// active per process.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSplice;

impl Splice for StdoutSplice {
    type Guard = StdoutRedirect;
    type Claim = StdoutClaim;

    fn claim(&self) -> Result<StdoutClaim> {
        StdoutClaim::acquire()
    }

    fn original(&self) -> Result<OutputHandle> {
        let fd = dup_stdout().map_err(Error::Redirect)?;
        Ok(OutputHandle::new(File::from(fd)))
    }

    fn redirect(&self, writer: PipeWriter, claim: StdoutClaim) -> Result<StdoutRedirect> {
        io::stdout().flush().map_err(Error::Redirect)?;
        let saved = dup_stdout().map_err(Error::Redirect)?;
        unistd::dup2_stdout(&writer).map_err(|e| Error::Redirect(e.into()))?;
        // fd 1 now refers to the pipe; the writer's own descriptor is not needed.
        drop(writer);
        tracing::debug!("stdout redirected into pipe");
        Ok(StdoutRedirect {
            saved: Some(saved),
            _claim: claim,
        })
    }

    fn suppress<R>(&self, log: &SuppressedLog, f: impl FnOnce() -> R) -> Result<R> {
        suppress::with_stdout_suppressed(log, |_| suppress::with_suppressed(log, |_| f()))
    }
}

/// Active redirection of process stdout.
#[derive(Debug)]
pub struct StdoutRedirect {
    saved: Option<OwnedFd>,
    _claim: StdoutClaim,
}

impl StdoutRedirect {
    fn put_back(&mut self) -> io::Result<()> {
        let Some(saved) = self.saved.take() else {
            return Ok(());
        };
        let flushed = io::stdout().flush();
        if flushed.is_err() {
            // Bytes std still buffers must not reach the real stdout unfiltered.
            discard_buffered_stdout();
        }
        unistd::dup2_stdout(&saved)?;
        tracing::debug!("stdout restored");
        flushed
    }
}

/// Flush std's stdout buffer into /dev/null.
fn discard_buffered_stdout() {
    let discarded = OpenOptions::new()
        .write(true)
        .open("/dev/null")
        .and_then(|null| {
            unistd::dup2_stdout(&null)?;
            io::stdout().flush()
        });
    if let Err(e) = discarded {
        tracing::warn!("failed to discard buffered stdout: {}", e);
    }
}

impl SpliceGuard for StdoutRedirect {
    fn restore(mut self) -> Result<()> {
        self.put_back().map_err(Error::Redirect)
    }
}

impl Drop for StdoutRedirect {
    fn drop(&mut self) {
        if let Err(e) = self.put_back() {
            tracing::warn!("failed to restore stdout: {}", e);
        }
    }
}

#[cfg(test)]
#[path = "splice_tests.rs"]
mod tests;
