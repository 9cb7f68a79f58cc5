// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared helpers for unit tests.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::fs::File;
use std::io;
use std::os::fd::AsFd;
use std::os::unix::fs::MetadataExt;
use std::sync::{Mutex, MutexGuard, PoisonError};

static STDOUT_LOCK: Mutex<()> = Mutex::new(());

/// Serializes tests that redirect the process's file descriptor 1.
pub fn lock_stdout() -> MutexGuard<'static, ()> {
    STDOUT_LOCK.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Device and inode of whatever file descriptor 1 currently refers to.
pub fn stdout_identity() -> (u64, u64) {
    let fd = io::stdout().as_fd().try_clone_to_owned().unwrap();
    let meta = File::from(fd).metadata().unwrap();
    (meta.dev(), meta.ino())
}
