// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Partial-line reassembly.
//!
//! Output arrives in chunks of arbitrary size and alignment; a line may be
//! split across any number of reads. [`LineBuffer`] keeps the incomplete
//! tail between chunks and yields only complete lines.
//!
//! Lines are bytes, so a multi-byte UTF-8 character split across two
//! chunks is rejoined before anyone decodes it.

use memchr::memrchr;

/// Bytes not yet resolved into complete lines.
#[derive(Debug, Default, Clone)]
pub struct LineBuffer {
    pending: Vec<u8>,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `chunk` and return every line completed by it, without the
    /// trailing newline, in order.
    ///
    /// Afterwards the buffer holds exactly the bytes after the last newline.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<Vec<u8>> {
        // `pending` never contains a newline, so only the chunk is searched.
        let Some(last) = memrchr(b'\n', chunk) else {
            self.pending.extend_from_slice(chunk);
            return Vec::new();
        };

        let mut complete = std::mem::replace(&mut self.pending, chunk[last + 1..].to_vec());
        complete.extend_from_slice(&chunk[..last]);
        complete.split(|&b| b == b'\n').map(<[u8]>::to_vec).collect()
    }

    /// The incomplete trailing line.
    pub fn remainder(&self) -> &[u8] {
        &self.pending
    }

    /// End of stream: the remainder as a final newline-less line, if any.
    pub fn finish(self) -> Option<Vec<u8>> {
        if self.pending.is_empty() {
            None
        } else {
            Some(self.pending)
        }
    }
}

#[cfg(test)]
#[path = "lines_tests.rs"]
mod tests;
