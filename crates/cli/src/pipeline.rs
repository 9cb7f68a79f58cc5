// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Live output filtering (`grep_stdout`).
//!
//! Runs a block with its output redirected into a pipe and forwards only
//! the matching lines to the caller's output as they are produced:
//!
//! ```text
//!   hush-producer                        hush-filter
//!   ambient out -> PipeWriter ==pipe==> PipeReader -> LineBuffer -> pattern -> original out
//! ```
//!
//! The two threads own the two pipe ends outright; the orchestrating thread
//! keeps neither, so the filter sees end of stream as soon as the producer
//! restores its output. The orchestrator joins both before returning.

use std::panic;
use std::thread;

use crossbeam_channel::bounded;

use crate::color;
use crate::error::{Error, Result};
use crate::filter::{self, FilterOptions, FilterStats};
use crate::pattern::{CompiledPattern, LinePredicate};
use crate::splice::{self, ConsoleSplice, Splice, SpliceGuard};
use crate::sql::Reconnect;
use crate::suppress::SuppressedLog;

/// Result of a pipeline run.
#[derive(Debug)]
pub struct FilterOutcome<T> {
    /// The block's return value, if the producer delivered one.
    pub value: Option<T>,
    pub stats: FilterStats,
    /// Failure of the post-run reconnect hook. Never fails the run itself.
    pub reconnect_error: Option<anyhow::Error>,
}

/// Configures and runs one filtered block.
pub struct FilterPipeline<'a, S = ConsoleSplice> {
    pattern: &'a dyn LinePredicate,
    splice: S,
    options: FilterOptions,
    log: SuppressedLog,
    reconnect: Option<&'a mut dyn Reconnect>,
}

impl<'a> FilterPipeline<'a, ConsoleSplice> {
    /// Filter the block's console output (see [`crate::console`]).
    pub fn new(pattern: &'a dyn LinePredicate) -> Self {
        Self {
            pattern,
            splice: ConsoleSplice,
            options: FilterOptions::default(),
            log: SuppressedLog::global().clone(),
            reconnect: None,
        }
    }
}

impl<'a, S: Splice> FilterPipeline<'a, S> {
    /// Choose which output stream is redirected.
    pub fn splice<T: Splice>(self, splice: T) -> FilterPipeline<'a, T> {
        FilterPipeline {
            pattern: self.pattern,
            splice,
            options: self.options,
            log: self.log,
            reconnect: self.reconnect,
        }
    }

    pub fn options(mut self, options: FilterOptions) -> Self {
        self.options = options;
        self
    }

    pub fn chunk_size(mut self, bytes: usize) -> Self {
        self.options.chunk_size = bytes;
        self
    }

    /// Wrap forwarded lines in an escape sequence. Validated by `run`.
    pub fn highlight(mut self, seq: impl Into<String>) -> Self {
        self.options.highlight = Some(seq.into());
        self
    }

    /// Log receiving reconnect chatter; the process-wide log by default.
    pub fn suppressed_log(mut self, log: SuppressedLog) -> Self {
        self.log = log;
        self
    }

    /// Connection to re-establish once output is restored.
    pub fn reconnect(mut self, hook: &'a mut dyn Reconnect) -> Self {
        self.reconnect = Some(hook);
        self
    }

    /// Run `block` with its output filtered, blocking until both threads end.
    ///
    /// A panic in `block` is resumed on the calling thread after the
    /// output stream has been restored and the filter has drained.
    pub fn run<T, F>(self, block: F) -> Result<FilterOutcome<T>>
    where
        F: FnOnce() -> T + Send,
        T: Send,
    {
        let FilterPipeline {
            pattern,
            splice,
            options,
            log,
            reconnect,
        } = self;

        if let Some(seq) = &options.highlight
            && !color::is_valid_escape(seq)
        {
            return Err(Error::InvalidColor(seq.clone()));
        }

        // Everything that can fail is acquired before output is touched.
        let claim = splice.claim()?;
        let original = splice.original()?;
        let (reader, writer) = splice::pipe()?;
        let (result_tx, result_rx) = bounded::<T>(1);
        let splice = &splice;
        let options = &options;

        let (produced, filtered) = thread::scope(|scope| {
            let filter = thread::Builder::new()
                .name("hush-filter".to_string())
                .spawn_scoped(scope, move || {
                    let mut sink = original;
                    filter::run(reader, pattern, &mut sink, options)
                })
                .map_err(|source| Error::Spawn {
                    thread: "filter",
                    source,
                })?;

            let producer = thread::Builder::new()
                .name("hush-producer".to_string())
                .spawn_scoped(scope, move || -> Result<()> {
                    let redirection = splice.redirect(writer, claim)?;
                    let value = block();
                    redirection.restore()?;
                    // The slot is empty and the receiver outlives this scope.
                    let _ = result_tx.send(value);
                    Ok(())
                });

            let producer = match producer {
                Ok(handle) => handle,
                Err(source) => {
                    // The unspawned closure took the write end with it.
                    let _ = filter.join();
                    return Err(Error::Spawn {
                        thread: "producer",
                        source,
                    });
                }
            };

            tracing::debug!("filter pipeline started");
            Ok((producer.join(), filter.join()))
        })?;

        let stats = match filtered {
            Ok(Ok(stats)) => stats,
            Ok(Err(e)) => {
                if produced.is_err() {
                    tracing::warn!("producer panicked after the filter failed");
                }
                return Err(e);
            }
            Err(payload) => panic::resume_unwind(payload),
        };
        match produced {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(e),
            Err(payload) => panic::resume_unwind(payload),
        }

        tracing::debug!(
            "filter pipeline finished: {} lines, {} matched, {} bytes",
            stats.lines,
            stats.matched,
            stats.bytes
        );

        // Reconnect chatter is hidden at the same level the block's output was.
        let reconnect_error = reconnect
            .and_then(|hook| match splice.suppress(&log, || hook.reconnect()) {
                Ok(reconnected) => reconnected.err(),
                Err(e) => Some(anyhow::Error::new(e)),
            })
            .inspect(|e| tracing::warn!("reconnect after filtering failed: {:#}", e));

        Ok(FilterOutcome {
            value: result_rx.try_recv().ok(),
            stats,
            reconnect_error,
        })
    }
}

/// Run `block`, printing only the lines of its console output that match
/// `pattern`. Returns the block's value.
pub fn filter_output<T, F>(pattern: &dyn LinePredicate, block: F) -> Result<Option<T>>
where
    F: FnOnce() -> T + Send,
    T: Send,
{
    FilterPipeline::new(pattern)
        .run(block)
        .map(|outcome| outcome.value)
}

/// [`filter_output`] with a pattern string, compiled before anything runs.
pub fn grep_stdout<T, F>(pattern: &str, block: F) -> Result<Option<T>>
where
    F: FnOnce() -> T + Send,
    T: Send,
{
    let pattern = CompiledPattern::compile(pattern)?;
    filter_output(&pattern, block)
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
