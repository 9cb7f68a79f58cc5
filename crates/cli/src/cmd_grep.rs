// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `hush grep` command implementation.
//!
//! Copies the inputs to the process's real stdout while a filter pipeline
//! spliced onto file descriptor 1 lets only matching lines through.

use std::fs::File;
use std::io::{self, Read, Write};

use anyhow::Context;
use termcolor::ColorChoice;

use hush::cli::GrepArgs;
use hush::color;
use hush::config::Config;
use hush::error::ExitCode;
use hush::pattern::{Invert, LinePredicate, PatternBuilder};
use hush::splice::StdoutSplice;
use hush::FilterPipeline;

/// Run the `hush grep` command.
pub fn run(args: &GrepArgs, config: &Config) -> anyhow::Result<ExitCode> {
    let pattern = PatternBuilder::new(&args.patterns)
        .fixed_strings(args.fixed_strings)
        .ignore_case(args.ignore_case || config.grep.ignore_case)
        .build()?;
    let inverted;
    let predicate: &dyn LinePredicate = if args.invert_match {
        inverted = Invert(pattern);
        &inverted
    } else {
        &pattern
    };

    let mut options = config.grep.filter_options()?;
    if let Some(n) = args.chunk_size {
        options.chunk_size = n as usize;
    }
    if let Some(highlight) = &args.highlight {
        options.highlight = Some(color::parse_color(highlight)?);
    }
    if color::resolve_color(args.color, args.no_color) == ColorChoice::Never {
        options.highlight = None;
    }

    // Open everything up front so a missing file fails before stdout is spliced.
    let mut inputs: Vec<Box<dyn Read + Send>> = Vec::new();
    for path in &args.files {
        let file = File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
        inputs.push(Box::new(file));
    }
    if inputs.is_empty() {
        inputs.push(Box::new(io::stdin()));
    }

    let outcome = FilterPipeline::new(predicate)
        .splice(StdoutSplice)
        .options(options)
        .run(move || copy_to_stdout(inputs))?;

    match outcome.value {
        Some(copied) => {
            let copied = copied.context("failed to copy input")?;
            tracing::debug!("copied {} bytes", copied);
        }
        None => anyhow::bail!("input copy did not complete"),
    }

    Ok(if outcome.stats.matched > 0 {
        ExitCode::Success
    } else {
        ExitCode::NoMatch
    })
}

fn copy_to_stdout(inputs: Vec<Box<dyn Read + Send>>) -> io::Result<u64> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut total = 0;
    for mut input in inputs {
        total += io::copy(&mut input, &mut out)?;
    }
    out.flush()?;
    Ok(total)
}
