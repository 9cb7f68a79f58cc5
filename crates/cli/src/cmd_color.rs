// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `hush color` command implementation.

use std::io::Write;

use termcolor::{StandardStream, WriteColor};

use hush::cli::{ColorArgs, OutputFormat};
use hush::color::{self, COLORS, ResolvedColor, scheme};
use hush::error::ExitCode;

/// Run the `hush color` command.
pub fn run(args: &ColorArgs) -> anyhow::Result<ExitCode> {
    let mut stdout = StandardStream::stdout(color::resolve_color(args.color, args.no_color));

    if args.list {
        return list(&mut stdout, args.output);
    }
    let Some(name) = args.name.as_deref() else {
        anyhow::bail!("a color name is required");
    };
    if args.validate {
        return validate(&mut stdout, name, args.output);
    }

    let resolved = ResolvedColor::lookup(name)?;
    match args.output {
        OutputFormat::Text => {
            writeln!(stdout, "{}", color::escape_for_display(&resolved.sequence))?;
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut stdout, &resolved)?;
            writeln!(stdout)?;
        }
    }
    Ok(ExitCode::Success)
}

fn validate(stdout: &mut StandardStream, seq: &str, format: OutputFormat) -> anyhow::Result<ExitCode> {
    let valid = color::is_valid_escape(seq);
    match format {
        OutputFormat::Text => {
            let (spec, verdict) = if valid {
                (scheme::valid(), "valid")
            } else {
                (scheme::invalid(), "invalid")
            };
            stdout.set_color(&spec)?;
            write!(stdout, "{verdict}")?;
            stdout.reset()?;
            writeln!(stdout, ": {}", color::escape_for_display(seq))?;
        }
        OutputFormat::Json => {
            let report = serde_json::json!({ "sequence": seq, "valid": valid });
            serde_json::to_writer_pretty(&mut *stdout, &report)?;
            writeln!(stdout)?;
        }
    }
    Ok(if valid { ExitCode::Success } else { ExitCode::Error })
}

fn list(stdout: &mut StandardStream, format: OutputFormat) -> anyhow::Result<ExitCode> {
    let colors = COLORS
        .iter()
        .flat_map(|c| [c.to_string(), format!("BRIGHT_{c}")])
        .map(|name| ResolvedColor::lookup(&name))
        .collect::<Result<Vec<_>, _>>()?;

    match format {
        OutputFormat::Text => {
            for resolved in &colors {
                stdout.set_color(&scheme::name())?;
                write!(stdout, "{:<16}", resolved.name)?;
                stdout.reset()?;
                writeln!(stdout, "{}", color::escape_for_display(&resolved.sequence))?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *stdout, &colors)?;
            writeln!(stdout)?;
        }
    }
    Ok(ExitCode::Success)
}
