// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! CLI argument parsing with clap derive.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::color::ColorMode;

/// Show only the interesting lines of a noisy program's output
#[derive(Parser)]
#[command(name = "hush")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Use specific config file
    #[arg(short = 'C', long = "config", global = true, env = "HUSH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print only the lines matching a pattern, as they arrive
    Grep(GrepArgs),
    /// Resolve a color name to its escape sequence
    Color(ColorArgs),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(clap::Args)]
pub struct GrepArgs {
    /// Patterns to match; a line is shown if any pattern matches
    #[arg(value_name = "PATTERN", required = true)]
    pub patterns: Vec<String>,

    /// Read from FILE instead of stdin (repeatable)
    #[arg(short = 'f', long = "file", value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Treat patterns as literal strings
    #[arg(short = 'F', long)]
    pub fixed_strings: bool,

    /// Match case-insensitively
    #[arg(short, long)]
    pub ignore_case: bool,

    /// Show the lines that do not match
    #[arg(long)]
    pub invert_match: bool,

    /// Color matched lines (name like BRIGHT_GREEN, or an escape sequence)
    #[arg(long, value_name = "COLOR")]
    pub highlight: Option<String>,

    /// Color output mode
    #[arg(long, default_value = "auto", value_name = "WHEN")]
    pub color: ColorMode,

    /// Disable color output (shorthand for --color=never)
    #[arg(long)]
    pub no_color: bool,

    /// Bytes read from the pipe at a time
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    pub chunk_size: Option<u32>,
}

#[derive(clap::Args)]
pub struct ColorArgs {
    /// Color name (e.g. BRIGHT_RED_ON_BLUE), or an escape sequence with --validate
    #[arg(value_name = "NAME", required_unless_present = "list")]
    pub name: Option<String>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub output: OutputFormat,

    /// Check that NAME is a well-formed escape sequence
    #[arg(long, conflicts_with = "list")]
    pub validate: bool,

    /// List every foreground color
    #[arg(long)]
    pub list: bool,

    /// Color output mode
    #[arg(long, default_value = "auto", value_name = "WHEN")]
    pub color: ColorMode,

    /// Disable color output (shorthand for --color=never)
    #[arg(long)]
    pub no_color: bool,
}

#[derive(clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

#[derive(Clone, Copy, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
