// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::Path;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use hush::cli::{Cli, Command, CompletionsArgs};
use hush::config::Config;
use hush::discovery;
use hush::error::ExitCode;

mod cmd_color;
mod cmd_grep;

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(code) => code.into(),
        Err(e) => {
            eprintln!("hush: {e:#}");
            ExitCode::Error.into()
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<ExitCode> {
    match &cli.command {
        Command::Grep(args) => {
            let config = load_config(cli.config.as_deref())?;
            cmd_grep::run(args, &config)
        }
        Command::Color(args) => cmd_color::run(args),
        Command::Completions(args) => {
            completions(args);
            Ok(ExitCode::Success)
        }
    }
}

/// Logs go to stderr so they never mix with filtered stdout.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("HUSH_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(explicit: Option<&Path>) -> anyhow::Result<Config> {
    if let Some(path) = explicit {
        return Ok(Config::load(path)?);
    }
    let cwd = std::env::current_dir()?;
    match discovery::find_config(&cwd) {
        Some(path) => Ok(Config::load(&path)?),
        None => Ok(Config::default()),
    }
}

fn completions(args: &CompletionsArgs) {
    let mut cmd = Cli::command();
    clap_complete::generate(args.shell, &mut cmd, "hush", &mut std::io::stdout());
}
