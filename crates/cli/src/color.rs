// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! ANSI color names and escape sequences.
//!
//! Symbolic names take one of these forms (upper case):
//! - `FG`, e.g. `RED`
//! - `FG_ON_BG`, e.g. `RED_ON_BLUE`
//! - `ON_BG`, e.g. `ON_BLUE`
//! - `BRIGHT_FG`, e.g. `BRIGHT_RED`
//! - `BRIGHT_FG_ON_BG`, e.g. `BRIGHT_RED_ON_BLUE`
//!
//! A foreground without `BRIGHT_` sets normal intensity explicitly, so
//! `RED` resolves to `ESC[22;31m` and `BRIGHT_RED` to `ESC[1;31m`.

use std::io::IsTerminal;

use serde::Serialize;
use termcolor::{Color, ColorChoice, ColorSpec};

use crate::error::{Error, Result};

/// SGR attribute codes.
pub mod code {
    pub const RESET: u8 = 0;
    pub const BRIGHT: u8 = 1;
    pub const UNDERLINE: u8 = 4;
    pub const BLINK: u8 = 5;
    pub const NEGATIVE: u8 = 7;
    pub const NORMAL: u8 = 22;
    pub const NO_UNDERLINE: u8 = 24;
    pub const NO_BLINK: u8 = 25;
    pub const POSITIVE: u8 = 27;

    pub const FG_BASE: u8 = 30;
    pub const BG_BASE: u8 = 40;
}

pub const RESET: &str = "\x1b[0m";
pub const BRIGHT: &str = "\x1b[1m";
pub const UNDERLINE: &str = "\x1b[4m";
pub const BLINK: &str = "\x1b[5m";
pub const NEGATIVE: &str = "\x1b[7m";
pub const NORMAL: &str = "\x1b[22m";
pub const NO_UNDERLINE: &str = "\x1b[24m";
pub const NO_BLINK: &str = "\x1b[25m";
pub const POSITIVE: &str = "\x1b[27m";

/// Color names in SGR index order.
pub const COLORS: [&str; 8] = [
    "BLACK", "RED", "GREEN", "YELLOW", "BLUE", "MAGENTA", "CYAN", "WHITE",
];

/// A parsed symbolic color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    /// `Some(true)` for BRIGHT, `Some(false)` for normal, `None` when no
    /// foreground is set.
    pub bright: Option<bool>,
    pub fg: Option<u8>,
    pub bg: Option<u8>,
}

impl Style {
    /// Parse a symbolic name. Returns `None` for anything unrecognized.
    pub fn parse(name: &str) -> Option<Style> {
        if let Some(bg) = name.strip_prefix("ON_") {
            return Some(Style {
                bg: Some(color_index(bg)?),
                ..Style::default()
            });
        }

        let (bright, rest) = match name.strip_prefix("BRIGHT_") {
            Some(rest) => (true, rest),
            None => (false, name),
        };
        let (fg, bg) = match rest.split_once("_ON_") {
            Some((fg, bg)) => (fg, Some(color_index(bg)?)),
            None => (rest, None),
        };

        Some(Style {
            bright: Some(bright),
            fg: Some(color_index(fg)?),
            bg,
        })
    }

    /// SGR codes in emission order: intensity, foreground, background.
    pub fn codes(&self) -> Vec<u8> {
        let mut codes = Vec::with_capacity(3);
        if let Some(bright) = self.bright {
            codes.push(if bright { code::BRIGHT } else { code::NORMAL });
        }
        if let Some(fg) = self.fg {
            codes.push(code::FG_BASE + fg);
        }
        if let Some(bg) = self.bg {
            codes.push(code::BG_BASE + bg);
        }
        codes
    }

    pub fn escape(&self) -> String {
        let codes: Vec<String> = self.codes().iter().map(u8::to_string).collect();
        format!("\x1b[{}m", codes.join(";"))
    }
}

fn color_index(name: &str) -> Option<u8> {
    COLORS.iter().position(|&c| c == name).map(|i| i as u8)
}

/// Resolve a symbolic color name to its escape sequence.
pub fn resolve(name: &str) -> Option<String> {
    Style::parse(name).map(|style| style.escape())
}

/// True if `seq` is a complete SGR escape sequence (`ESC[` digits/`;` `m`).
pub fn is_valid_escape(seq: &str) -> bool {
    seq.strip_prefix("\x1b[")
        .and_then(|rest| rest.strip_suffix('m'))
        .is_some_and(|params| params.bytes().all(|b| b.is_ascii_digit() || b == b';'))
}

/// Accept either an escape sequence or a symbolic name (any case).
pub fn parse_color(arg: &str) -> Result<String> {
    if is_valid_escape(arg) {
        return Ok(arg.to_string());
    }
    resolve(&arg.to_ascii_uppercase()).ok_or_else(|| Error::InvalidColor(arg.to_string()))
}

/// Render an escape sequence printable, e.g. `\e[1;31m`.
pub fn escape_for_display(seq: &str) -> String {
    seq.replace('\x1b', "\\e")
}

/// A resolved color, as reported by `hush color`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedColor {
    pub name: String,
    pub sequence: String,
    pub codes: Vec<u8>,
}

impl ResolvedColor {
    pub fn lookup(name: &str) -> Result<Self> {
        let upper = name.to_ascii_uppercase();
        let style = Style::parse(&upper).ok_or_else(|| Error::InvalidColor(name.to_string()))?;
        Ok(Self {
            name: upper,
            sequence: style.escape(),
            codes: style.codes(),
        })
    }
}

/// When to color CLI output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

/// Decide whether to color stdout, honoring `NO_COLOR`.
pub fn resolve_color(mode: ColorMode, no_color: bool) -> ColorChoice {
    let env_no_color = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
    resolve_color_with(mode, no_color || env_no_color, std::io::stdout().is_terminal())
}

fn resolve_color_with(mode: ColorMode, no_color: bool, is_tty: bool) -> ColorChoice {
    if no_color {
        return ColorChoice::Never;
    }
    match mode {
        ColorMode::Always => ColorChoice::Always,
        ColorMode::Never => ColorChoice::Never,
        ColorMode::Auto if is_tty => ColorChoice::Auto,
        ColorMode::Auto => ColorChoice::Never,
    }
}

/// CLI color scheme.
pub mod scheme {
    use super::*;

    /// Color names in listings.
    pub fn name() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_bold(true);
        spec
    }

    /// "valid" verdicts.
    pub fn valid() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Green)).set_bold(true);
        spec
    }

    /// "invalid" verdicts.
    pub fn invalid() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Red)).set_bold(true);
        spec
    }
}

#[cfg(test)]
#[path = "color_tests.rs"]
mod tests;
