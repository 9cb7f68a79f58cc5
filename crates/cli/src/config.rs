// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `hush.toml` configuration.
//!
//! ```toml
//! [grep]
//! chunk_size = 4096
//! ignore_case = false
//! highlight = "BRIGHT_GREEN"
//!
//! [sql]
//! echo_color = "CYAN"
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::color;
use crate::error::{Error, Result};
use crate::filter::{DEFAULT_CHUNK_SIZE, FilterOptions};
use crate::sql::EchoOptions;

/// Name of the config file looked up by [`crate::discovery::find_config`].
pub const FILE_NAME: &str = "hush.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub grep: GrepConfig,

    #[serde(default)]
    pub sql: SqlConfig,
}

/// Settings for `hush grep` and [`crate::FilterPipeline`].
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GrepConfig {
    /// Bytes requested per read from the pipe (default: 4096).
    #[serde(default = "GrepConfig::default_chunk_size")]
    pub chunk_size: usize,

    #[serde(default)]
    pub ignore_case: bool,

    /// Color name or raw escape sequence wrapped around matched lines.
    #[serde(default)]
    pub highlight: Option<String>,
}

impl Default for GrepConfig {
    fn default() -> Self {
        Self {
            chunk_size: Self::default_chunk_size(),
            ignore_case: false,
            highlight: None,
        }
    }
}

impl GrepConfig {
    pub(crate) fn default_chunk_size() -> usize {
        DEFAULT_CHUNK_SIZE
    }

    /// Filter options with the highlight resolved to an escape sequence.
    pub fn filter_options(&self) -> Result<FilterOptions> {
        let highlight = self.highlight.as_deref().map(color::parse_color).transpose()?;
        Ok(FilterOptions {
            chunk_size: self.chunk_size,
            highlight,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SqlConfig {
    /// Color of echoed statements (default: cyan).
    #[serde(default)]
    pub echo_color: Option<String>,
}

impl SqlConfig {
    pub fn echo_options(&self) -> EchoOptions {
        EchoOptions {
            color: self.echo_color.clone(),
        }
    }
}

impl Config {
    /// Parse config text. `origin` names the source in error messages.
    pub fn parse(text: &str, origin: &Path) -> Result<Self> {
        let config: Config = toml::from_str(text).map_err(|e| config_error(origin, e.message()))?;
        config.validate(origin)?;
        Ok(config)
    }

    /// Read and parse the config file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| config_error(path, e))?;
        let config = Self::parse(&text, path)?;
        tracing::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    fn validate(&self, origin: &Path) -> Result<()> {
        if self.grep.chunk_size == 0 {
            return Err(config_error(origin, "grep.chunk_size must be greater than 0"));
        }
        for (key, value) in [
            ("grep.highlight", &self.grep.highlight),
            ("sql.echo_color", &self.sql.echo_color),
        ] {
            if let Some(value) = value
                && color::parse_color(value).is_err()
            {
                return Err(config_error(origin, format!("{key}: unknown color {value:?}")));
            }
        }
        Ok(())
    }
}

fn config_error(path: &Path, message: impl ToString) -> Error {
    Error::Config {
        path: path.display().to_string(),
        message: message.to_string(),
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
