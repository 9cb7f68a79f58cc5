// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Pattern compilation and the `LinePredicate` seam.

use aho_corasick::{AhoCorasick, AhoCorasickBuilder};
use memchr::memmem;
use regex::{Regex, RegexBuilder};

/// Errors raised while compiling or evaluating a filter pattern.
#[derive(Debug, thiserror::Error)]
pub enum PatternError {
    /// No pattern was supplied.
    #[error("no filter pattern given")]
    Empty,

    /// The pattern failed to compile.
    #[error("invalid filter pattern {pattern:?}: {message}")]
    Invalid { pattern: String, message: String },

    /// A caller-supplied predicate failed on a line.
    #[error("filter pattern failed: {0}")]
    Evaluation(String),
}

/// A match predicate over a single line of text (without its newline).
///
/// Predicates are shared with the filter thread, so they must be
/// `Send + Sync`. Evaluation failures propagate to the pipeline's caller.
pub trait LinePredicate: Send + Sync {
    fn matches(&self, line: &str) -> Result<bool, PatternError>;
}

impl<P: LinePredicate + ?Sized> LinePredicate for &P {
    fn matches(&self, line: &str) -> Result<bool, PatternError> {
        (**self).matches(line)
    }
}

impl<P: LinePredicate + ?Sized> LinePredicate for Box<P> {
    fn matches(&self, line: &str) -> Result<bool, PatternError> {
        (**self).matches(line)
    }
}

impl LinePredicate for Regex {
    fn matches(&self, line: &str) -> Result<bool, PatternError> {
        Ok(self.is_match(line))
    }
}

/// A compiled filter pattern.
#[derive(Debug, Clone)]
pub enum CompiledPattern {
    /// Single case-sensitive literal.
    Literal(memmem::Finder<'static>),
    /// Set of literals, any of which matches.
    Literals(AhoCorasick),
    /// Regular expression.
    Regex(Regex),
}

impl CompiledPattern {
    /// Compile a single pattern, treating it as a regex only when it
    /// contains regex syntax.
    pub fn compile(pattern: &str) -> Result<Self, PatternError> {
        PatternBuilder::new([pattern]).build()
    }

    /// Compile a single pattern as a fixed string.
    pub fn literal(needle: &str) -> Result<Self, PatternError> {
        PatternBuilder::new([needle]).fixed_strings(true).build()
    }

    /// Short name of the matcher in use, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            CompiledPattern::Literal(_) => "literal",
            CompiledPattern::Literals(_) => "literals",
            CompiledPattern::Regex(_) => "regex",
        }
    }
}

impl LinePredicate for CompiledPattern {
    fn matches(&self, line: &str) -> Result<bool, PatternError> {
        let matched = match self {
            CompiledPattern::Literal(finder) => finder.find(line.as_bytes()).is_some(),
            CompiledPattern::Literals(ac) => ac.is_match(line),
            CompiledPattern::Regex(re) => re.is_match(line),
        };
        Ok(matched)
    }
}

/// Builder selecting a matcher for one or more patterns.
///
/// Several patterns match a line when any of them does.
#[derive(Debug, Clone, Default)]
pub struct PatternBuilder {
    patterns: Vec<String>,
    fixed_strings: bool,
    ignore_case: bool,
}

impl PatternBuilder {
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            patterns: patterns.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Treat every pattern as a literal string.
    pub fn fixed_strings(mut self, yes: bool) -> Self {
        self.fixed_strings = yes;
        self
    }

    pub fn ignore_case(mut self, yes: bool) -> Self {
        self.ignore_case = yes;
        self
    }

    pub fn build(self) -> Result<CompiledPattern, PatternError> {
        if self.patterns.is_empty() {
            return Err(PatternError::Empty);
        }

        let all_literal = self.fixed_strings || self.patterns.iter().all(|p| is_plain(p));

        if all_literal {
            if let [single] = self.patterns.as_slice()
                && !self.ignore_case
            {
                return Ok(CompiledPattern::Literal(
                    memmem::Finder::new(single.as_bytes()).into_owned(),
                ));
            }
            return self.build_literals();
        }

        self.build_regex()
    }

    fn build_literals(&self) -> Result<CompiledPattern, PatternError> {
        AhoCorasickBuilder::new()
            .ascii_case_insensitive(self.ignore_case)
            .build(&self.patterns)
            .map(CompiledPattern::Literals)
            .map_err(|e| PatternError::Invalid {
                pattern: self.patterns.join("|"),
                message: e.to_string(),
            })
    }

    fn build_regex(&self) -> Result<CompiledPattern, PatternError> {
        let source = if let [single] = self.patterns.as_slice() {
            single.clone()
        } else {
            self.patterns
                .iter()
                .map(|p| format!("(?:{p})"))
                .collect::<Vec<_>>()
                .join("|")
        };

        RegexBuilder::new(&source)
            .case_insensitive(self.ignore_case)
            .build()
            .map(CompiledPattern::Regex)
            .map_err(|e| PatternError::Invalid {
                pattern: source,
                message: e.to_string(),
            })
    }
}

/// True if the pattern has no regex metacharacters.
fn is_plain(pattern: &str) -> bool {
    regex::escape(pattern) == pattern
}

/// Matches lines the wrapped predicate rejects.
#[derive(Debug, Clone)]
pub struct Invert<P>(pub P);

impl<P: LinePredicate> LinePredicate for Invert<P> {
    fn matches(&self, line: &str) -> Result<bool, PatternError> {
        self.0.matches(line).map(|m| !m)
    }
}

/// Predicate backed by a closure.
#[derive(Clone)]
pub struct FnPredicate<F>(F);

/// Wrap a fallible closure as a `LinePredicate`.
pub fn from_fn<F>(f: F) -> FnPredicate<F>
where
    F: Fn(&str) -> Result<bool, PatternError> + Send + Sync,
{
    FnPredicate(f)
}

impl<F> LinePredicate for FnPredicate<F>
where
    F: Fn(&str) -> Result<bool, PatternError> + Send + Sync,
{
    fn matches(&self, line: &str) -> Result<bool, PatternError> {
        (self.0)(line)
    }
}
