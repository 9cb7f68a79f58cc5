// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use yare::parameterized;

use super::*;

fn hit(p: &CompiledPattern, line: &str) -> bool {
    p.matches(line).unwrap()
}

// =============================================================================
// MATCHER SELECTION
// =============================================================================

#[parameterized(
    plain_word = { &["value"], false, false, "literal" },
    plain_with_spaces = { &["value of"], false, false, "literal" },
    regex_syntax = { &["val.e"], false, false, "regex" },
    anchored = { &["^The"], false, false, "regex" },
    fixed_with_metachars = { &["a.b"], true, false, "literal" },
    ignore_case_literal = { &["value"], false, true, "literals" },
    several_literals = { &["foo", "bar"], false, false, "literals" },
    several_mixed = { &["foo", "ba+r"], false, false, "regex" },
)]
fn builder_picks_cheapest_matcher(
    patterns: &[&str],
    fixed: bool,
    ignore_case: bool,
    expected: &str,
) {
    let pattern = PatternBuilder::new(patterns.iter().copied())
        .fixed_strings(fixed)
        .ignore_case(ignore_case)
        .build()
        .unwrap();
    assert_eq!(pattern.kind(), expected);
}

#[test]
fn no_patterns_is_an_error() {
    let err = PatternBuilder::new(Vec::<String>::new()).build().unwrap_err();
    assert!(matches!(err, PatternError::Empty));
}

#[test]
fn invalid_regex_reports_pattern() {
    let err = CompiledPattern::compile("(unclosed").unwrap_err();
    match err {
        PatternError::Invalid { pattern, .. } => assert_eq!(pattern, "(unclosed"),
        other => panic!("unexpected error: {other:?}"),
    }
}

// =============================================================================
// MATCHING
// =============================================================================

#[test]
fn literal_matches_substring() {
    let p = CompiledPattern::compile("value").unwrap();
    assert!(hit(&p, "The value of x is y"));
    assert!(!hit(&p, "Some debugging output here"));
}

#[test]
fn fixed_string_does_not_interpret_dot() {
    let p = CompiledPattern::literal("a.b").unwrap();
    assert!(hit(&p, "xa.bx"));
    assert!(!hit(&p, "axb"));
}

#[test]
fn regex_anchors_apply_per_line() {
    let p = CompiledPattern::compile("^The").unwrap();
    assert!(hit(&p, "The value"));
    assert!(!hit(&p, "  The value"));
}

#[test]
fn ignore_case_applies_to_literals() {
    let p = PatternBuilder::new(["VALUE"]).ignore_case(true).build().unwrap();
    assert!(hit(&p, "the value"));
}

#[test]
fn ignore_case_applies_to_regex() {
    let p = PatternBuilder::new(["va.ue"]).ignore_case(true).build().unwrap();
    assert!(hit(&p, "THE VALUE"));
}

#[test]
fn any_of_several_patterns_matches() {
    let p = PatternBuilder::new(["foo", "ba+r"]).build().unwrap();
    assert!(hit(&p, "a foo"));
    assert!(hit(&p, "baaar"));
    assert!(!hit(&p, "br"));
}

#[test]
fn fixed_strings_with_ignore_case_use_literal_set() {
    let p = PatternBuilder::new(["a.b", "c+d"])
        .fixed_strings(true)
        .ignore_case(true)
        .build()
        .unwrap();
    assert!(hit(&p, "A.B"));
    assert!(hit(&p, "c+d"));
    assert!(!hit(&p, "axb"));
}

#[test]
fn empty_literal_matches_every_line() {
    let p = CompiledPattern::literal("").unwrap();
    assert!(hit(&p, ""));
    assert!(hit(&p, "anything"));
}

// =============================================================================
// PREDICATE ADAPTERS
// =============================================================================

#[test]
fn invert_flips_result() {
    let p = Invert(CompiledPattern::compile("value").unwrap());
    assert!(!p.matches("value").unwrap());
    assert!(p.matches("other").unwrap());
}

#[test]
fn closure_errors_propagate() {
    let p = from_fn(|line: &str| {
        if line.is_empty() {
            Err(PatternError::Evaluation("empty line".to_string()))
        } else {
            Ok(true)
        }
    });
    assert!(p.matches("x").unwrap());
    assert!(matches!(p.matches(""), Err(PatternError::Evaluation(_))));
}

#[test]
fn plain_regex_is_a_predicate() {
    let re = regex::Regex::new(r"\d+").unwrap();
    assert!(LinePredicate::matches(&re, "x = 42").unwrap());
    assert!(!LinePredicate::matches(&re, "x = y").unwrap());
}
