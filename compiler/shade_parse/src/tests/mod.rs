//! Parser tests.
//!
//! - `errors`: one malformed construct per test, checked against the exact
//!   diagnostic text and position
//! - `recovery`: several errors per input, resynchronization, and the error
//!   and depth ceilings
//! - `grammar`: the shape of the AST for well-formed input
//! - `properties`: generated input

mod recovery;

use std::sync::Arc;

use pretty_assertions::assert_eq;
use shade_ir::{ExprId, SourceFile};

use crate::{parse, parse_with_options, ParseResult, Parser, ParserOptions};

fn file(source: &str) -> Arc<SourceFile> {
    SourceFile::shared("test.wgsl", source)
}

pub(super) fn parse_source(source: &str) -> ParseResult {
    parse(&file(source))
}

pub(super) fn parse_source_with(source: &str, options: ParserOptions) -> ParseResult {
    parse_with_options(&file(source), options)
}

/// Parse `source` and require it to be free of diagnostics.
#[track_caller]
pub(super) fn parse_ok(source: &str) -> ParseResult {
    let result = parse_source(source);
    assert_eq!(result.error(), "", "unexpected diagnostics for {source:?}");
    result
}

/// Parse `source` and require exactly `expected` as the formatted diagnostics.
#[track_caller]
pub(super) fn expect_error(source: &str, expected: &str) {
    let result = parse_source(source);
    assert!(result.has_error(), "no error for {source:?}");
    assert_eq!(result.error(), expected);
}

/// Parse `source` as a lone expression.
pub(super) fn parse_expression(source: &str) -> (Option<ExprId>, ParseResult) {
    let file = file(source);
    let mut parser = Parser::new(&file, ParserOptions::default());
    let expr = parser.logical_or_expression().matched();
    (expr, parser.finish())
}
