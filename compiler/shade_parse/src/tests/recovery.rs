//! Inputs with several problems: what gets reported, and where parsing
//! picks up again.

use pretty_assertions::assert_eq;

use super::{parse_source, parse_source_with};
use crate::ParserOptions;

#[test]
fn test_error_ceiling() {
    let options = ParserOptions::default().with_max_errors(5);
    let result = parse_source_with("x; x; x; x; x; x; x; x;", options);
    assert!(result.has_error());
    assert_eq!(
        result.error(),
        "1:1: unexpected token\n\
         1:4: unexpected token\n\
         1:7: unexpected token\n\
         1:10: unexpected token\n\
         1:13: unexpected token\n\
         stopping after 5 errors"
    );
}

#[test]
fn test_default_error_ceiling() {
    let source = "x; ".repeat(40);
    let result = parse_source(&source);
    assert_eq!(result.diagnostics.error_count(), 26);
    let last = result.diagnostics.iter().last().map(|d| d.message.clone());
    assert_eq!(last.as_deref(), Some("stopping after 25 errors"));
}

#[test]
fn test_independent_errors_in_separate_functions() {
    let result = parse_source("fn a() { x = ; }\nfn b() { y = ; }\nfn c() {}\n");
    assert_eq!(
        result.error(),
        "1:14: unable to parse right side of assignment\n\
         2:14: unable to parse right side of assignment"
    );
    // Only the function without errors is kept.
    assert_eq!(result.program.functions().count(), 1);
    assert!(result.program.function("c").is_some());
}

#[test]
fn test_errors_in_one_body_are_all_reported() {
    let result = parse_source("fn f() {\n  a = ;\n  b = 1\n  c = ;\n}\n");
    assert_eq!(
        result.error(),
        "2:7: unable to parse right side of assignment\n\
         4:3: expected ';' for assignment statement"
    );
}

#[test]
fn test_nested_sync_points() {
    let result = parse_source(
        "
fn f() {
  x = 1;
  discard
}
struct S { blah };
",
    );
    assert_eq!(
        result.error(),
        "5:1: expected ';' for discard statement\n\
         6:17: expected ':' for struct member"
    );
}

#[test]
fn test_resync_skips_nested_brackets() {
    let result = parse_source("fn f() { x = (a + ) * (b); y = 2; }\nfn g() {}");
    assert_eq!(result.error(), "1:19: unable to parse right side of + expression");
    assert!(result.program.function("g").is_some());
}

#[test]
fn test_bad_header_still_parses_body() {
    let result = parse_source("fn (a : i32) {\n  x = ;\n}");
    assert_eq!(
        result.error(),
        "1:4: expected identifier for function declaration\n\
         2:7: unable to parse right side of assignment"
    );
}

#[test]
fn test_bad_global_does_not_hide_the_next() {
    let result = parse_source("var x : vec3<>;\nvar y : i32;\nlet z = 1;");
    assert_eq!(result.error(), "1:14: invalid type for vector");
    assert_eq!(result.program.global_variables().count(), 2);
}

#[test]
fn test_lexer_errors_recover() {
    let result = parse_source("let a = 1.0u;\nlet b = $;\nlet c = 1;");
    assert_eq!(
        result.error(),
        "1:9: float literals must not be suffixed with 'u'\n\
         2:9: unexpected token"
    );
    assert_eq!(result.program.global_variables().count(), 1);
}

#[test]
fn test_warnings_alone_are_not_errors() {
    let result = parse_source("[[block]] struct S { a : f32; };");
    assert!(!result.has_error());
    assert_eq!(result.diagnostics.warning_count(), 1);
    assert_eq!(
        result.error(),
        "1:1: use of deprecated language feature: \
         [[attribute]] style attributes have been replaced with @attribute style"
    );
}

#[test]
fn test_unterminated_bracketed_attributes() {
    let result = parse_source("[[stage(vertex) fn f() {}");
    assert_eq!(
        result.error(),
        "1:1: use of deprecated language feature: \
         [[attribute]] style attributes have been replaced with @attribute style\n\
         1:17: expected ']]' for attribute list"
    );
}

fn nested_constructors(depth: usize, closers: usize) -> String {
    format!(
        "let i : i32 = {}1.0{};",
        "f32(".repeat(depth),
        ")".repeat(closers)
    )
}

#[test]
fn test_depth_ceiling() {
    let result = parse_source(&nested_constructors(136, 200));
    assert_eq!(result.error(), "1:527: maximum parser recursive depth reached");
}

#[test]
fn test_depth_ceiling_far_past_limit() {
    let result = parse_source(&nested_constructors(5000, 5000));
    assert_eq!(result.diagnostics.error_count(), 1);
    assert_eq!(result.error(), "1:527: maximum parser recursive depth reached");
}

#[test]
fn test_depth_below_ceiling() {
    let result = parse_source(&nested_constructors(100, 100));
    assert!(!result.has_error(), "{}", result.error());
}

#[test]
fn test_configured_depth_ceiling() {
    let options = ParserOptions::default().with_max_depth(4);
    let result = parse_source_with("fn f() { x = ((((1)))); }", options);
    assert_eq!(result.error(), "1:17: maximum parser recursive depth reached");
}

#[test]
fn test_unary_nesting_counts_toward_depth() {
    let options = ParserOptions::default().with_max_depth(4);
    let result = parse_source_with("fn f() { x = - - - - 1; }", options);
    assert_eq!(result.error(), "1:18: maximum parser recursive depth reached");
}

#[test]
fn test_deep_unary_nesting_does_not_overflow() {
    let source = format!("fn f() {{ x = {}1; }}", "!".repeat(10_000));
    let result = parse_source(&source);
    assert_eq!(result.diagnostics.error_count(), 1);
}
