use pretty_assertions::assert_eq;
use shade_ir::{Location, Range, Source, SourceFile};

use super::json::quoted;
use super::*;
use crate::{Formatter, Severity, Style};

fn at(line: u32, begin: u32, end: u32) -> Source {
    Source::new(
        Range::new(Location::new(line, begin), Location::new(line, end)),
        Some(SourceFile::shared("test.wgsl", "var x : i32\nlet y = ;")),
    )
}

#[test]
fn test_json_quoting() {
    assert_eq!(quoted("plain"), "\"plain\"");
    assert_eq!(quoted("a \"q\" b"), "\"a \\\"q\\\" b\"");
    assert_eq!(quoted("back\\slash"), "\"back\\\\slash\"");
    assert_eq!(quoted("line\nbreak\ttab"), "\"line\\nbreak\\ttab\"");
    assert_eq!(quoted("\u{1}"), "\"\\u0001\"");
}

#[test]
fn test_color_mode() {
    assert!(ColorMode::Auto.should_use_colors(true));
    assert!(!ColorMode::Auto.should_use_colors(false));
    assert!(ColorMode::Always.should_use_colors(false));
    assert!(!ColorMode::Never.should_use_colors(true));
    assert_eq!(ColorMode::from_name("always"), Some(ColorMode::Always));
    assert_eq!(ColorMode::from_name("sometimes"), None);
}

#[test]
fn test_terminal_plain_matches_formatter() {
    let diags = vec![
        Diagnostic::error(at(1, 12, 12), "expected ';' for variable declaration"),
        Diagnostic::error(at(2, 9, 10), "missing constructor for let declaration"),
    ];
    let mut emitter = TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Never, false);
    for diag in &diags {
        emitter.emit(diag);
    }
    let out = String::from_utf8(emitter.into_inner()).unwrap();

    let style = Style::PRINT_FILE | Style::PRINT_SEVERITY | Style::PRINT_LINE;
    let expected = Formatter::new(style).format(&diags);
    assert_eq!(out, expected);
}

#[test]
fn test_terminal_without_lines_ends_each_message() {
    let diags = vec![
        Diagnostic::warning(at(1, 1, 4), "use 'let' instead of 'const'"),
        Diagnostic::error(Source::default(), "no location"),
    ];
    let mut emitter = TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Never, false)
        .with_formatter(Formatter::new(Style::PRINT_SEVERITY));
    for diag in &diags {
        emitter.emit(diag);
    }
    let out = String::from_utf8(emitter.into_inner()).unwrap();
    assert_eq!(
        out,
        "1:1 warning: use 'let' instead of 'const'\nerror: no location\n"
    );
}

#[test]
fn test_terminal_colors() {
    let diag = Diagnostic::error(at(2, 9, 10), "boom");
    let mut emitter = TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Always, false);
    emitter.emit(&diag);
    let out = String::from_utf8(emitter.into_inner()).unwrap();
    assert!(out.contains("\x1b[1m\x1b[31merror"));
    assert!(out.contains("\x1b[36m^"));
    assert!(out.ends_with('\n'));
}

#[test]
fn test_terminal_summary() {
    let mut emitter = TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Never, false);
    emitter.emit_summary(1, 0);
    emitter.emit_summary(3, 2);
    emitter.emit_summary(0, 1);
    emitter.emit_summary(0, 0);
    let out = String::from_utf8(emitter.into_inner()).unwrap();
    assert_eq!(
        out,
        "error: aborting due to previous error\n\
         error: aborting due to 3 previous errors; 2 warnings emitted\n\
         warning: 1 warning emitted\n"
    );
}

#[test]
fn test_json_emitter() {
    let mut emitter = JsonEmitter::new(Vec::new());
    emitter.begin();
    emitter.emit(&Diagnostic::error(at(2, 9, 10), "say \"hi\""));
    emitter.emit(&Diagnostic::new(Severity::Warning, Source::default(), "bare"));
    emitter.end();
    let out = String::from_utf8(emitter.into_inner()).unwrap();
    let expected = r#"[
  {
    "severity": "error",
    "message": "say \"hi\"",
    "file": "test.wgsl",
    "range": { "begin": { "line": 2, "column": 9 }, "end": { "line": 2, "column": 10 } }
  },
  {
    "severity": "warning",
    "message": "bare"
  }
]
"#;
    assert_eq!(out, expected);
}

#[test]
fn test_json_empty_array() {
    let mut emitter = JsonEmitter::new(Vec::new());
    emitter.begin();
    emitter.end();
    let out = String::from_utf8(emitter.into_inner()).unwrap();
    assert_eq!(out, "[\n]\n");
}
