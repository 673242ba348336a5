use std::sync::Arc;

use super::*;
use pretty_assertions::assert_eq;
use shade_ir::Source;

fn file() -> Arc<SourceFile> {
    SourceFile::shared(
        "file.name",
        "the  cat says meow\nthe dog says woof\nthe snake says quack\nthe snail says ???",
    )
}

fn range(line: u32, begin: u32, end_line: u32, end: u32) -> Range {
    Range::new(Location::new(line, begin), Location::new(end_line, end))
}

fn diag(severity: Severity, range: Range, message: &str) -> Diagnostic {
    Diagnostic::new(severity, Source::new(range, Some(file())), message)
}

fn sample() -> Vec<Diagnostic> {
    vec![
        diag(Severity::Note, range(1, 14, 1, 18), "purr"),
        diag(Severity::Warning, range(2, 14, 2, 18), "grrr"),
        diag(Severity::Error, range(3, 16, 3, 21), "hiss"),
        diag(Severity::Fatal, range(4, 16, 4, 19), "nothing"),
    ]
}

#[test]
fn test_simple() {
    let out = Formatter::plain().format(&sample());
    assert_eq!(out, "1:14: purr\n2:14: grrr\n3:16: hiss\n4:16: nothing");
}

#[test]
fn test_with_file() {
    let out = Formatter::new(Style::PRINT_FILE).format(&sample());
    assert_eq!(
        out,
        "file.name:1:14: purr\nfile.name:2:14: grrr\nfile.name:3:16: hiss\nfile.name:4:16: nothing"
    );
}

#[test]
fn test_with_severity() {
    let out = Formatter::new(Style::PRINT_SEVERITY).format(&sample());
    assert_eq!(
        out,
        "1:14 note: purr\n2:14 warning: grrr\n3:16 error: hiss\n4:16 fatal: nothing"
    );
}

#[test]
fn test_with_line() {
    let out = Formatter::new(Style::PRINT_LINE).format(&sample());
    let expected = "1:14: purr
the  cat says meow
             ^^^^

2:14: grrr
the dog says woof
             ^^^^

3:16: hiss
the snake says quack
               ^^^^^

4:16: nothing
the snail says ???
               ^^^
";
    assert_eq!(out, expected);
}

#[test]
fn test_everything() {
    let out = Formatter::default().format(&sample()[2..3]);
    let expected = "file.name:3:16 error: hiss
the snake says quack
               ^^^^^

";
    assert_eq!(out, expected);
}

#[test]
fn test_empty_range_prints_file_only() {
    let d = Diagnostic::error(Source::whole_file(file()), "stopping after 5 errors");
    let style = Style::PRINT_FILE | Style::PRINT_SEVERITY | Style::PRINT_LINE;
    assert_eq!(
        Formatter::new(style).format([&d]),
        "file.name error: stopping after 5 errors"
    );
    assert_eq!(Formatter::plain().format([&d]), "stopping after 5 errors");
}

#[test]
fn test_zero_width_range_gets_one_caret() {
    let d = diag(Severity::Error, range(1, 5, 1, 5), "here");
    let out = Formatter::new(Style::PRINT_LINE).format([&d]);
    assert_eq!(out, "1:5: here\nthe  cat says meow\n    ^\n");
}

#[test]
fn test_multi_line() {
    let d = diag(Severity::Warning, range(2, 9, 4, 15), "multiline");
    let out = Formatter::new(Style::PRINT_LINE).format([&d]);
    let expected = "2:9: multiline
the dog says woof
        ^^^^^^^^^
the snake says quack
^^^^^^^^^^^^^^^^^^^^
the snail says ???
^^^^^^^^^^^^^^
";
    assert_eq!(out, expected);
}

#[test]
fn test_tabs_expand() {
    let tabbed = SourceFile::shared("t.wgsl", "\tx = 1;");
    let d = Diagnostic::error(
        Source::new(range(1, 2, 1, 3), Some(tabbed)),
        "tabbed",
    );
    let out = Formatter::new(Style::PRINT_LINE)
        .with_tab_width(4)
        .format([&d]);
    assert_eq!(out, "1:2: tabbed\n    x = 1;\n    ^\n");
}

#[test]
fn test_newline_at_end() {
    let d = diag(Severity::Error, range(1, 1, 1, 4), "x");
    let out = Formatter::new(Style::NEWLINE_AT_END).format([&d]);
    assert_eq!(out, "1:1: x\n");
}
