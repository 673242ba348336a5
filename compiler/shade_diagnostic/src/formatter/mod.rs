//! Caret-annotated text rendering of diagnostics.
//!
//! Layout of one diagnostic, every part controlled by a [`Style`] flag:
//!
//! ```text
//! test.wgsl:1:23 error: unable to parse right side of + expression
//! fn f() { return 1.0 + <; }
//!                       ^
//! ```
//!
//! The prefix is `file:line:col` (only `file` when the range is empty, only
//! `line:col` without a file), then the severity, then `: ` and the message.
//! Consecutive diagnostics are separated by one newline, which leaves a blank
//! line after a caret block. This text is compared byte-for-byte by tests.

use bitflags::bitflags;
use shade_ir::{Location, Range, SourceFile};

use crate::{Diagnostic, Severity};

bitflags! {
    /// Independently toggleable parts of the rendered text.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct Style: u8 {
        /// Prefix with the file name.
        const PRINT_FILE = 1 << 0;
        /// Print `error`/`warning`/... after the location.
        const PRINT_SEVERITY = 1 << 1;
        /// Print the source line(s) and a caret line under the range.
        const PRINT_LINE = 1 << 2;
        /// End the whole list with a newline.
        const NEWLINE_AT_END = 1 << 3;
    }
}

impl Default for Style {
    fn default() -> Self {
        Style::all()
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Color {
    #[default]
    Default,
    Red,
    Yellow,
    Cyan,
    Magenta,
}

/// Color and weight for the next run of text.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TextStyle {
    pub color: Color,
    pub bold: bool,
}

impl TextStyle {
    pub const PLAIN: TextStyle = TextStyle {
        color: Color::Default,
        bold: false,
    };

    pub const fn new(color: Color, bold: bool) -> Self {
        TextStyle { color, bold }
    }
}

/// Sink for formatted text.
pub trait Printer {
    /// Switch the style of subsequent writes. Plain-text printers ignore it.
    fn set_style(&mut self, _style: TextStyle) {}

    fn write(&mut self, text: &str);

    fn newline(&mut self) {
        self.write("\n");
    }

    fn repeat(&mut self, c: char, count: usize) {
        let mut buf = [0u8; 4];
        let s = c.encode_utf8(&mut buf);
        for _ in 0..count {
            self.write(s);
        }
    }
}

impl Printer for String {
    fn write(&mut self, text: &str) {
        self.push_str(text);
    }

    fn repeat(&mut self, c: char, count: usize) {
        self.extend(std::iter::repeat(c).take(count));
    }
}

/// Renders diagnostics as text.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Formatter {
    style: Style,
    tab_width: usize,
}

impl Default for Formatter {
    fn default() -> Self {
        Formatter::new(Style::default())
    }
}

impl Formatter {
    pub const DEFAULT_TAB_WIDTH: usize = 2;

    pub fn new(style: Style) -> Self {
        Formatter {
            style,
            tab_width: Self::DEFAULT_TAB_WIDTH,
        }
    }

    /// `line:col: message`, nothing else.
    pub fn plain() -> Self {
        Formatter::new(Style::empty())
    }

    #[must_use]
    pub fn with_tab_width(mut self, tab_width: usize) -> Self {
        self.tab_width = tab_width;
        self
    }

    pub fn style(&self) -> Style {
        self.style
    }

    /// Render a whole list to a string.
    pub fn format<'a>(&self, diags: impl IntoIterator<Item = &'a Diagnostic>) -> String {
        let mut out = String::new();
        self.format_to(diags, &mut out);
        out
    }

    /// Render a whole list into `printer`.
    pub fn format_to<'a, P: Printer + ?Sized>(
        &self,
        diags: impl IntoIterator<Item = &'a Diagnostic>,
        printer: &mut P,
    ) {
        let mut first = true;
        for diag in diags {
            printer.set_style(TextStyle::PLAIN);
            if !first {
                printer.newline();
            }
            self.format_diagnostic(diag, printer);
            first = false;
        }
        if self.style.contains(Style::NEWLINE_AT_END) {
            printer.newline();
        }
    }

    /// Render one diagnostic with no leading separator or trailing newline
    /// beyond its caret block.
    pub fn format_diagnostic<P: Printer + ?Sized>(&self, diag: &Diagnostic, printer: &mut P) {
        let range = diag.source.range;
        let file = diag.source.file.as_deref();

        let mut prefix: Vec<(String, TextStyle)> = Vec::with_capacity(2);
        match file {
            Some(file) if self.style.contains(Style::PRINT_FILE) => {
                let text = if range.is_empty() {
                    file.path().to_string()
                } else {
                    format!("{}:{}", file.path(), location_text(range.begin))
                };
                prefix.push((text, TextStyle::PLAIN));
            }
            _ if !range.is_empty() => {
                prefix.push((location_text(range.begin), TextStyle::PLAIN));
            }
            _ => {}
        }
        if self.style.contains(Style::PRINT_SEVERITY) {
            prefix.push((
                diag.severity.to_string(),
                TextStyle::new(severity_color(diag.severity), true),
            ));
        }

        for (i, (text, style)) in prefix.iter().enumerate() {
            if i > 0 {
                printer.write(" ");
            }
            printer.set_style(*style);
            printer.write(text);
        }

        printer.set_style(TextStyle::new(Color::Default, true));
        if !prefix.is_empty() {
            printer.write(": ");
        }
        printer.write(&diag.message);

        if self.style.contains(Style::PRINT_LINE) && !range.is_empty() {
            if let Some(file) = file {
                printer.newline();
                self.print_source_lines(file, range, printer);
            }
        }
        printer.set_style(TextStyle::PLAIN);
    }

    fn print_source_lines<P: Printer + ?Sized>(&self, file: &SourceFile, range: Range, printer: &mut P) {
        for line_no in range.begin.line..=range.end.line {
            let Some(line) = file.line(line_no) else {
                continue;
            };
            let line_len = u32::try_from(line.chars().count()).unwrap_or(u32::MAX - 1);

            printer.set_style(TextStyle::PLAIN);
            for c in line.chars() {
                if c == '\t' {
                    printer.repeat(' ', self.tab_width);
                } else {
                    let mut buf = [0u8; 4];
                    printer.write(c.encode_utf8(&mut buf));
                }
            }
            printer.newline();
            printer.set_style(TextStyle::new(Color::Cyan, false));

            let glyphs = |start: u32, end: u32| self.glyph_width(line, start, end);
            let is_first = line_no == range.begin.line;
            let is_last = line_no == range.end.line;
            if is_first && is_last {
                printer.repeat(' ', glyphs(1, range.begin.column));
                printer.repeat('^', glyphs(range.begin.column, range.end.column).max(1));
            } else if is_first {
                printer.repeat(' ', glyphs(1, range.begin.column));
                printer.repeat('^', glyphs(range.begin.column, line_len + 1));
            } else if is_last {
                printer.repeat('^', glyphs(1, range.end.column));
            } else {
                printer.repeat('^', glyphs(1, line_len + 1));
            }
            printer.newline();
        }
    }

    /// Display width of columns `[start, end)` of `line`, expanding tabs.
    /// Columns past the end of the line count as nothing.
    fn glyph_width(&self, line: &str, start: u32, end: u32) -> usize {
        if end <= start {
            return 0;
        }
        let skip = start.saturating_sub(1) as usize;
        let take = (end - start) as usize;
        line.chars()
            .skip(skip)
            .take(take)
            .map(|c| if c == '\t' { self.tab_width } else { 1 })
            .sum()
    }
}

fn location_text(loc: Location) -> String {
    format!("{}:{}", loc.line, loc.column)
}

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Note => Color::Cyan,
        Severity::Warning => Color::Yellow,
        Severity::Error => Color::Red,
        Severity::Fatal => Color::Magenta,
    }
}

#[cfg(test)]
mod tests;
