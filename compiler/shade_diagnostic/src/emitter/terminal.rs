//! Terminal Emitter
//!
//! Human-readable diagnostic output with optional ANSI color support.

use std::io::{self, Write};

use crate::formatter::{Color, Formatter, Printer, TextStyle};
use crate::{Diagnostic, Severity};

use super::DiagnosticEmitter;

/// ANSI color codes for terminal output.
mod colors {
    pub const RED: &str = "\x1b[31m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
    pub const MAGENTA: &str = "\x1b[35m";
    pub const BOLD: &str = "\x1b[1m";
    pub const RESET: &str = "\x1b[0m";
}

/// Returns "s" for plural counts, "" for singular.
#[inline]
fn plural_s(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

/// Color output mode for terminal emitter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Automatically detect based on terminal capabilities.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

impl ColorMode {
    /// Resolve to a boolean. `is_tty` only matters for `Auto`.
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "auto" => Some(ColorMode::Auto),
            "always" => Some(ColorMode::Always),
            "never" => Some(ColorMode::Never),
            _ => None,
        }
    }
}

/// [`Printer`] over an `io::Write` that translates styles to ANSI escapes.
struct AnsiPrinter<'w, W: Write> {
    writer: &'w mut W,
    colors: bool,
    current: TextStyle,
}

impl<W: Write> Printer for AnsiPrinter<'_, W> {
    fn set_style(&mut self, style: TextStyle) {
        if !self.colors || style == self.current {
            return;
        }
        let _ = write!(self.writer, "{}", colors::RESET);
        if style.bold {
            let _ = write!(self.writer, "{}", colors::BOLD);
        }
        let code = match style.color {
            Color::Default => "",
            Color::Red => colors::RED,
            Color::Yellow => colors::YELLOW,
            Color::Cyan => colors::CYAN,
            Color::Magenta => colors::MAGENTA,
        };
        let _ = write!(self.writer, "{code}");
        self.current = style;
    }

    fn write(&mut self, text: &str) {
        let _ = write!(self.writer, "{text}");
    }

    // Styles never span a line break.
    fn newline(&mut self) {
        if self.colors && self.current != TextStyle::PLAIN {
            let _ = write!(self.writer, "{}", colors::RESET);
            self.current = TextStyle::PLAIN;
        }
        let _ = writeln!(self.writer);
    }
}

/// Terminal emitter with optional color support.
pub struct TerminalEmitter<W: Write> {
    writer: W,
    colors: bool,
    formatter: Formatter,
    /// The previous diagnostic ended with a caret block.
    separate: bool,
}

impl<W: Write> TerminalEmitter<W> {
    /// Create a new terminal emitter with explicit color mode.
    ///
    /// * `is_tty` - Whether output is a TTY (used for `ColorMode::Auto`)
    pub fn with_color_mode(writer: W, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            writer,
            colors: mode.should_use_colors(is_tty),
            formatter: Formatter::default(),
            separate: false,
        }
    }

    /// Replace the layout used for each diagnostic.
    #[must_use]
    pub fn with_formatter(mut self, formatter: Formatter) -> Self {
        self.formatter = formatter;
        self
    }

    /// Create a terminal emitter for stderr with explicit color mode.
    pub fn stderr(mode: ColorMode, is_tty: bool) -> TerminalEmitter<io::Stderr> {
        TerminalEmitter::with_color_mode(io::stderr(), mode, is_tty)
    }

    /// Consume the emitter and return the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_colored(&mut self, text: &str, color: &str) {
        if self.colors {
            let _ = write!(self.writer, "{}{color}{text}{}", colors::BOLD, colors::RESET);
        } else {
            let _ = write!(self.writer, "{text}");
        }
    }
}

impl<W: Write> DiagnosticEmitter for TerminalEmitter<W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        let mut printer = AnsiPrinter {
            writer: &mut self.writer,
            colors: self.colors,
            current: TextStyle::PLAIN,
        };
        if self.separate {
            printer.newline();
        }
        self.formatter.format_diagnostic(diagnostic, &mut printer);
        printer.set_style(TextStyle::PLAIN);
        // Without a caret block the message line has no terminator yet.
        self.separate = diagnostic_ends_with_newline(&self.formatter, diagnostic);
        if !self.separate {
            printer.newline();
        }
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }

    fn emit_summary(&mut self, error_count: usize, warning_count: usize) {
        if error_count == 0 && warning_count == 0 {
            return;
        }
        if self.separate {
            let _ = writeln!(self.writer);
            self.separate = false;
        }
        if error_count > 0 {
            self.write_colored(&Severity::Error.to_string(), colors::RED);
            let error_part = if error_count == 1 {
                "previous error".to_string()
            } else {
                format!("{error_count} previous errors")
            };
            if warning_count > 0 {
                let _ = writeln!(
                    self.writer,
                    ": aborting due to {error_part}; {warning_count} warning{} emitted",
                    plural_s(warning_count)
                );
            } else {
                let _ = writeln!(self.writer, ": aborting due to {error_part}");
            }
        } else {
            self.write_colored(&Severity::Warning.to_string(), colors::YELLOW);
            let _ = writeln!(
                self.writer,
                ": {warning_count} warning{} emitted",
                plural_s(warning_count)
            );
        }
    }
}

/// Whether [`Formatter::format_diagnostic`] already terminated its output.
fn diagnostic_ends_with_newline(formatter: &Formatter, diagnostic: &Diagnostic) -> bool {
    use crate::Style;
    formatter.style().contains(Style::PRINT_LINE)
        && !diagnostic.source.range.is_empty()
        && diagnostic
            .source
            .file
            .as_ref()
            .is_some_and(|file| file.line(diagnostic.source.range.begin.line).is_some())
}
