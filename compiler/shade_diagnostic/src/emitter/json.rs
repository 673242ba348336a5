//! JSON Emitter
//!
//! Machine-readable diagnostic output in JSON format.

use std::fmt::Write as _;
use std::io::Write;

use crate::Diagnostic;

use super::DiagnosticEmitter;

/// JSON emitter for machine-readable output.
///
/// Each diagnostic becomes one object with `severity`, `message`, and,
/// when known, `file` and a `range` of 1-based line/column pairs.
pub struct JsonEmitter<W: Write> {
    writer: W,
    first: bool,
}

impl<W: Write> JsonEmitter<W> {
    /// Create a new JSON emitter.
    pub fn new(writer: W) -> Self {
        JsonEmitter {
            writer,
            first: true,
        }
    }

    /// Begin the JSON array output.
    pub fn begin(&mut self) {
        let _ = writeln!(self.writer, "[");
    }

    /// End the JSON array output.
    pub fn end(&mut self) {
        if self.first {
            let _ = writeln!(self.writer, "]");
        } else {
            let _ = writeln!(self.writer, "\n]");
        }
    }

    /// Consume the emitter and return the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> DiagnosticEmitter for JsonEmitter<W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        if !self.first {
            let _ = writeln!(self.writer, ",");
        }
        self.first = false;

        let mut fields: Vec<String> = Vec::with_capacity(4);
        fields.push(format!("\"severity\": \"{}\"", diagnostic.severity));
        fields.push(format!("\"message\": {}", quoted(&diagnostic.message)));
        if let Some(file) = diagnostic.file() {
            fields.push(format!("\"file\": {}", quoted(file.path())));
        }
        let range = diagnostic.range();
        if !range.is_empty() {
            fields.push(format!(
                "\"range\": {{ \"begin\": {{ \"line\": {}, \"column\": {} }}, \"end\": {{ \"line\": {}, \"column\": {} }} }}",
                range.begin.line, range.begin.column, range.end.line, range.end.column
            ));
        }

        let _ = write!(self.writer, "  {{\n    {}\n  }}", fields.join(",\n    "));
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }

    fn emit_summary(&mut self, _error_count: usize, _warning_count: usize) {
        // The array already carries every entry.
    }
}

/// `text` as a JSON string literal, quotes included.
pub(super) fn quoted(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '"' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04x}", u32::from(c));
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
