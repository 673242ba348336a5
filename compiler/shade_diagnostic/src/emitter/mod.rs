//! Diagnostic Emitters
//!
//! Output formats for a finished diagnostic list:
//! - Terminal: the caret layout of [`Formatter`](crate::Formatter), optionally in color
//! - JSON: one array of objects, for tooling

mod json;
mod terminal;

pub use json::JsonEmitter;
pub use terminal::{ColorMode, TerminalEmitter};

use crate::Diagnostic;

/// A destination for diagnostics, written one at a time in filing order.
pub trait DiagnosticEmitter {
    fn emit(&mut self, diagnostic: &Diagnostic);

    fn flush(&mut self);

    /// Closing line with the totals; formats that carry every entry already
    /// may write nothing.
    fn emit_summary(&mut self, error_count: usize, warning_count: usize);
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests use unwrap for brevity")]
mod tests;
