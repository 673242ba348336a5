//! Diagnostics for the Shade front end.
//!
//! A parse reports into a [`DiagnosticList`]; the list is rendered either by
//! the [`Formatter`] (caret text, byte-for-byte stable) or one of the
//! [`DiagnosticEmitter`] implementations for terminals and tooling.

mod diagnostic;
mod emitter;
mod formatter;

pub use diagnostic::{Diagnostic, DiagnosticList, Severity};
pub use emitter::{ColorMode, DiagnosticEmitter, JsonEmitter, TerminalEmitter};
pub use formatter::{Color, Formatter, Printer, Style, TextStyle};
