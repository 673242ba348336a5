//! Formatting Context
//!
//! Tracks the indentation level while the printer walks the tree, and owns
//! the emitter the text goes to.

use crate::emitter::{Emitter, StringEmitter};

/// Printer state: the output sink and the current indentation level.
pub struct FormatContext<E: Emitter = StringEmitter> {
    emitter: E,
    indent_level: usize,
}

impl FormatContext<StringEmitter> {
    pub fn new() -> Self {
        Self::with_emitter(StringEmitter::new())
    }

    /// Create with pre-allocated capacity for the output buffer.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_emitter(StringEmitter::with_capacity(capacity))
    }
}

impl Default for FormatContext<StringEmitter> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Emitter> FormatContext<E> {
    pub fn with_emitter(emitter: E) -> Self {
        Self {
            emitter,
            indent_level: 0,
        }
    }

    pub fn indent_level(&self) -> usize {
        self.indent_level
    }

    /// Emit a text fragment.
    pub fn emit(&mut self, text: &str) {
        self.emitter.emit(text);
    }

    pub fn emit_newline(&mut self) {
        self.emitter.emit_newline();
    }

    /// Emit indentation at the current level.
    pub fn emit_indent(&mut self) {
        self.emitter.emit_indent(self.indent_level);
    }

    /// Emit a newline followed by indentation.
    pub fn emit_newline_indent(&mut self) {
        self.emit_newline();
        self.emit_indent();
    }

    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    pub fn dedent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    /// Run `f` one level deeper; the level is restored afterwards.
    pub fn with_indent<F, R>(&mut self, f: F) -> R
    where
        F: FnOnce(&mut Self) -> R,
    {
        self.indent();
        let result = f(self);
        self.dedent();
        result
    }

    pub fn into_emitter(self) -> E {
        self.emitter
    }
}

impl FormatContext<StringEmitter> {
    pub fn as_str(&self) -> &str {
        self.emitter.as_str()
    }

    /// Trim trailing blank lines and end non-empty output with one newline.
    pub fn finalize(self) -> String {
        let mut emitter = self.emitter;
        emitter.trim_trailing_blank_lines();
        emitter.ensure_trailing_newline();
        emitter.output()
    }
}
