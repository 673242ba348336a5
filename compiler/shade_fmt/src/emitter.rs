//! Output Emitter
//!
//! Where printed text goes. The printer only ever appends.

use std::io::{self, Write};

/// Sink for printed output.
pub trait Emitter {
    /// Emit a text fragment.
    fn emit(&mut self, text: &str);

    /// Emit a newline (Unix-style `\n`).
    fn emit_newline(&mut self);

    /// Emit indentation for `level`.
    fn emit_indent(&mut self, level: usize);
}

/// Spaces per indentation level.
pub const INDENT_WIDTH: usize = 2;

/// In-memory emitter.
#[derive(Default)]
pub struct StringEmitter {
    buffer: String,
}

impl StringEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: String::with_capacity(capacity),
        }
    }

    /// Get the printed output.
    pub fn output(self) -> String {
        self.buffer
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    /// Remove trailing blank lines, leaving content followed by one newline.
    pub fn trim_trailing_blank_lines(&mut self) {
        while self.buffer.ends_with("\n\n") {
            self.buffer.pop();
        }
    }

    /// End non-empty output with a newline.
    pub fn ensure_trailing_newline(&mut self) {
        if !self.buffer.is_empty() && !self.buffer.ends_with('\n') {
            self.buffer.push('\n');
        }
    }
}

impl Emitter for StringEmitter {
    fn emit(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn emit_newline(&mut self) {
        self.buffer.push('\n');
    }

    fn emit_indent(&mut self, level: usize) {
        for _ in 0..level * INDENT_WIDTH {
            self.buffer.push(' ');
        }
    }
}

/// Emitter that streams to any [`Write`].
///
/// Write errors are held until [`WriterEmitter::finish`].
pub struct WriterEmitter<W: Write> {
    writer: W,
    error: Option<io::Error>,
}

impl<W: Write> WriterEmitter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            error: None,
        }
    }

    /// Flush and report the first write error, if any.
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(error) = self.error.take() {
            return Err(error);
        }
        self.writer.flush()?;
        Ok(self.writer)
    }

    fn write(&mut self, bytes: &[u8]) {
        if self.error.is_none() {
            if let Err(error) = self.writer.write_all(bytes) {
                self.error = Some(error);
            }
        }
    }
}

impl<W: Write> Emitter for WriterEmitter<W> {
    fn emit(&mut self, text: &str) {
        self.write(text.as_bytes());
    }

    fn emit_newline(&mut self) {
        self.write(b"\n");
    }

    fn emit_indent(&mut self, level: usize) {
        for _ in 0..level {
            self.write(&[b' '; INDENT_WIDTH]);
        }
    }
}
