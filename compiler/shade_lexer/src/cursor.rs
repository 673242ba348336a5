//! Byte cursor with line/column tracking.
//!
//! The cursor walks the source as bytes but counts columns in characters:
//! only bytes that start a UTF-8 sequence advance the column. Tokens never
//! span a line break, so [`Cursor::advance`] only has to handle newlines in
//! trivia, which the dedicated skip methods do.

use memchr::{memchr, memchr3};
use shade_ir::Location;

/// Number of characters in `bytes`, i.e. bytes that are not UTF-8
/// continuation bytes (`0b10xx_xxxx`).
#[inline]
fn char_count(bytes: &[u8]) -> u32 {
    let count = bytes.iter().filter(|&&b| (b & 0xC0) != 0x80).count();
    #[allow(
        clippy::cast_possible_truncation,
        reason = "source files larger than 4GiB are not supported"
    )]
    let count = count as u32;
    count
}

/// `isspace` in the C locale.
#[inline]
fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0B | 0x0C)
}

#[derive(Clone, Debug)]
pub(crate) struct Cursor<'src> {
    source: &'src str,
    pos: usize,
    location: Location,
}

impl<'src> Cursor<'src> {
    pub(crate) fn new(source: &'src str) -> Self {
        Cursor {
            source,
            pos: 0,
            location: Location::new(1, 1),
        }
    }

    #[inline]
    pub(crate) fn location(&self) -> Location {
        self.location
    }

    #[inline]
    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    #[inline]
    pub(crate) fn is_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// Unconsumed input.
    #[inline]
    pub(crate) fn rest(&self) -> &'src str {
        self.source.get(self.pos..).unwrap_or("")
    }

    /// Source text from byte `start` to the current position.
    #[inline]
    pub(crate) fn slice_from(&self, start: usize) -> &'src str {
        self.source.get(start..self.pos).unwrap_or("")
    }

    #[inline]
    fn bytes(&self) -> &'src [u8] {
        self.rest().as_bytes()
    }

    /// Advance `len` bytes that contain no line break.
    #[inline]
    pub(crate) fn advance(&mut self, len: usize) {
        let end = (self.pos + len).min(self.source.len());
        self.location.column += char_count(&self.source.as_bytes()[self.pos..end]);
        self.pos = end;
    }

    #[inline]
    fn newline(&mut self) {
        self.pos += 1;
        self.location.line += 1;
        self.location.column = 1;
    }

    /// Skip whitespace and comments.
    pub(crate) fn skip_trivia(&mut self) {
        loop {
            let start = self.pos;
            self.skip_whitespace();
            self.skip_comment();
            if self.pos == start {
                return;
            }
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(&b) = self.bytes().first() {
            if !is_whitespace(b) {
                break;
            }
            if b == b'\n' {
                self.newline();
            } else {
                self.pos += 1;
                self.location.column += 1;
            }
        }
    }

    fn skip_comment(&mut self) {
        let bytes = self.bytes();
        if bytes.starts_with(b"//") {
            let len = memchr(b'\n', bytes).unwrap_or(bytes.len());
            self.advance(len);
        } else if bytes.starts_with(b"/*") {
            self.skip_block_comment();
        }
    }

    /// Skip a nested block comment. A comment left open at end of input
    /// simply ends there.
    fn skip_block_comment(&mut self) {
        self.advance(2);
        let mut depth = 1u32;
        while depth > 0 {
            let bytes = self.bytes();
            let Some(offset) = memchr3(b'/', b'*', b'\n', bytes) else {
                self.advance(bytes.len());
                return;
            };
            self.advance(offset);
            let bytes = self.bytes();
            if bytes.starts_with(b"/*") {
                depth += 1;
                self.advance(2);
            } else if bytes.starts_with(b"*/") {
                depth -= 1;
                self.advance(2);
            } else if bytes[0] == b'\n' {
                self.newline();
            } else {
                self.advance(1);
            }
        }
    }
}
