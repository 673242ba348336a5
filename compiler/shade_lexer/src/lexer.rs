//! The lexer: source text to tokens, one at a time.

use shade_ir::Range;

use crate::cursor::Cursor;
use crate::number::{self, literal_kind};
use crate::{keywords, LexError, Token, TokenKind};

/// Punctuation in match order. A longer spelling precedes every spelling
/// that is its prefix.
const PUNCTUATION: &[(&str, TokenKind)] = &[
    ("@", TokenKind::At),
    ("[[", TokenKind::AttrLeft),
    ("]]", TokenKind::AttrRight),
    ("(", TokenKind::ParenLeft),
    (")", TokenKind::ParenRight),
    ("[", TokenKind::BracketLeft),
    ("]", TokenKind::BracketRight),
    ("{", TokenKind::BraceLeft),
    ("}", TokenKind::BraceRight),
    ("&&", TokenKind::AndAnd),
    ("&", TokenKind::And),
    ("/", TokenKind::ForwardSlash),
    ("!=", TokenKind::NotEqual),
    ("!", TokenKind::Bang),
    (":", TokenKind::Colon),
    (",", TokenKind::Comma),
    ("==", TokenKind::EqualEqual),
    ("=", TokenKind::Equal),
    (">=", TokenKind::GreaterThanEqual),
    (">>", TokenKind::ShiftRight),
    (">", TokenKind::GreaterThan),
    ("<=", TokenKind::LessThanEqual),
    ("<<", TokenKind::ShiftLeft),
    ("<", TokenKind::LessThan),
    ("%", TokenKind::Mod),
    ("->", TokenKind::Arrow),
    ("--", TokenKind::MinusMinus),
    ("-", TokenKind::Minus),
    (".", TokenKind::Period),
    ("++", TokenKind::PlusPlus),
    ("+", TokenKind::Plus),
    ("||", TokenKind::OrOr),
    ("|", TokenKind::Or),
    (";", TokenKind::Semicolon),
    ("*", TokenKind::Star),
    ("~", TokenKind::Tilde),
    ("_", TokenKind::Underscore),
    ("^", TokenKind::Xor),
];

/// Length of an identifier at the start of `s`.
///
/// `_` on its own and names starting with `__` are not identifiers; they
/// fall through to punctuation.
fn identifier_len(s: &[u8]) -> Option<usize> {
    let first = *s.first()?;
    if !(first.is_ascii_alphabetic() || first == b'_') {
        return None;
    }
    let len = s
        .iter()
        .take_while(|b| b.is_ascii_alphanumeric() || **b == b'_')
        .count();
    if first == b'_' && (len == 1 || s[1] == b'_') {
        return None;
    }
    Some(len)
}

fn punctuation(s: &str) -> Option<(TokenKind, usize)> {
    PUNCTUATION
        .iter()
        .find(|(text, _)| s.starts_with(text))
        .map(|&(text, kind)| (kind, text.len()))
}

/// Converts source text to tokens on demand.
///
/// The lexer never fails: malformed input becomes a [`TokenKind::Error`]
/// token that carries a [`LexError`], and lexing resumes after it. Once the
/// input is exhausted every call returns [`TokenKind::Eof`].
#[derive(Clone, Debug)]
pub struct Lexer<'src> {
    cursor: Cursor<'src>,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Lexer {
            cursor: Cursor::new(source),
        }
    }

    /// Lex the next token.
    pub fn next_token(&mut self) -> Token<'src> {
        self.cursor.skip_trivia();

        let begin = self.cursor.location();
        if self.cursor.is_eof() {
            return Token::new(TokenKind::Eof, Range::point(begin), "");
        }

        let start = self.cursor.pos();
        let rest = self.cursor.rest();
        let bytes = rest.as_bytes();

        let scanned = number::hex_float(bytes)
            .or_else(|| number::hex_integer(bytes))
            .or_else(|| number::decimal_float(bytes))
            .or_else(|| number::decimal_integer(bytes));
        if let Some(scan) = scanned {
            self.cursor.advance(scan.len);
            let range = Range::new(begin, self.cursor.location());
            let text = self.cursor.slice_from(start);
            return match scan.value {
                Ok(value) => Token::with_value(literal_kind(&value), range, text, value),
                Err(error) => Token::error(range, text, error),
            };
        }

        if let Some(len) = identifier_len(bytes) {
            self.cursor.advance(len);
            let range = Range::new(begin, self.cursor.location());
            let text = self.cursor.slice_from(start);
            let kind = keywords::lookup(text).unwrap_or(TokenKind::Identifier);
            return Token::new(kind, range, text);
        }

        if let Some((kind, len)) = punctuation(rest) {
            self.cursor.advance(len);
            let range = Range::new(begin, self.cursor.location());
            return Token::new(kind, range, self.cursor.slice_from(start));
        }

        let len = rest.chars().next().map_or(1, char::len_utf8);
        self.cursor.advance(len);
        let range = Range::new(begin, self.cursor.location());
        Token::error(range, self.cursor.slice_from(start), LexError::UnexpectedToken)
    }
}

/// Lex all of `source`. The last token is always [`TokenKind::Eof`].
pub fn tokenize(source: &str) -> Vec<Token<'_>> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token();
        let eof = token.is_eof();
        tokens.push(token);
        if eof {
            return tokens;
        }
    }
}

#[cfg(test)]
mod tests;
