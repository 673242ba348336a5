//! Token-level helpers: matching, expecting, and bracketed blocks.

use shade_ir::Range;
use shade_lexer::{Token, TokenKind};

use crate::outcome::{Errored, Expect, Outcome};
use crate::Parser;

/// An identifier and where it was written.
#[derive(Copy, Clone, Debug)]
pub(crate) struct Ident<'src> {
    pub text: &'src str,
    pub range: Range,
}

/// Join `message` with the construct it was expected for.
fn with_use(message: &str, use_: &str) -> String {
    if use_.is_empty() {
        message.to_string()
    } else {
        format!("{message} for {use_}")
    }
}

impl<'src> Parser<'src> {
    /// Consume the next token if it is `kind`.
    pub(crate) fn eat(&mut self, kind: TokenKind) -> Option<Range> {
        if self.peek_is(kind) {
            Some(self.next().range)
        } else {
            None
        }
    }

    /// Consume a token of `kind`, or report `expected '<kind>' for <use_>`.
    ///
    /// A `>>` or `>=` satisfies an expected `>`, and a `]]` an expected `]`;
    /// the remaining half is pushed back one column to the right.
    pub(crate) fn expect(&mut self, use_: &str, kind: TokenKind) -> Expect<Range> {
        let token = self.peek().clone();
        if token.is(kind) {
            self.next();
            self.synchronized = true;
            return Ok(token.range);
        }

        let remainder = match (kind, token.kind) {
            (TokenKind::GreaterThan, TokenKind::ShiftRight) => Some((TokenKind::GreaterThan, ">")),
            (TokenKind::GreaterThan, TokenKind::GreaterThanEqual) => Some((TokenKind::Equal, "=")),
            (TokenKind::BracketRight, TokenKind::AttrRight) => Some((TokenKind::BracketRight, "]")),
            _ => None,
        };
        if let Some((rest, text)) = remainder {
            self.next();
            let begin = token.range.begin.advanced(1);
            self.tokens
                .push_front(Token::new(rest, Range::new(begin, token.range.end), text));
            self.synchronized = true;
            return Ok(Range::new(token.range.begin, begin));
        }

        let message = with_use(&format!("expected '{}'", kind.name()), use_);
        self.synchronized = false;
        Err(self.add_error_at(&token, message))
    }

    pub(crate) fn expect_ident(&mut self, use_: &str) -> Expect<Ident<'src>> {
        let token = self.peek().clone();
        if token.is_identifier() {
            self.next();
            self.synchronized = true;
            return Ok(Ident {
                text: token.text,
                range: token.range,
            });
        }
        self.synchronized = false;
        Err(self.add_error_at(&token, with_use("expected identifier", use_)))
    }

    pub(crate) fn expect_sint(&mut self, use_: &str) -> Expect<(i32, Range)> {
        let token = self.peek().clone();
        match token.sint() {
            Some(value) if token.is(TokenKind::SintLiteral) => {
                self.next();
                Ok((value, token.range))
            }
            _ => Err(self.add_error_at(&token, with_use("expected signed integer literal", use_))),
        }
    }

    pub(crate) fn expect_positive_sint(&mut self, use_: &str) -> Expect<u32> {
        let (value, range) = self.expect_sint(use_)?;
        u32::try_from(value).map_err(|_| self.add_error(range, format!("{use_} must be positive")))
    }

    pub(crate) fn expect_nonzero_positive_sint(&mut self, use_: &str) -> Expect<u32> {
        let (value, range) = self.expect_sint(use_)?;
        match u32::try_from(value) {
            Ok(value) if value > 0 => Ok(value),
            _ => Err(self.add_error(range, format!("{use_} must be greater than 0"))),
        }
    }

    /// `start body end`, with the body in a sync scope for `end`.
    pub(crate) fn expect_block<T>(
        &mut self,
        start: TokenKind,
        end: TokenKind,
        use_: &str,
        body: impl FnOnce(&mut Self) -> T,
    ) -> T
    where
        T: Outcome,
    {
        if self.expect(use_, start).is_err() {
            return T::errored();
        }
        self.sync(end, |p| {
            let result = body(p);
            if result.is_errored() {
                return result;
            }
            match p.expect(use_, end) {
                Ok(_) => result,
                Err(Errored) => T::errored(),
            }
        })
    }

    pub(crate) fn expect_paren_block<T>(&mut self, use_: &str, body: impl FnOnce(&mut Self) -> T) -> T
    where
        T: Outcome,
    {
        self.expect_block(TokenKind::ParenLeft, TokenKind::ParenRight, use_, body)
    }

    pub(crate) fn expect_brace_block<T>(&mut self, use_: &str, body: impl FnOnce(&mut Self) -> T) -> T
    where
        T: Outcome,
    {
        self.expect_block(TokenKind::BraceLeft, TokenKind::BraceRight, use_, body)
    }

    pub(crate) fn expect_lt_gt_block<T>(&mut self, use_: &str, body: impl FnOnce(&mut Self) -> T) -> T
    where
        T: Outcome,
    {
        self.expect_block(TokenKind::LessThan, TokenKind::GreaterThan, use_, body)
    }
}
