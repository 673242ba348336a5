//! Buffered token stream with bounded look-ahead.

use std::collections::VecDeque;

use shade_ir::Range;
use tracing::trace;

use crate::{Lexer, Token, TokenKind};

/// Tokens pulled from a [`Lexer`] on demand.
///
/// Peeked tokens are kept in a queue until consumed. Grammar rules may push
/// a token back to the front, which is how a `>>` is split into two `>`.
#[derive(Debug)]
pub struct TokenStream<'src> {
    lexer: Lexer<'src>,
    queue: VecDeque<Token<'src>>,
    last: Token<'src>,
}

impl<'src> TokenStream<'src> {
    pub fn new(source: &'src str) -> Self {
        TokenStream {
            lexer: Lexer::new(source),
            queue: VecDeque::new(),
            last: Token::new(TokenKind::Eof, Range::EMPTY, ""),
        }
    }

    /// Consume and return the next token.
    pub fn next(&mut self) -> Token<'src> {
        let token = self
            .queue
            .pop_front()
            .unwrap_or_else(|| self.lexer.next_token());
        trace!(kind = %token.kind, range = ?token.range, "next");
        self.last = token.clone();
        token
    }

    /// The token `k` positions ahead; `peek(0)` is the next token.
    pub fn peek(&mut self, k: usize) -> &Token<'src> {
        while self.queue.len() <= k {
            let token = self.lexer.next_token();
            self.queue.push_back(token);
        }
        &self.queue[k]
    }

    /// Kind of the token `k` positions ahead.
    #[inline]
    pub fn peek_kind(&mut self, k: usize) -> TokenKind {
        self.peek(k).kind
    }

    /// The most recently consumed token.
    pub fn last(&self) -> &Token<'src> {
        &self.last
    }

    /// Make `token` the next token returned.
    pub fn push_front(&mut self, token: Token<'src>) {
        self.queue.push_front(token);
    }
}
