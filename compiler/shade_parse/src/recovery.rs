//! Resynchronization after syntax errors.
//!
//! A rule that can recover wraps its body in [`Parser::sync`], naming the
//! token that ends it (`;` for a statement, `}` for a block, ...). Scopes
//! nest; the kinds of all active scopes are kept on `sync_tokens`.
//!
//! When a body errors, the parser scans ahead for its token, skipping
//! anything inside brackets opened during the scan. The scan stops at the
//! first token that is either the scope's own token, which is consumed and
//! leaves the parser synchronized, or the token of an enclosing scope,
//! which is left for that scope to handle while the parser stays
//! unsynchronized. Loops over list items check
//! [`Parser::is_synchronized`] so an unsynchronized parser unwinds to the
//! scope that can recover.

use shade_lexer::TokenKind;
use tracing::{debug, trace};

use crate::outcome::Outcome;
use crate::Parser;

/// Open bracket counts seen while scanning ahead.
#[derive(Default)]
struct BlockCounters {
    attrs: i32,
    brace: i32,
    bracket: i32,
    paren: i32,
}

impl BlockCounters {
    /// Update for `kind`, returning the depth of its bracket family before
    /// the update. Non-bracket tokens return 0.
    fn consume(&mut self, kind: TokenKind) -> i32 {
        let (counter, delta) = match kind {
            TokenKind::AttrLeft => (&mut self.attrs, 1),
            TokenKind::AttrRight => (&mut self.attrs, -1),
            TokenKind::BraceLeft => (&mut self.brace, 1),
            TokenKind::BraceRight => (&mut self.brace, -1),
            TokenKind::BracketLeft => (&mut self.bracket, 1),
            TokenKind::BracketRight => (&mut self.bracket, -1),
            TokenKind::ParenLeft => (&mut self.paren, 1),
            TokenKind::ParenRight => (&mut self.paren, -1),
            _ => return 0,
        };
        let before = *counter;
        *counter += delta;
        before
    }
}

impl Parser<'_> {
    /// Run `body` in a sync scope for `token`.
    ///
    /// Each scope counts toward the recursion ceiling. At the ceiling the
    /// body is not run: one error is filed and the parser is left
    /// unsynchronized so the enclosing scopes recover.
    pub(crate) fn sync<T: Outcome>(&mut self, token: TokenKind, body: impl FnOnce(&mut Self) -> T) -> T {
        if self.depth >= self.options.max_depth {
            debug!(depth = self.depth, "recursion ceiling reached");
            self.add_error_at_peek("maximum parser recursive depth reached");
            self.synchronized = false;
            return T::errored();
        }

        self.sync_tokens.push(token);
        self.depth += 1;
        let result = shade_stack::ensure_sufficient_stack(|| body(self));
        self.depth -= 1;
        debug_assert_eq!(self.sync_tokens.last(), Some(&token), "sync tokens out of order");
        self.sync_tokens.pop();

        if result.is_errored() {
            self.sync_to(token, true);
        }
        result
    }

    /// Skip ahead to `token`, consuming it if `consume` is set.
    ///
    /// Returns `true` if `token` was reached. Returns `false`, leaving the
    /// parser unsynchronized, when the look-ahead runs out or a token of an
    /// enclosing scope comes first.
    pub(crate) fn sync_to(&mut self, token: TokenKind, consume: bool) -> bool {
        self.synchronized = false;
        if self.halted {
            return false;
        }

        let mut counters = BlockCounters::default();
        for i in 0..self.options.resync_lookahead {
            let kind = self.peek_at(i).kind;
            if counters.consume(kind) > 0 {
                continue;
            }
            if kind != token && !self.is_sync_token(kind) {
                if kind == TokenKind::Eof {
                    break;
                }
                continue;
            }

            trace!(skipped = i, target = %token, found = %kind, "resync point");
            for _ in 0..i {
                self.next();
            }
            if kind == token {
                if consume {
                    self.next();
                }
                self.synchronized = true;
                return true;
            }
            break;
        }

        debug!(target = %token, "resync failed");
        false
    }

    fn is_sync_token(&self, kind: TokenKind) -> bool {
        self.sync_tokens.contains(&kind)
    }
}
