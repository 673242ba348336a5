//! Recursive descent parser for the Shade shader language.
//!
//! Produces a [`Program`] whose nodes live in a flat arena, plus the
//! diagnostics filed along the way. Parsing never aborts on the first
//! error: failed rules report, resynchronize on a nearby token, and carry
//! on, so one run reports many independent problems. A partially built
//! program is returned even when the parse fails.
//!
//! Two conditions end a parse early: the configured error ceiling
//! ([`ParserOptions::max_errors`]) and running out of input.

mod cursor;
mod grammar;
mod options;
mod outcome;
mod recovery;

use std::sync::Arc;

use rustc_hash::FxHashSet;
use shade_diagnostic::{DiagnosticList, Formatter};
use shade_ir::{Location, Program, ProgramBuilder, Range, Source, SourceFile, Symbol};
use shade_lexer::{Token, TokenKind, TokenStream};
use smallvec::SmallVec;
use tracing::debug;

pub use options::ParserOptions;
pub use outcome::{Errored, Expect, Maybe, Outcome};

/// Parse `file` with the default limits.
pub fn parse(file: &Arc<SourceFile>) -> ParseResult {
    parse_with_options(file, ParserOptions::default())
}

/// Parse `file` with explicit limits.
pub fn parse_with_options(file: &Arc<SourceFile>, options: ParserOptions) -> ParseResult {
    let mut parser = Parser::new(file, options);
    parser.translation_unit();
    parser.finish()
}

/// A parsed program and everything reported while parsing it.
#[derive(Debug)]
pub struct ParseResult {
    pub program: Program,
    pub diagnostics: DiagnosticList,
}

impl ParseResult {
    /// `true` if any error-severity diagnostic was filed.
    pub fn has_error(&self) -> bool {
        self.diagnostics.contains_errors()
    }

    /// Diagnostics as `line:col: message` lines.
    pub fn error(&self) -> String {
        Formatter::plain().format(self.diagnostics.iter())
    }
}

/// Parser state for one source file.
pub(crate) struct Parser<'src> {
    file: Arc<SourceFile>,
    tokens: TokenStream<'src>,
    builder: ProgramBuilder,
    diagnostics: DiagnosticList,
    options: ParserOptions,
    /// Token kinds of the active sync scopes, innermost last.
    sync_tokens: SmallVec<[TokenKind; 16]>,
    /// Cleared when resynchronization fails; set again by a successful
    /// `expect`.
    synchronized: bool,
    /// Nesting of `without_error` calls; errors are dropped while non-zero.
    silenced: u32,
    depth: u32,
    /// Set once the error ceiling is reached.
    halted: bool,
    /// Struct and alias names, usable as types and type constructors.
    constructed: FxHashSet<Symbol>,
}

impl<'src> Parser<'src> {
    fn new(file: &'src Arc<SourceFile>, options: ParserOptions) -> Self {
        Parser {
            file: Arc::clone(file),
            tokens: TokenStream::new(file.content()),
            builder: ProgramBuilder::with_capacity(file.content().len()),
            diagnostics: DiagnosticList::new(),
            options,
            sync_tokens: SmallVec::new(),
            synchronized: true,
            silenced: 0,
            depth: 0,
            halted: false,
            constructed: FxHashSet::default(),
        }
    }

    fn finish(self) -> ParseResult {
        debug!(
            path = self.file.path(),
            errors = self.diagnostics.error_count(),
            globals = self.builder.module().globals().len(),
            "parse finished"
        );
        ParseResult {
            program: self.builder.build(),
            diagnostics: self.diagnostics,
        }
    }

    // === Token access ===

    #[inline]
    fn peek(&mut self) -> &Token<'src> {
        self.tokens.peek(0)
    }

    #[inline]
    fn peek_at(&mut self, k: usize) -> &Token<'src> {
        self.tokens.peek(k)
    }

    #[inline]
    fn peek_kind(&mut self) -> TokenKind {
        self.tokens.peek_kind(0)
    }

    #[inline]
    fn peek_is(&mut self, kind: TokenKind) -> bool {
        self.tokens.peek_kind(0) == kind
    }

    #[inline]
    fn peek_range(&mut self) -> Range {
        self.tokens.peek(0).range
    }

    #[inline]
    fn next(&mut self) -> Token<'src> {
        self.tokens.next()
    }

    #[inline]
    fn last_range(&self) -> Range {
        self.tokens.last().range
    }

    /// Range from `begin` to the end of the last consumed token.
    fn range_from(&self, begin: Location) -> Range {
        let end = self.tokens.last().range.end;
        Range::new(begin, end.max(begin))
    }

    #[inline]
    fn is_synchronized(&self) -> bool {
        self.synchronized && !self.halted
    }

    // === Constructed types ===

    fn register_constructed(&mut self, name: Symbol) {
        self.constructed.insert(name);
    }

    fn is_constructed(&self, name: &str) -> bool {
        self.builder
            .symbols()
            .get(name)
            .is_some_and(|sym| self.constructed.contains(&sym))
    }

    // === Diagnostics ===

    fn source(&self, range: Range) -> Source {
        Source::new(range, Some(Arc::clone(&self.file)))
    }

    /// File an error unless errors are silenced or the ceiling is reached.
    fn add_error(&mut self, range: Range, message: impl Into<String>) -> Errored {
        if self.silenced > 0 {
            return Errored;
        }
        if self.diagnostics.error_count() < self.options.max_errors {
            let source = self.source(range);
            self.diagnostics.add_error(source, message);
        }
        if self.diagnostics.error_count() >= self.options.max_errors {
            self.halted = true;
        }
        Errored
    }

    /// File an error at `token`. A lexer error token reports its own message.
    fn add_error_at(&mut self, token: &Token<'_>, message: impl Into<String>) -> Errored {
        match token.lex_error() {
            Some(error) => {
                let message = error.to_string();
                self.add_error(token.range, message)
            }
            None => self.add_error(token.range, message),
        }
    }

    fn add_error_at_peek(&mut self, message: impl Into<String>) -> Errored {
        let token = self.peek().clone();
        self.add_error_at(&token, message)
    }

    fn deprecated(&mut self, range: Range, message: &str) {
        let source = self.source(range);
        self.diagnostics
            .add_warning(source, format!("use of deprecated language feature: {message}"));
    }

    /// Run `body` with error reporting switched off.
    fn without_error<T>(&mut self, body: impl FnOnce(&mut Self) -> T) -> T {
        self.silenced += 1;
        let result = body(self);
        self.silenced -= 1;
        result
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests use unwrap for brevity")]
mod tests;
