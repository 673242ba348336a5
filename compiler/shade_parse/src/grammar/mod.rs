//! Grammar rules, one method per production.
//!
//! - `mod.rs`: the translation unit and module-scope dispatch
//! - `item`: variables, constants, aliases, structs, functions
//! - `attr`: `@attribute` and `[[attribute]]` lists
//! - `ty`: type specifiers
//! - `stmt`: statements and bodies
//! - `expr`: expressions

mod attr;
mod expr;
mod item;
mod stmt;
mod ty;

use std::sync::Arc;

use shade_ir::{GlobalDecl, Source};
use shade_lexer::TokenKind;
use tracing::{debug, trace};

use crate::outcome::{committed, try_match, Errored, Expect, Maybe};
use crate::Parser;

pub(crate) use attr::Attrs;

impl Parser<'_> {
    /// Parse global declarations until end of input, an unrecoverable error,
    /// or the error ceiling.
    pub(crate) fn translation_unit(&mut self) {
        while self.is_synchronized() {
            if self.peek().is_eof() {
                break;
            }
            // Failures are already reported; the loop condition decides
            // whether parsing can go on.
            let _ = self.expect_global_decl();

            if self.halted {
                debug!(max_errors = self.options.max_errors, "error ceiling reached");
                let message = format!("stopping after {} errors", self.options.max_errors);
                let source = Source::whole_file(Arc::clone(&self.file));
                self.diagnostics.add_error(source, message);
                break;
            }
        }
    }

    /// One module-scope declaration, or a stray `;`.
    fn expect_global_decl(&mut self) -> Expect<()> {
        if self.eat(TokenKind::Semicolon).is_some() || self.peek().is_eof() {
            return Ok(());
        }

        let mut errored = false;
        let mut attrs = Attrs::new();
        if self.attribute_list(&mut attrs).is_err() {
            errored = true;
        }
        if !self.is_synchronized() {
            return Err(Errored);
        }

        match self.sync(TokenKind::Semicolon, |p| p.global_declaration(&mut attrs)) {
            Maybe::Matched(()) => return Ok(()),
            Maybe::Errored => errored = true,
            Maybe::NoMatch => {}
        }

        match self.function_decl(&mut attrs) {
            Maybe::Matched(function) => {
                self.builder.add_global(GlobalDecl::Function(function));
                return Ok(());
            }
            Maybe::Errored => errored = true,
            Maybe::NoMatch => {}
        }

        if errored {
            return Err(Errored);
        }

        if !attrs.is_empty() {
            let token = self.next();
            return Err(self.add_error_at(&token, "expected declaration after attributes"));
        }

        // Nothing at module scope starts here. If it parses as a statement,
        // say so and skip to the end of the block it probably belongs to.
        let token = self.peek().clone();
        let stmt = self.without_error(Self::statement);
        if stmt.is_matched() {
            trace!(token = %token.kind, "statement at module scope");
            self.sync_to(TokenKind::BraceRight, true);
            return Err(self.add_error_at(&token, "statement found outside of function body"));
        }
        if !stmt.is_errored() {
            self.next();
        }
        Err(self.add_error_at(&token, "unexpected token"))
    }

    /// Declarations that end in `;`, parsed inside the caller's `;` scope.
    fn global_declaration(&mut self, attrs: &mut Attrs) -> Maybe<()> {
        if let Some(var) = try_match!(self.global_variable_decl(attrs)) {
            committed!(self.expect("variable declaration", TokenKind::Semicolon));
            self.builder.add_global(GlobalDecl::Variable(var));
            return Maybe::Matched(());
        }

        if let Some(var) = try_match!(self.global_constant_decl(attrs)) {
            committed!(self.expect("let declaration", TokenKind::Semicolon));
            self.builder.add_global(GlobalDecl::Variable(var));
            return Maybe::Matched(());
        }

        if let Some(alias) = try_match!(self.type_alias()) {
            committed!(self.expect("type alias", TokenKind::Semicolon));
            self.builder.add_global(GlobalDecl::Alias(alias));
            return Maybe::Matched(());
        }

        if let Some(id) = try_match!(self.struct_decl(attrs)) {
            committed!(self.expect("struct declaration", TokenKind::Semicolon));
            let name = self.builder[id].name;
            self.register_constructed(name);
            self.builder.add_global(GlobalDecl::Struct(id));
            return Maybe::Matched(());
        }

        Maybe::NoMatch
    }
}
