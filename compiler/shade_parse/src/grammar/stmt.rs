//! Statements and function bodies.
//!
//! Statements that end in `;` are parsed inside a `;` sync scope, so a
//! malformed one is skipped up to its semicolon and the rest of the block is
//! still parsed. `for` loops are desugared here into `loop` with a leading
//! `if (!cond) { break; }` and a `continuing` block.

use shade_ir::{
    CaseClause, CaseRange, DecorationRange, ElseClause, ElseRange, Expr, ExprId, ExprKind,
    ExprRange, Range, Stmt, StmtId, StmtKind, StmtRange, UnaryOp, Variable, VariableKind,
};
use shade_lexer::TokenKind;
use smallvec::SmallVec;
use tracing::trace;

use crate::outcome::{committed, one_of, require, try_match, Errored, Expect, Maybe};
use crate::Parser;

/// Statements of one block, collected before they are allocated together.
type Stmts = SmallVec<[StmtId; 8]>;

/// The three clauses between the parentheses of a `for`.
struct ForHeader {
    initializer: Option<StmtId>,
    condition: Option<ExprId>,
    continuing: Option<StmtId>,
}

impl Parser<'_> {
    /// `{ statements }`
    pub(crate) fn expect_body(&mut self) -> Expect<StmtId> {
        let begin = self.peek_range().begin;
        let stmts = self.expect_brace_block("", Self::expect_statement_list)?;
        let range = self.range_from(begin);
        Ok(self.block(stmts, range))
    }

    /// Statements up to the first token that starts none. An errored
    /// statement does not end the list while the parser is synchronized.
    fn expect_statement_list(&mut self) -> Expect<Stmts> {
        let mut errored = false;
        let mut stmts = Stmts::new();
        while self.is_synchronized() {
            match self.statement() {
                Maybe::Matched(stmt) => stmts.push(stmt),
                Maybe::Errored => errored = true,
                Maybe::NoMatch => break,
            }
        }
        if errored {
            Err(Errored)
        } else {
            Ok(stmts)
        }
    }

    fn block(&mut self, stmts: impl IntoIterator<Item = StmtId>, range: Range) -> StmtId {
        let list: StmtRange = self.builder.create_list(stmts);
        self.builder.create(Stmt::new(StmtKind::Block(list), range))
    }

    fn stmt(&mut self, kind: StmtKind, range: Range) -> StmtId {
        self.builder.create(Stmt::new(kind, range))
    }

    pub(crate) fn statement(&mut self) -> Maybe<StmtId> {
        while self.eat(TokenKind::Semicolon).is_some() {}

        let stmt = self.sync(TokenKind::Semicolon, Self::non_block_statement);
        if !matches!(stmt, Maybe::NoMatch) {
            return stmt;
        }

        one_of!(
            self.if_stmt(),
            self.switch_stmt(),
            self.loop_stmt(),
            self.for_stmt(),
            self.block_stmt(),
        )
    }

    fn block_stmt(&mut self) -> Maybe<StmtId> {
        if self.peek_is(TokenKind::BraceLeft) {
            self.expect_body().into()
        } else {
            Maybe::NoMatch
        }
    }

    /// A statement that must be followed by `;`.
    fn non_block_statement(&mut self) -> Maybe<StmtId> {
        let stmt = one_of!(
            self.return_stmt(),
            self.func_call_stmt(),
            self.variable_stmt(),
            self.break_stmt(),
            self.continue_stmt(),
            self.assignment_stmt(),
            self.discard_stmt(),
        );
        match stmt {
            Maybe::Matched(id) => {
                let use_ = self.statement_name(id);
                committed!(self.expect(use_, TokenKind::Semicolon));
                Maybe::Matched(id)
            }
            other => other,
        }
    }

    /// What a missing `;` is reported for.
    fn statement_name(&self, id: StmtId) -> &'static str {
        match &self.builder[id].kind {
            StmtKind::Return(_) => "return statement",
            StmtKind::Call(_) => "function call",
            StmtKind::Variable(var) => match self.builder[*var].kind {
                VariableKind::Let => "let declaration",
                VariableKind::Var(_) | VariableKind::Param => "variable declaration",
            },
            StmtKind::Break => "break statement",
            StmtKind::Continue => "continue statement",
            StmtKind::Assign { .. } => "assignment statement",
            StmtKind::Discard => "discard statement",
            _ => "statement",
        }
    }

    /// `return` with an optional value.
    fn return_stmt(&mut self) -> Maybe<StmtId> {
        let Some(keyword) = self.eat(TokenKind::Return) else {
            return Maybe::NoMatch;
        };
        let value = if self.peek_is(TokenKind::Semicolon) {
            None
        } else {
            try_match!(self.logical_or_expression())
        };
        let range = self.range_from(keyword.begin);
        Maybe::Matched(self.stmt(StmtKind::Return(value), range))
    }

    /// `let name (: T)? = e` or `var<class>? name (: T)? (= e)?`
    fn variable_stmt(&mut self) -> Maybe<StmtId> {
        let begin = self.peek_range().begin;

        if self.eat_let() {
            const USE: &str = "let declaration";
            let (ident, ty) = committed!(self.expect_optionally_typed_ident(USE));
            committed!(self.expect(USE, TokenKind::Equal));
            let initializer = require!(
                self,
                self.logical_or_expression(),
                "missing constructor for let declaration"
            );
            let name = self.builder.sym(ident.text);
            let var = self.builder.create(Variable {
                name,
                kind: VariableKind::Let,
                ty,
                initializer: Some(initializer),
                decorations: DecorationRange::EMPTY,
                range: ident.range,
            });
            let range = self.range_from(begin);
            return Maybe::Matched(self.stmt(StmtKind::Variable(var), range));
        }

        let Some(decl) = try_match!(self.variable_decl()) else {
            return Maybe::NoMatch;
        };
        let initializer = match self.eat(TokenKind::Equal) {
            Some(_) => Some(require!(
                self,
                self.logical_or_expression(),
                "missing constructor for variable declaration"
            )),
            None => None,
        };
        let var = self.builder.create(Variable {
            name: decl.name,
            kind: VariableKind::Var(decl.class),
            ty: decl.ty,
            initializer,
            decorations: DecorationRange::EMPTY,
            range: decl.range,
        });
        let range = self.range_from(begin);
        Maybe::Matched(self.stmt(StmtKind::Variable(var), range))
    }

    /// `if (c) { } else if (c) { } else { }`
    fn if_stmt(&mut self) -> Maybe<StmtId> {
        let Some(keyword) = self.eat(TokenKind::If) else {
            return Maybe::NoMatch;
        };
        let condition = committed!(self.expect_paren_rhs());
        let body = committed!(self.expect_body());

        let mut clauses: SmallVec<[ElseClause; 4]> = SmallVec::new();
        loop {
            let begin = self.peek_range().begin;
            let conditional = if let Some(range) = self.eat(TokenKind::ElseIf) {
                self.deprecated(range, "use 'else if' instead of 'elseif'");
                true
            } else if self.peek_is(TokenKind::Else) {
                self.next();
                self.eat(TokenKind::If).is_some()
            } else {
                break;
            };

            let condition = if conditional {
                Some(committed!(self.expect_paren_rhs()))
            } else {
                None
            };
            let body = committed!(self.expect_body());
            clauses.push(ElseClause {
                condition,
                body,
                range: self.range_from(begin),
            });
            if !conditional {
                break;
            }
        }

        let else_clauses: ElseRange = self.builder.create_list(clauses);
        let range = self.range_from(keyword.begin);
        Maybe::Matched(self.stmt(
            StmtKind::If {
                condition,
                body,
                else_clauses,
            },
            range,
        ))
    }

    /// `switch (e) { case 1, 2: { } default: { } }`
    fn switch_stmt(&mut self) -> Maybe<StmtId> {
        let Some(keyword) = self.eat(TokenKind::Switch) else {
            return Maybe::NoMatch;
        };
        let condition = committed!(self.expect_paren_rhs());
        let cases = committed!(self.expect_brace_block("switch statement", |p| -> Expect<CaseRange> {
            let mut errored = false;
            let mut cases: SmallVec<[CaseClause; 8]> = SmallVec::new();
            while p.is_synchronized() {
                match p.switch_body() {
                    Maybe::Matched(case) => cases.push(case),
                    Maybe::Errored => errored = true,
                    Maybe::NoMatch => break,
                }
            }
            if errored {
                return Err(Errored);
            }
            Ok(p.builder.create_list(cases))
        }));

        let range = self.range_from(keyword.begin);
        Maybe::Matched(self.stmt(StmtKind::Switch { condition, cases }, range))
    }

    /// One `case` or `default` arm.
    fn switch_body(&mut self) -> Maybe<CaseClause> {
        const USE: &str = "case statement";

        let begin = self.peek_range().begin;
        let selectors = match self.peek_kind() {
            TokenKind::Case => {
                self.next();
                committed!(self.expect_case_selectors())
            }
            TokenKind::Default => {
                self.next();
                ExprRange::EMPTY
            }
            _ => return Maybe::NoMatch,
        };

        committed!(self.expect(USE, TokenKind::Colon));
        let body = committed!(self.expect_brace_block(USE, Self::case_body));
        Maybe::Matched(CaseClause {
            selectors,
            body,
            range: self.range_from(begin),
        })
    }

    /// Integer literals separated by commas.
    fn expect_case_selectors(&mut self) -> Expect<ExprRange> {
        let mut selectors: SmallVec<[ExprId; 4]> = SmallVec::new();
        while self.is_synchronized() {
            let range = self.peek_range();
            let Some(literal) = try_match!(self.const_literal()) else {
                break;
            };
            if !literal.is_integer() {
                return Err(self.add_error(range, "invalid case selector must be an integer value"));
            }
            let range = self.range_from(range.begin);
            selectors.push(self.builder.create(Expr::new(ExprKind::Literal(literal), range)));

            if self.eat(TokenKind::Comma).is_none() {
                break;
            }
        }

        if selectors.is_empty() {
            return Err(self.add_error_at_peek("unable to parse case selectors"));
        }
        Ok(self.builder.create_list(selectors))
    }

    /// Statements of a case arm, optionally ending in `fallthrough;`.
    fn case_body(&mut self) -> Expect<StmtId> {
        let begin = self.last_range().begin;
        let mut stmts = Stmts::new();
        loop {
            if let Some(range) = self.eat(TokenKind::Fallthrough) {
                self.expect("fallthrough statement", TokenKind::Semicolon)?;
                stmts.push(self.stmt(StmtKind::Fallthrough, range));
                break;
            }
            match self.statement() {
                Maybe::Matched(stmt) => stmts.push(stmt),
                Maybe::Errored => return Err(Errored),
                Maybe::NoMatch => break,
            }
        }
        let range = self.range_from(begin);
        Ok(self.block(stmts, range))
    }

    /// `loop { statements continuing { } }`
    fn loop_stmt(&mut self) -> Maybe<StmtId> {
        let Some(keyword) = self.eat(TokenKind::Loop) else {
            return Maybe::NoMatch;
        };
        let (body, continuing) = committed!(self.expect_brace_block("loop", |p| -> Expect<(StmtId, Option<StmtId>)> {
            let begin = p.last_range().begin;
            let stmts = p.expect_statement_list()?;
            let range = p.range_from(begin);
            let body = p.block(stmts, range);
            let continuing = match p.eat(TokenKind::Continuing) {
                Some(_) => Some(p.expect_body()?),
                None => None,
            };
            Ok((body, continuing))
        }));

        let range = self.range_from(keyword.begin);
        Maybe::Matched(self.stmt(StmtKind::Loop { body, continuing }, range))
    }

    /// `for (init; cond; cont) { body }`, rewritten as
    /// `{ init; loop { if (!cond) { break; } body continuing { cont } } }`.
    fn for_stmt(&mut self) -> Maybe<StmtId> {
        let Some(keyword) = self.eat(TokenKind::For) else {
            return Maybe::NoMatch;
        };
        let header = committed!(self.expect_paren_block("for loop", Self::expect_for_header));
        let mut stmts = committed!(self.expect_brace_block("for loop", Self::expect_statement_list));
        trace!(
            initializer = header.initializer.is_some(),
            condition = header.condition.is_some(),
            continuing = header.continuing.is_some(),
            "desugar for"
        );

        if let Some(condition) = header.condition {
            let range = self.builder[condition].range;
            let negated = self.builder.create(Expr::new(
                ExprKind::Unary {
                    op: UnaryOp::Not,
                    operand: condition,
                },
                range,
            ));
            let brk = self.stmt(StmtKind::Break, range);
            let brk_body = self.block([brk], range);
            let guard = self.stmt(
                StmtKind::If {
                    condition: negated,
                    body: brk_body,
                    else_clauses: ElseRange::EMPTY,
                },
                range,
            );
            stmts.insert(0, guard);
        }

        let continuing = match header.continuing {
            Some(stmt) => {
                let range = self.builder[stmt].range;
                Some(self.block([stmt], range))
            }
            None => None,
        };

        let range = self.range_from(keyword.begin);
        let body = self.block(stmts, range);
        let looped = self.stmt(StmtKind::Loop { body, continuing }, range);
        match header.initializer {
            Some(init) => Maybe::Matched(self.block([init, looped], range)),
            None => Maybe::Matched(looped),
        }
    }

    fn expect_for_header(&mut self) -> Expect<ForHeader> {
        let initializer = try_match!(one_of!(
            self.func_call_stmt(),
            self.variable_stmt(),
            self.assignment_stmt(),
        ));
        self.expect("initializer in for loop", TokenKind::Semicolon)?;

        let condition = try_match!(self.logical_or_expression());
        self.expect("condition in for loop", TokenKind::Semicolon)?;

        let continuing = try_match!(one_of!(self.func_call_stmt(), self.assignment_stmt()));
        Ok(ForHeader {
            initializer,
            condition,
            continuing,
        })
    }

    /// `name(args)` used as a statement.
    fn func_call_stmt(&mut self) -> Maybe<StmtId> {
        if !self.peek().is_identifier() || !self.peek_at(1).is(TokenKind::ParenLeft) {
            return Maybe::NoMatch;
        }
        let name = self.next();
        let symbol = self.builder.sym(name.text);
        let callee = self
            .builder
            .create(Expr::new(ExprKind::Identifier(symbol), name.range));
        let args = committed!(self.expect_argument_list("function call"));

        let range = self.range_from(name.range.begin);
        let call = self
            .builder
            .create(Expr::new(ExprKind::Call { callee, args }, range));
        Maybe::Matched(self.stmt(StmtKind::Call(call), range))
    }

    fn break_stmt(&mut self) -> Maybe<StmtId> {
        match self.eat(TokenKind::Break) {
            Some(range) => Maybe::Matched(self.stmt(StmtKind::Break, range)),
            None => Maybe::NoMatch,
        }
    }

    fn continue_stmt(&mut self) -> Maybe<StmtId> {
        match self.eat(TokenKind::Continue) {
            Some(range) => Maybe::Matched(self.stmt(StmtKind::Continue, range)),
            None => Maybe::NoMatch,
        }
    }

    fn discard_stmt(&mut self) -> Maybe<StmtId> {
        match self.eat(TokenKind::Discard) {
            Some(range) => Maybe::Matched(self.stmt(StmtKind::Discard, range)),
            None => Maybe::NoMatch,
        }
    }

    /// `lhs = rhs`
    fn assignment_stmt(&mut self) -> Maybe<StmtId> {
        let begin = self.peek_range().begin;

        // `name : T` without `var` reads better as a missing keyword than as
        // a missing `=`.
        if self.peek().is_identifier() && self.peek_at(1).is(TokenKind::Colon) {
            let range = self.peek_range();
            self.add_error(range, "expected 'var' for variable declaration");
            return Maybe::Errored;
        }

        let Some(lhs) = try_match!(self.unary_expression()) else {
            return Maybe::NoMatch;
        };
        committed!(self.expect("assignment", TokenKind::Equal));
        let rhs = require!(
            self,
            self.logical_or_expression(),
            "unable to parse right side of assignment"
        );

        let range = self.range_from(begin);
        Maybe::Matched(self.stmt(StmtKind::Assign { lhs, rhs }, range))
    }

    /// `( expression )`
    pub(crate) fn expect_paren_rhs(&mut self) -> Expect<ExprId> {
        self.expect_paren_block("", |p| match p.logical_or_expression() {
            Maybe::Matched(expr) => Ok(expr),
            Maybe::Errored => Err(Errored),
            Maybe::NoMatch => Err(p.add_error_at_peek("unable to parse expression")),
        })
    }
}
