//! Expressions.
//!
//! Precedence, loosest first:
//!
//! | Level | Operators |
//! |-------|-----------|
//! | logical or | `\|\|` |
//! | logical and | `&&` |
//! | or | `\|` |
//! | xor | `^` |
//! | and | `&` |
//! | equality | `==` `!=` |
//! | relational | `<` `>` `<=` `>=` |
//! | shift | `<<` `>>` |
//! | additive | `+` `-` |
//! | multiplicative | `*` `/` `%` |
//! | unary | `-` `!` `~` `*` `&` |
//! | postfix | `[i]` `.name` |
//!
//! Every binary level is left-associative.

use shade_ir::{BinaryOp, Expr, ExprId, ExprKind, ExprRange, Literal, UnaryOp};
use shade_lexer::{TokenKind, TokenValue};
use smallvec::SmallVec;
use tracing::debug;

use crate::outcome::{committed, require, try_match, Errored, Expect, Maybe};
use crate::Parser;

type Operand<'src> = fn(&mut Parser<'src>) -> Maybe<ExprId>;

fn multiplicative_op(kind: TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::Star => Some(BinaryOp::Multiply),
        TokenKind::ForwardSlash => Some(BinaryOp::Divide),
        TokenKind::Mod => Some(BinaryOp::Modulo),
        _ => None,
    }
}

fn additive_op(kind: TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::Plus => Some(BinaryOp::Add),
        TokenKind::Minus => Some(BinaryOp::Subtract),
        _ => None,
    }
}

fn shift_op(kind: TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::ShiftLeft => Some(BinaryOp::ShiftLeft),
        TokenKind::ShiftRight => Some(BinaryOp::ShiftRight),
        _ => None,
    }
}

fn relational_op(kind: TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::LessThan => Some(BinaryOp::LessThan),
        TokenKind::GreaterThan => Some(BinaryOp::GreaterThan),
        TokenKind::LessThanEqual => Some(BinaryOp::LessThanEqual),
        TokenKind::GreaterThanEqual => Some(BinaryOp::GreaterThanEqual),
        _ => None,
    }
}

fn equality_op(kind: TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::EqualEqual => Some(BinaryOp::Equal),
        TokenKind::NotEqual => Some(BinaryOp::NotEqual),
        _ => None,
    }
}

fn unary_op(kind: TokenKind) -> Option<UnaryOp> {
    match kind {
        TokenKind::Minus => Some(UnaryOp::Negation),
        TokenKind::Bang => Some(UnaryOp::Not),
        TokenKind::Tilde => Some(UnaryOp::Complement),
        TokenKind::Star => Some(UnaryOp::Indirection),
        TokenKind::And => Some(UnaryOp::AddressOf),
        _ => None,
    }
}

/// Single-operator levels.
fn only(op: BinaryOp, token: TokenKind) -> impl Fn(TokenKind) -> Option<BinaryOp> {
    move |kind| (kind == token).then_some(op)
}

impl<'src> Parser<'src> {
    pub(crate) fn logical_or_expression(&mut self) -> Maybe<ExprId> {
        self.binary_level(
            Self::logical_and_expression,
            only(BinaryOp::LogicalOr, TokenKind::OrOr),
        )
    }

    fn logical_and_expression(&mut self) -> Maybe<ExprId> {
        self.binary_level(
            Self::inclusive_or_expression,
            only(BinaryOp::LogicalAnd, TokenKind::AndAnd),
        )
    }

    fn inclusive_or_expression(&mut self) -> Maybe<ExprId> {
        self.binary_level(Self::exclusive_or_expression, only(BinaryOp::Or, TokenKind::Or))
    }

    fn exclusive_or_expression(&mut self) -> Maybe<ExprId> {
        self.binary_level(Self::and_expression, only(BinaryOp::Xor, TokenKind::Xor))
    }

    fn and_expression(&mut self) -> Maybe<ExprId> {
        self.binary_level(Self::equality_expression, only(BinaryOp::And, TokenKind::And))
    }

    fn equality_expression(&mut self) -> Maybe<ExprId> {
        self.binary_level(Self::relational_expression, equality_op)
    }

    fn relational_expression(&mut self) -> Maybe<ExprId> {
        self.binary_level(Self::shift_expression, relational_op)
    }

    fn shift_expression(&mut self) -> Maybe<ExprId> {
        self.binary_level(Self::additive_expression, shift_op)
    }

    fn additive_expression(&mut self) -> Maybe<ExprId> {
        self.binary_level(Self::multiplicative_expression, additive_op)
    }

    fn multiplicative_expression(&mut self) -> Maybe<ExprId> {
        self.binary_level(Self::unary_expression, multiplicative_op)
    }

    /// `operand (op operand)*`, folded to the left.
    fn binary_level(
        &mut self,
        operand: Operand<'src>,
        op_for: impl Fn(TokenKind) -> Option<BinaryOp>,
    ) -> Maybe<ExprId> {
        let Some(mut lhs) = try_match!(operand(self)) else {
            return Maybe::NoMatch;
        };
        let begin = self.builder[lhs].range.begin;

        while self.is_synchronized() {
            let Some(op) = op_for(self.peek_kind()) else {
                break;
            };
            self.next();
            let rhs = require!(
                self,
                operand(self),
                "unable to parse right side of {} expression",
                op.as_str()
            );
            let range = self.range_from(begin);
            lhs = self
                .builder
                .create(Expr::new(ExprKind::Binary { op, lhs, rhs }, range));
        }
        Maybe::Matched(lhs)
    }

    /// Prefix operators, then a postfix expression.
    ///
    /// Nested prefix operators count toward the recursion ceiling.
    pub(crate) fn unary_expression(&mut self) -> Maybe<ExprId> {
        let token = self.peek().clone();
        let Some(op) = unary_op(token.kind) else {
            return self.singular_expression();
        };

        if self.depth >= self.options.max_depth {
            debug!(depth = self.depth, "recursion ceiling reached");
            self.add_error_at_peek("maximum parser recursive depth reached");
            self.synchronized = false;
            return Maybe::Errored;
        }

        self.next();
        self.depth += 1;
        let operand = shade_stack::ensure_sufficient_stack(|| self.unary_expression());
        self.depth -= 1;

        let operand = require!(
            self,
            operand,
            "unable to parse right side of {} expression",
            token.text
        );
        let range = self.range_from(token.range.begin);
        Maybe::Matched(
            self.builder
                .create(Expr::new(ExprKind::Unary { op, operand }, range)),
        )
    }

    fn singular_expression(&mut self) -> Maybe<ExprId> {
        let Some(prefix) = try_match!(self.primary_expression()) else {
            return Maybe::NoMatch;
        };
        self.postfix_expression(prefix).into()
    }

    /// Any run of `[index]` and `.member` after `prefix`.
    fn postfix_expression(&mut self, mut prefix: ExprId) -> Expect<ExprId> {
        let begin = self.builder[prefix].range.begin;
        loop {
            let kind = if self.eat(TokenKind::BracketLeft).is_some() {
                let index = self.sync(TokenKind::BracketRight, |p| -> Expect<ExprId> {
                    let index = match p.logical_or_expression() {
                        Maybe::Matched(index) => index,
                        Maybe::Errored => return Err(Errored),
                        Maybe::NoMatch => {
                            return Err(p.add_error_at_peek("unable to parse expression inside []"))
                        }
                    };
                    p.expect("array accessor", TokenKind::BracketRight)?;
                    Ok(index)
                })?;
                ExprKind::Index {
                    base: prefix,
                    index,
                }
            } else if self.eat(TokenKind::Period).is_some() {
                let ident = self.expect_ident("member accessor")?;
                ExprKind::Member {
                    base: prefix,
                    member: self.builder.sym(ident.text),
                }
            } else {
                return Ok(prefix);
            };

            let range = self.range_from(begin);
            prefix = self.builder.create(Expr::new(kind, range));
        }
    }

    /// Literals, parenthesized expressions, `bitcast`, identifiers, calls,
    /// and type constructors.
    pub(crate) fn primary_expression(&mut self) -> Maybe<ExprId> {
        let token = self.peek().clone();
        let begin = token.range.begin;

        if let Some(literal) = try_match!(self.const_literal()) {
            let range = self.range_from(begin);
            return Maybe::Matched(self.builder.create(Expr::new(ExprKind::Literal(literal), range)));
        }

        match token.kind {
            TokenKind::ParenLeft => return self.expect_paren_rhs().into(),
            TokenKind::Bitcast => {
                const USE: &str = "bitcast expression";
                self.next();
                let ty = committed!(self.expect_lt_gt_block(USE, |p| p.expect_type(USE)));
                let expr = committed!(self.expect_paren_rhs());
                let range = self.range_from(begin);
                return Maybe::Matched(
                    self.builder
                        .create(Expr::new(ExprKind::Bitcast { ty, expr }, range)),
                );
            }
            TokenKind::Identifier if !self.is_constructed(token.text) => {
                self.next();
                let name = self.builder.sym(token.text);
                let ident = self
                    .builder
                    .create(Expr::new(ExprKind::Identifier(name), token.range));
                if !self.peek_is(TokenKind::ParenLeft) {
                    return Maybe::Matched(ident);
                }
                let args = committed!(self.expect_argument_list("function call"));
                let range = self.range_from(begin);
                return Maybe::Matched(self.builder.create(Expr::new(
                    ExprKind::Call {
                        callee: ident,
                        args,
                    },
                    range,
                )));
            }
            _ => {}
        }

        let Some(ty) = try_match!(self.type_decl()) else {
            return Maybe::NoMatch;
        };
        let args = committed!(self.expect_argument_list("type constructor"));
        let range = self.range_from(begin);
        Maybe::Matched(
            self.builder
                .create(Expr::new(ExprKind::TypeConstructor { ty, args }, range)),
        )
    }

    /// `( a, b, c )`, trailing comma allowed.
    pub(crate) fn expect_argument_list(&mut self, use_: &str) -> Expect<ExprRange> {
        self.expect_paren_block(use_, |p| -> Expect<ExprRange> {
            let mut args: SmallVec<[ExprId; 8]> = SmallVec::new();
            while p.is_synchronized() {
                let Some(arg) = try_match!(p.logical_or_expression()) else {
                    break;
                };
                args.push(arg);
                if p.eat(TokenKind::Comma).is_none() {
                    break;
                }
            }
            Ok(p.builder.create_list(args))
        })
    }

    /// `true`, `false`, or a numeric literal.
    ///
    /// A float written with a C-style `f` suffix is reported, but the literal
    /// still matches.
    pub(crate) fn const_literal(&mut self) -> Maybe<Literal> {
        let token = self.peek().clone();
        let literal = match (token.kind, &token.value) {
            (TokenKind::True, _) => Literal::Bool(true),
            (TokenKind::False, _) => Literal::Bool(false),
            (TokenKind::SintLiteral, TokenValue::Sint(value)) => Literal::Sint(*value),
            (TokenKind::UintLiteral, TokenValue::Uint(value)) => Literal::Uint(*value),
            (TokenKind::FloatLiteral, TokenValue::Float(value)) => Literal::Float(*value),
            _ => return Maybe::NoMatch,
        };
        self.next();

        if matches!(literal, Literal::Float(_)) {
            let suffix = self.peek();
            if suffix.is_identifier() && suffix.text == "f" {
                let range = self.next().range;
                self.add_error(range, "float literals must not be suffixed with 'f'");
            }
        }
        Maybe::Matched(literal)
    }

    /// A module-scope initializer: a literal, or a type constructor whose
    /// arguments are themselves constant expressions.
    pub(crate) fn expect_const_expr(&mut self) -> Expect<ExprId> {
        let begin = self.peek_range().begin;

        match self.type_decl() {
            Maybe::Errored => return Err(Errored),
            Maybe::Matched(ty) => {
                let args = self.expect_paren_block("type constructor", |p| -> Expect<ExprRange> {
                    let mut args: SmallVec<[ExprId; 8]> = SmallVec::new();
                    while p.is_synchronized() {
                        if p.peek_is(TokenKind::ParenRight) {
                            break;
                        }
                        args.push(p.expect_const_expr()?);
                        if p.eat(TokenKind::Comma).is_none() {
                            break;
                        }
                    }
                    Ok(p.builder.create_list(args))
                })?;
                let range = self.range_from(begin);
                return Ok(self
                    .builder
                    .create(Expr::new(ExprKind::TypeConstructor { ty, args }, range)));
            }
            Maybe::NoMatch => {}
        }

        match self.const_literal() {
            Maybe::Matched(literal) => {
                let range = self.range_from(begin);
                Ok(self.builder.create(Expr::new(ExprKind::Literal(literal), range)))
            }
            Maybe::Errored => Err(Errored),
            Maybe::NoMatch => Err(self.add_error_at_peek("unable to parse constant literal")),
        }
    }
}
