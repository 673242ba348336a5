//! Statement nodes.

use crate::{CaseRange, ElseRange, ExprId, ExprRange, Range, StmtId, StmtRange, VariableId};

#[derive(Clone, Debug, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub range: Range,
}

impl Stmt {
    pub fn new(kind: StmtKind, range: Range) -> Self {
        Stmt { kind, range }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum StmtKind {
    /// `{ ... }`
    Block(StmtRange),
    /// `var` or `let` declared inside a function body.
    Variable(VariableId),
    /// `lhs = rhs;`
    Assign { lhs: ExprId, rhs: ExprId },
    /// A call used as a statement; the expression is an [`ExprKind::Call`](crate::ast::ExprKind::Call).
    Call(ExprId),
    /// `if (cond) { } else if (c) { } else { }`; `body` is a block.
    If {
        condition: ExprId,
        body: StmtId,
        else_clauses: ElseRange,
    },
    Switch { condition: ExprId, cases: CaseRange },
    /// `loop { body continuing { ... } }`. `for` loops are desugared into this.
    Loop {
        body: StmtId,
        continuing: Option<StmtId>,
    },
    Break,
    Continue,
    Discard,
    Fallthrough,
    Return(Option<ExprId>),
}

/// One `else` or `else if` arm.
#[derive(Clone, Debug, PartialEq)]
pub struct ElseClause {
    /// `None` for the final `else`.
    pub condition: Option<ExprId>,
    pub body: StmtId,
    pub range: Range,
}

/// One `case` arm, or `default` when `selectors` is empty.
#[derive(Clone, Debug, PartialEq)]
pub struct CaseClause {
    /// Integer literal expressions.
    pub selectors: ExprRange,
    pub body: StmtId,
    pub range: Range,
}

impl CaseClause {
    pub fn is_default(&self) -> bool {
        self.selectors.is_empty()
    }
}
