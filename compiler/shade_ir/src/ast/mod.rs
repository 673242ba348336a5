//! AST node families.
//!
//! One closed enum per syntactic category. Every node records the [`Range`]
//! it was parsed from, or [`Range::EMPTY`] when synthesized.

mod decl;
mod decoration;
mod expr;
mod stmt;
mod ty;

pub use decl::{Alias, Function, GlobalDecl, Struct, StructMember, Variable, VariableKind};
pub use decoration::{Builtin, Decoration, DecorationKind, PipelineStage};
pub use expr::{BinaryOp, Expr, ExprKind, Literal, UnaryOp};
pub use stmt::{CaseClause, ElseClause, Stmt, StmtKind};
pub use ty::{
    Access, SamplerKind, StorageClass, TexelFormat, TextureDimension, Type, TypeKind,
};

use crate::Range;

/// Nodes that carry their source range.
pub trait HasRange {
    fn range(&self) -> Range;
}

macro_rules! impl_has_range {
    ($($ty:ty),* $(,)?) => { $(
        impl HasRange for $ty {
            #[inline]
            fn range(&self) -> Range {
                self.range
            }
        }
    )* };
}

impl_has_range!(
    Expr,
    Stmt,
    Type,
    Decoration,
    Variable,
    Function,
    Struct,
    StructMember,
    Alias,
    ElseClause,
    CaseClause,
);
