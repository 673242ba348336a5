//! Shade IR: source locations, interned symbols, and the flat AST.
//!
//! - **Handles, not pointers**: children are `ExprId`/`StmtId`/... indices
//!   into the [`AstArena`] of the owning program
//! - **Intern identifiers**: names are [`Symbol`]s scoped to one program
//! - **Closed node families**: one enum per syntactic category, matched
//!   exhaustively wherever behavior depends on node kind
//!
//! Copying a tree into another program goes through [`CloneContext`], which
//! rewrites every handle and symbol for the destination.

mod arena;
pub mod ast;
mod clone;
mod node_id;
mod program;
mod source;
mod symbol;

pub use arena::{ArenaList, ArenaNode, AstArena};
pub use ast::*;
pub use clone::{clone_program_into, CloneContext};
pub use node_id::{
    AliasId, CaseRange, DecorationId, DecorationRange, ElseRange, ExprId, ExprRange, FunctionId,
    MemberRange, StmtId, StmtRange, StructId, TypeId, VariableId, VariableRange,
};
pub use program::{Module, Program, ProgramBuilder};
pub use source::{Location, Range, Source, SourceFile};
pub use symbol::{ProgramId, Symbol, SymbolTable};
