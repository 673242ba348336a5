//! Arena allocation for the flat AST.
//!
//! - Contiguous storage per node family
//! - Child references are typed `u32` handles
//! - List children are windows into flattened side tables
//! - Nodes are never freed individually; dropping the arena frees everything
//!
//! Lookup goes through `Index`: `&arena[expr_id]` yields an [`Expr`] and
//! `&arena[args]` (an [`ExprRange`]) yields a `&[ExprId]`.

use std::ops::Index;

use crate::ast::{
    Alias, CaseClause, Decoration, ElseClause, Expr, Function, Stmt, Struct, StructMember, Type,
    Variable,
};
use crate::{
    AliasId, CaseRange, DecorationId, DecorationRange, ElseRange, ExprId, ExprRange, FunctionId,
    MemberRange, StmtId, StmtRange, StructId, TypeId, VariableId, VariableRange,
};

/// A node family with its own table in the arena.
pub trait ArenaNode: Sized {
    type Id: Copy;

    fn alloc(arena: &mut AstArena, node: Self) -> Self::Id;
}

/// An element type of one of the arena's flattened list tables.
pub trait ArenaList: Sized {
    type Range: Copy;

    fn alloc_list(arena: &mut AstArena, items: impl IntoIterator<Item = Self>) -> Self::Range;
}

/// Contiguous storage for every node of one program.
#[derive(Clone, Debug, Default)]
pub struct AstArena {
    exprs: Vec<Expr>,
    stmts: Vec<Stmt>,
    types: Vec<Type>,
    decorations: Vec<Decoration>,
    variables: Vec<Variable>,
    functions: Vec<Function>,
    structs: Vec<Struct>,
    aliases: Vec<Alias>,

    expr_lists: Vec<ExprId>,
    stmt_lists: Vec<StmtId>,
    decoration_lists: Vec<DecorationId>,
    variable_lists: Vec<VariableId>,
    members: Vec<StructMember>,
    else_clauses: Vec<ElseClause>,
    cases: Vec<CaseClause>,
}

/// Convert a table length into a handle index.
#[inline]
#[allow(
    clippy::cast_possible_truncation,
    reason = "arena tables are bounded well below u32::MAX by source size"
)]
fn next_index(len: usize) -> u32 {
    debug_assert!(u32::try_from(len).is_ok(), "arena table overflow");
    len as u32
}

macro_rules! arena_nodes {
    ($($field:ident: $node:ty => $id:ident),* $(,)?) => { $(
        impl ArenaNode for $node {
            type Id = $id;

            #[inline]
            fn alloc(arena: &mut AstArena, node: Self) -> $id {
                let id = $id::new(next_index(arena.$field.len()));
                arena.$field.push(node);
                id
            }
        }

        impl Index<$id> for AstArena {
            type Output = $node;

            #[inline]
            #[track_caller]
            fn index(&self, id: $id) -> &$node {
                &self.$field[id.index()]
            }
        }
    )* };
}

macro_rules! arena_lists {
    ($($field:ident: $item:ty => $range:ident),* $(,)?) => { $(
        impl ArenaList for $item {
            type Range = $range;

            fn alloc_list(arena: &mut AstArena, items: impl IntoIterator<Item = Self>) -> $range {
                let start = next_index(arena.$field.len());
                arena.$field.extend(items);
                let len = next_index(arena.$field.len()) - start;
                $range::new(start, len)
            }
        }

        impl Index<$range> for AstArena {
            type Output = [$item];

            #[inline]
            #[track_caller]
            fn index(&self, range: $range) -> &[$item] {
                &self.$field[range.bounds()]
            }
        }
    )* };
}

arena_nodes!(
    exprs: Expr => ExprId,
    stmts: Stmt => StmtId,
    types: Type => TypeId,
    decorations: Decoration => DecorationId,
    variables: Variable => VariableId,
    functions: Function => FunctionId,
    structs: Struct => StructId,
    aliases: Alias => AliasId,
);

arena_lists!(
    expr_lists: ExprId => ExprRange,
    stmt_lists: StmtId => StmtRange,
    decoration_lists: DecorationId => DecorationRange,
    variable_lists: VariableId => VariableRange,
    members: StructMember => MemberRange,
    else_clauses: ElseClause => ElseRange,
    cases: CaseClause => CaseRange,
);

impl AstArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-size the node tables from the source length.
    /// Heuristic: about one expression per 16 bytes of source.
    pub fn with_capacity(source_len: usize) -> Self {
        let estimated = source_len / 16;
        AstArena {
            exprs: Vec::with_capacity(estimated),
            expr_lists: Vec::with_capacity(estimated / 2),
            stmts: Vec::with_capacity(estimated / 4),
            stmt_lists: Vec::with_capacity(estimated / 4),
            types: Vec::with_capacity(estimated / 8),
            ..Self::default()
        }
    }

    /// Allocate a node, returning its handle.
    #[inline]
    pub fn alloc<N: ArenaNode>(&mut self, node: N) -> N::Id {
        N::alloc(self, node)
    }

    /// Allocate a list of children contiguously, returning its window.
    #[inline]
    pub fn alloc_list<T: ArenaList>(&mut self, items: impl IntoIterator<Item = T>) -> T::Range {
        T::alloc_list(self, items)
    }

    pub fn expr_count(&self) -> usize {
        self.exprs.len()
    }

    pub fn stmt_count(&self) -> usize {
        self.stmts.len()
    }

    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    /// Total number of allocated nodes across all families.
    pub fn node_count(&self) -> usize {
        self.exprs.len()
            + self.stmts.len()
            + self.types.len()
            + self.decorations.len()
            + self.variables.len()
            + self.functions.len()
            + self.structs.len()
            + self.aliases.len()
    }
}
