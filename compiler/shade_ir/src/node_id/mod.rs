//! Arena handles.
//!
//! Nodes never own children by value; they hold a `u32` handle into the arena
//! of the program that allocated them. List-valued children (call arguments,
//! block statements, decoration lists) are a `start..start+len` window into a
//! flattened side table of the arena.

/// Defines a `Copy` handle type indexing one node table of the arena.
macro_rules! define_id {
    ($($(#[$meta:meta])* $name:ident),* $(,)?) => { $(
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            #[inline]
            pub const fn new(index: u32) -> Self {
                Self(index)
            }

            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }

            #[inline]
            pub const fn raw(self) -> u32 {
                self.0
            }
        }

        impl ::std::fmt::Debug for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    )* };
}

/// Defines a window into one of the arena's flattened list tables.
macro_rules! define_range {
    ($($(#[$meta:meta])* $name:ident),* $(,)?) => { $(
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
        pub struct $name {
            pub start: u32,
            pub len: u32,
        }

        impl $name {
            pub const EMPTY: Self = Self { start: 0, len: 0 };

            #[inline]
            pub const fn new(start: u32, len: u32) -> Self {
                Self { start, len }
            }

            #[inline]
            pub const fn is_empty(&self) -> bool {
                self.len == 0
            }

            #[inline]
            pub const fn len(&self) -> usize {
                self.len as usize
            }

            #[inline]
            pub(crate) const fn bounds(&self) -> ::std::ops::Range<usize> {
                self.start as usize..(self.start + self.len) as usize
            }
        }

        impl ::std::fmt::Debug for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, "{}({}..{})", stringify!($name), self.start, self.start + self.len)
            }
        }
    )* };
}

define_id!(
    /// Handle to an [`Expr`](crate::ast::Expr).
    ExprId,
    /// Handle to a [`Stmt`](crate::ast::Stmt).
    StmtId,
    /// Handle to a [`Type`](crate::ast::Type).
    TypeId,
    /// Handle to a [`Decoration`](crate::ast::Decoration).
    DecorationId,
    /// Handle to a [`Variable`](crate::ast::Variable).
    VariableId,
    /// Handle to a [`Function`](crate::ast::Function).
    FunctionId,
    /// Handle to a [`Struct`](crate::ast::Struct).
    StructId,
    /// Handle to an [`Alias`](crate::ast::Alias).
    AliasId,
);

define_range!(
    /// Call arguments, constructor arguments, case selectors.
    ExprRange,
    /// Block contents.
    StmtRange,
    /// Decorations attached to one declaration or array type.
    DecorationRange,
    /// Function parameters.
    VariableRange,
    /// Struct members.
    MemberRange,
    /// `else` / `else if` clauses of one `if`.
    ElseRange,
    /// `case` / `default` clauses of one `switch`.
    CaseRange,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_roundtrip() {
        let id = ExprId::new(7);
        assert_eq!(id.index(), 7);
        assert_eq!(id.raw(), 7);
        assert_eq!(format!("{id:?}"), "ExprId(7)");
    }

    #[test]
    fn test_range_bounds() {
        let r = StmtRange::new(3, 2);
        assert_eq!(r.len(), 2);
        assert!(!r.is_empty());
        assert_eq!(r.bounds(), 3..5);
        assert!(StmtRange::EMPTY.is_empty());
        assert_eq!(format!("{r:?}"), "StmtRange(3..5)");
    }
}
