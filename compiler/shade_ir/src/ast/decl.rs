//! Declarations: variables, functions, structs, and type aliases.

use crate::{
    AliasId, DecorationRange, ExprId, FunctionId, MemberRange, Range, StmtId, StorageClass,
    StructId, Symbol, TypeId, VariableId, VariableRange,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum VariableKind {
    /// `var` or `var<class>`.
    Var(Option<StorageClass>),
    /// `let`; always has an initializer.
    Let,
    /// Function parameter.
    Param,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Variable {
    pub name: Symbol,
    pub kind: VariableKind,
    /// `None` when the type is left to inference (`var x = 1;`).
    pub ty: Option<TypeId>,
    pub initializer: Option<ExprId>,
    pub decorations: DecorationRange,
    pub range: Range,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Function {
    pub name: Symbol,
    pub params: VariableRange,
    /// [`TypeKind::Void`](crate::TypeKind::Void) when no `->` is written.
    pub return_type: TypeId,
    pub return_decorations: DecorationRange,
    pub decorations: DecorationRange,
    /// Always a [`StmtKind::Block`](crate::StmtKind::Block).
    pub body: StmtId,
    pub range: Range,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StructMember {
    pub name: Symbol,
    pub ty: TypeId,
    pub decorations: DecorationRange,
    pub range: Range,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Struct {
    pub name: Symbol,
    pub members: MemberRange,
    pub decorations: DecorationRange,
    pub range: Range,
}

/// `type Name = T;`
#[derive(Clone, Debug, PartialEq)]
pub struct Alias {
    pub name: Symbol,
    pub ty: TypeId,
    pub range: Range,
}

/// One entry of a module's ordered declaration list.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GlobalDecl {
    Variable(VariableId),
    Function(FunctionId),
    Struct(StructId),
    Alias(AliasId),
}
