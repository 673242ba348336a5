//! Deep copy of AST subtrees between programs.
//!
//! Handles are only valid in the arena that produced them, so copying a
//! node into another program re-allocates every reachable child and remaps
//! every [`Symbol`] through the destination's table. Each source node is
//! copied at most once: a child shared by two parents in the source is
//! shared by the two copies as well.

use rustc_hash::FxHashMap;

use crate::ast::{
    Alias, CaseClause, Decoration, DecorationKind, ElseClause, Expr, ExprKind, Function,
    GlobalDecl, Stmt, StmtKind, Struct, StructMember, Type, TypeKind, Variable,
};
use crate::{
    AliasId, DecorationId, DecorationRange, ExprId, ExprRange, FunctionId, Program,
    ProgramBuilder, StmtId, StmtRange, StructId, Symbol, TypeId, VariableId,
};

/// Copies nodes from `src` into `dst`.
pub struct CloneContext<'a> {
    src: &'a Program,
    dst: &'a mut ProgramBuilder,
    symbols: FxHashMap<Symbol, Symbol>,
    exprs: FxHashMap<ExprId, ExprId>,
    stmts: FxHashMap<StmtId, StmtId>,
    types: FxHashMap<TypeId, TypeId>,
    decorations: FxHashMap<DecorationId, DecorationId>,
    variables: FxHashMap<VariableId, VariableId>,
    functions: FxHashMap<FunctionId, FunctionId>,
    structs: FxHashMap<StructId, StructId>,
    aliases: FxHashMap<AliasId, AliasId>,
}

impl<'a> CloneContext<'a> {
    pub fn new(src: &'a Program, dst: &'a mut ProgramBuilder) -> Self {
        debug_assert_ne!(src.id(), dst.id(), "cloning a program into itself");
        CloneContext {
            src,
            dst,
            symbols: FxHashMap::default(),
            exprs: FxHashMap::default(),
            stmts: FxHashMap::default(),
            types: FxHashMap::default(),
            decorations: FxHashMap::default(),
            variables: FxHashMap::default(),
            functions: FxHashMap::default(),
            structs: FxHashMap::default(),
            aliases: FxHashMap::default(),
        }
    }

    /// Append every global declaration of the source module to the destination.
    pub fn clone_module(&mut self) {
        let src = self.src;
        for &decl in src.globals() {
            let cloned = self.clone_global(decl);
            self.dst.add_global(cloned);
        }
    }

    pub fn clone_global(&mut self, decl: GlobalDecl) -> GlobalDecl {
        match decl {
            GlobalDecl::Variable(id) => GlobalDecl::Variable(self.clone_variable(id)),
            GlobalDecl::Function(id) => GlobalDecl::Function(self.clone_function(id)),
            GlobalDecl::Struct(id) => GlobalDecl::Struct(self.clone_struct(id)),
            GlobalDecl::Alias(id) => GlobalDecl::Alias(self.clone_alias(id)),
        }
    }

    /// Remap a symbol by spelling into the destination table.
    pub fn clone_symbol(&mut self, symbol: Symbol) -> Symbol {
        if let Some(&mapped) = self.symbols.get(&symbol) {
            return mapped;
        }
        let src = self.src;
        let name = src.symbols().name_for(symbol);
        let mapped = self.dst.symbols_mut().register(&name);
        self.symbols.insert(symbol, mapped);
        mapped
    }

    pub fn clone_expr(&mut self, id: ExprId) -> ExprId {
        if let Some(&done) = self.exprs.get(&id) {
            return done;
        }
        let src = self.src;
        let Expr { kind, range } = &src[id];
        let kind = match *kind {
            ExprKind::Identifier(symbol) => ExprKind::Identifier(self.clone_symbol(symbol)),
            ExprKind::Literal(literal) => ExprKind::Literal(literal),
            ExprKind::TypeConstructor { ty, args } => ExprKind::TypeConstructor {
                ty: self.clone_type(ty),
                args: self.clone_exprs(args),
            },
            ExprKind::Call { callee, args } => ExprKind::Call {
                callee: self.clone_expr(callee),
                args: self.clone_exprs(args),
            },
            ExprKind::Bitcast { ty, expr } => ExprKind::Bitcast {
                ty: self.clone_type(ty),
                expr: self.clone_expr(expr),
            },
            ExprKind::Index { base, index } => ExprKind::Index {
                base: self.clone_expr(base),
                index: self.clone_expr(index),
            },
            ExprKind::Member { base, member } => ExprKind::Member {
                base: self.clone_expr(base),
                member: self.clone_symbol(member),
            },
            ExprKind::Unary { op, operand } => ExprKind::Unary {
                op,
                operand: self.clone_expr(operand),
            },
            ExprKind::Binary { op, lhs, rhs } => ExprKind::Binary {
                op,
                lhs: self.clone_expr(lhs),
                rhs: self.clone_expr(rhs),
            },
        };
        let cloned = self.dst.create(Expr::new(kind, *range));
        self.exprs.insert(id, cloned);
        cloned
    }

    fn clone_exprs(&mut self, range: ExprRange) -> ExprRange {
        let src = self.src;
        let ids: Vec<ExprId> = src[range].iter().map(|&e| self.clone_expr(e)).collect();
        self.dst.create_list(ids)
    }

    pub fn clone_stmt(&mut self, id: StmtId) -> StmtId {
        if let Some(&done) = self.stmts.get(&id) {
            return done;
        }
        let src = self.src;
        let Stmt { kind, range } = &src[id];
        let kind = match *kind {
            StmtKind::Block(stmts) => StmtKind::Block(self.clone_stmts(stmts)),
            StmtKind::Variable(var) => StmtKind::Variable(self.clone_variable(var)),
            StmtKind::Assign { lhs, rhs } => StmtKind::Assign {
                lhs: self.clone_expr(lhs),
                rhs: self.clone_expr(rhs),
            },
            StmtKind::Call(call) => StmtKind::Call(self.clone_expr(call)),
            StmtKind::If {
                condition,
                body,
                else_clauses,
            } => {
                let condition = self.clone_expr(condition);
                let body = self.clone_stmt(body);
                let clauses: Vec<ElseClause> = src[else_clauses]
                    .iter()
                    .map(|clause| ElseClause {
                        condition: clause.condition.map(|c| self.clone_expr(c)),
                        body: self.clone_stmt(clause.body),
                        range: clause.range,
                    })
                    .collect();
                StmtKind::If {
                    condition,
                    body,
                    else_clauses: self.dst.create_list(clauses),
                }
            }
            StmtKind::Switch { condition, cases } => {
                let condition = self.clone_expr(condition);
                let clauses: Vec<CaseClause> = src[cases]
                    .iter()
                    .map(|case| CaseClause {
                        selectors: self.clone_exprs(case.selectors),
                        body: self.clone_stmt(case.body),
                        range: case.range,
                    })
                    .collect();
                StmtKind::Switch {
                    condition,
                    cases: self.dst.create_list(clauses),
                }
            }
            StmtKind::Loop { body, continuing } => StmtKind::Loop {
                body: self.clone_stmt(body),
                continuing: continuing.map(|c| self.clone_stmt(c)),
            },
            StmtKind::Return(value) => StmtKind::Return(value.map(|v| self.clone_expr(v))),
            StmtKind::Break => StmtKind::Break,
            StmtKind::Continue => StmtKind::Continue,
            StmtKind::Discard => StmtKind::Discard,
            StmtKind::Fallthrough => StmtKind::Fallthrough,
        };
        let cloned = self.dst.create(Stmt::new(kind, *range));
        self.stmts.insert(id, cloned);
        cloned
    }

    fn clone_stmts(&mut self, range: StmtRange) -> StmtRange {
        let src = self.src;
        let ids: Vec<StmtId> = src[range].iter().map(|&s| self.clone_stmt(s)).collect();
        self.dst.create_list(ids)
    }

    pub fn clone_type(&mut self, id: TypeId) -> TypeId {
        if let Some(&done) = self.types.get(&id) {
            return done;
        }
        let src = self.src;
        let Type { kind, range } = &src[id];
        let kind = match *kind {
            TypeKind::Vector { width, elem } => TypeKind::Vector {
                width,
                elem: self.clone_type(elem),
            },
            TypeKind::Matrix {
                columns,
                rows,
                elem,
            } => TypeKind::Matrix {
                columns,
                rows,
                elem: self.clone_type(elem),
            },
            TypeKind::Pointer { storage, pointee } => TypeKind::Pointer {
                storage,
                pointee: self.clone_type(pointee),
            },
            TypeKind::Array {
                elem,
                size,
                decorations,
            } => TypeKind::Array {
                elem: self.clone_type(elem),
                size,
                decorations: self.clone_decorations(decorations),
            },
            TypeKind::Named(symbol) => TypeKind::Named(self.clone_symbol(symbol)),
            TypeKind::SampledTexture { dim, elem } => TypeKind::SampledTexture {
                dim,
                elem: self.clone_type(elem),
            },
            TypeKind::MultisampledTexture { dim, elem } => TypeKind::MultisampledTexture {
                dim,
                elem: self.clone_type(elem),
            },
            TypeKind::Access { access, ty } => TypeKind::Access {
                access,
                ty: self.clone_type(ty),
            },
            ref leaf @ (TypeKind::Bool
            | TypeKind::F32
            | TypeKind::I32
            | TypeKind::U32
            | TypeKind::Void
            | TypeKind::Sampler(_)
            | TypeKind::DepthTexture(_)
            | TypeKind::StorageTexture { .. }
            | TypeKind::ExternalTexture) => leaf.clone(),
        };
        let cloned = self.dst.create(Type::new(kind, *range));
        self.types.insert(id, cloned);
        cloned
    }

    pub fn clone_decoration(&mut self, id: DecorationId) -> DecorationId {
        if let Some(&done) = self.decorations.get(&id) {
            return done;
        }
        let src = self.src;
        let Decoration { kind, range } = &src[id];
        let kind = match *kind {
            DecorationKind::WorkgroupSize { x, y, z } => DecorationKind::WorkgroupSize {
                x: self.clone_expr(x),
                y: y.map(|e| self.clone_expr(e)),
                z: z.map(|e| self.clone_expr(e)),
            },
            ref other => other.clone(),
        };
        let cloned = self.dst.create(Decoration::new(kind, *range));
        self.decorations.insert(id, cloned);
        cloned
    }

    fn clone_decorations(&mut self, range: DecorationRange) -> DecorationRange {
        let src = self.src;
        let ids: Vec<DecorationId> = src[range]
            .iter()
            .map(|&d| self.clone_decoration(d))
            .collect();
        self.dst.create_list(ids)
    }

    pub fn clone_variable(&mut self, id: VariableId) -> VariableId {
        if let Some(&done) = self.variables.get(&id) {
            return done;
        }
        let src = self.src;
        let var = &src[id];
        let cloned = Variable {
            name: self.clone_symbol(var.name),
            kind: var.kind,
            ty: var.ty.map(|t| self.clone_type(t)),
            initializer: var.initializer.map(|e| self.clone_expr(e)),
            decorations: self.clone_decorations(var.decorations),
            range: var.range,
        };
        let cloned = self.dst.create(cloned);
        self.variables.insert(id, cloned);
        cloned
    }

    pub fn clone_function(&mut self, id: FunctionId) -> FunctionId {
        if let Some(&done) = self.functions.get(&id) {
            return done;
        }
        let src = self.src;
        let func = &src[id];
        let params: Vec<VariableId> = src[func.params]
            .iter()
            .map(|&p| self.clone_variable(p))
            .collect();
        let cloned = Function {
            name: self.clone_symbol(func.name),
            params: self.dst.create_list(params),
            return_type: self.clone_type(func.return_type),
            return_decorations: self.clone_decorations(func.return_decorations),
            decorations: self.clone_decorations(func.decorations),
            body: self.clone_stmt(func.body),
            range: func.range,
        };
        let cloned = self.dst.create(cloned);
        self.functions.insert(id, cloned);
        cloned
    }

    pub fn clone_struct(&mut self, id: StructId) -> StructId {
        if let Some(&done) = self.structs.get(&id) {
            return done;
        }
        let src = self.src;
        let decl = &src[id];
        let members: Vec<StructMember> = src[decl.members]
            .iter()
            .map(|m| StructMember {
                name: self.clone_symbol(m.name),
                ty: self.clone_type(m.ty),
                decorations: self.clone_decorations(m.decorations),
                range: m.range,
            })
            .collect();
        let cloned = Struct {
            name: self.clone_symbol(decl.name),
            members: self.dst.create_list(members),
            decorations: self.clone_decorations(decl.decorations),
            range: decl.range,
        };
        let cloned = self.dst.create(cloned);
        self.structs.insert(id, cloned);
        cloned
    }

    pub fn clone_alias(&mut self, id: AliasId) -> AliasId {
        if let Some(&done) = self.aliases.get(&id) {
            return done;
        }
        let src = self.src;
        let alias = &src[id];
        let cloned = Alias {
            name: self.clone_symbol(alias.name),
            ty: self.clone_type(alias.ty),
            range: alias.range,
        };
        let cloned = self.dst.create(cloned);
        self.aliases.insert(id, cloned);
        cloned
    }
}

/// Copy all of `src`'s declarations to the end of `dst`'s module.
pub fn clone_program_into(src: &Program, dst: &mut ProgramBuilder) {
    CloneContext::new(src, dst).clone_module();
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests use unwrap for brevity")]
mod tests;
