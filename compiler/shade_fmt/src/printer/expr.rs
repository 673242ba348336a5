//! Expressions, types, and attributes.
//!
//! Binary expressions are fully parenthesized, except where a delimiter
//! already bounds them: a whole condition, right-hand side, initializer,
//! argument, or index. Reading the output back never depends on operator
//! precedence.

use shade_ir::{
    DecorationKind, DecorationRange, ExprId, ExprKind, ExprRange, Literal, SamplerKind, TypeId,
    TypeKind,
};

use super::Printer;
use crate::emitter::Emitter;

impl<E: Emitter> Printer<'_, E> {
    /// An expression in a delimited position.
    pub(crate) fn expr(&mut self, id: ExprId) {
        let program = self.program;
        match &program[id].kind {
            ExprKind::Identifier(name) => self.name(*name),
            ExprKind::Literal(literal) => self.ctx.emit(&literal.to_string()),
            ExprKind::TypeConstructor { ty, args } => {
                self.ty(*ty);
                self.args(*args);
            }
            ExprKind::Call { callee, args } => {
                self.expr(*callee);
                self.args(*args);
            }
            ExprKind::Bitcast { ty, expr } => {
                self.ctx.emit("bitcast<");
                self.ty(*ty);
                self.ctx.emit(">");
                self.paren_expr(*expr);
            }
            ExprKind::Index { base, index } => {
                self.postfix_base(*base);
                self.ctx.emit("[");
                self.expr(*index);
                self.ctx.emit("]");
            }
            ExprKind::Member { base, member } => {
                self.postfix_base(*base);
                self.ctx.emit(".");
                self.name(*member);
            }
            ExprKind::Unary { op, operand } => {
                self.ctx.emit(op.as_str());
                // `-1` would read back as a literal, `--a` as one token.
                let wrap = match &program[*operand].kind {
                    ExprKind::Unary { .. } => true,
                    ExprKind::Literal(literal) => !matches!(literal, Literal::Bool(_)),
                    _ => false,
                };
                if wrap {
                    self.paren_expr(*operand);
                } else {
                    self.operand(*operand);
                }
            }
            ExprKind::Binary { op, lhs, rhs } => {
                self.operand(*lhs);
                self.ctx.emit(" ");
                self.ctx.emit(op.as_str());
                self.ctx.emit(" ");
                self.operand(*rhs);
            }
        }
    }

    /// `(e)`
    pub(crate) fn paren_expr(&mut self, id: ExprId) {
        self.ctx.emit("(");
        self.expr(id);
        self.ctx.emit(")");
    }

    /// An operand of an operator: binary expressions get parentheses.
    fn operand(&mut self, id: ExprId) {
        if matches!(self.program[id].kind, ExprKind::Binary { .. }) {
            self.paren_expr(id);
        } else {
            self.expr(id);
        }
    }

    /// The base of `[i]` or `.name`: anything an operator or a literal
    /// would bind differently gets parentheses.
    fn postfix_base(&mut self, id: ExprId) {
        if matches!(
            self.program[id].kind,
            ExprKind::Binary { .. } | ExprKind::Unary { .. } | ExprKind::Literal(_)
        ) {
            self.paren_expr(id);
        } else {
            self.expr(id);
        }
    }

    fn args(&mut self, args: ExprRange) {
        self.ctx.emit("(");
        self.expr_list(args);
        self.ctx.emit(")");
    }

    /// Comma separated.
    pub(crate) fn expr_list(&mut self, list: ExprRange) {
        let program = self.program;
        for (i, &expr) in program[list].iter().enumerate() {
            if i > 0 {
                self.ctx.emit(", ");
            }
            self.expr(expr);
        }
    }

    pub(crate) fn ty(&mut self, id: TypeId) {
        let program = self.program;
        match &program[id].kind {
            TypeKind::Bool => self.ctx.emit("bool"),
            TypeKind::F32 => self.ctx.emit("f32"),
            TypeKind::I32 => self.ctx.emit("i32"),
            TypeKind::U32 => self.ctx.emit("u32"),
            TypeKind::Void => self.ctx.emit("void"),
            TypeKind::Vector { width, elem } => {
                self.ctx.emit(&format!("vec{width}"));
                self.elem(*elem);
            }
            TypeKind::Matrix {
                columns,
                rows,
                elem,
            } => {
                self.ctx.emit(&format!("mat{columns}x{rows}"));
                self.elem(*elem);
            }
            TypeKind::Pointer { storage, pointee } => {
                self.ctx.emit("ptr<");
                self.ctx.emit(storage.as_str());
                self.ctx.emit(", ");
                self.ty(*pointee);
                self.ctx.emit(">");
            }
            TypeKind::Array {
                elem,
                size,
                decorations,
            } => {
                self.decorations_inline(*decorations);
                self.ctx.emit("array<");
                self.ty(*elem);
                if let Some(size) = size {
                    self.ctx.emit(&format!(", {size}"));
                }
                self.ctx.emit(">");
            }
            TypeKind::Named(name) => self.name(*name),
            TypeKind::Sampler(SamplerKind::Sampler) => self.ctx.emit("sampler"),
            TypeKind::Sampler(SamplerKind::Comparison) => self.ctx.emit("sampler_comparison"),
            TypeKind::SampledTexture { dim, elem } => {
                self.ctx.emit("texture_");
                self.ctx.emit(dim.suffix());
                self.elem(*elem);
            }
            TypeKind::MultisampledTexture { dim, elem } => {
                self.ctx.emit("texture_multisampled_");
                self.ctx.emit(dim.suffix());
                self.elem(*elem);
            }
            TypeKind::DepthTexture(dim) => {
                self.ctx.emit("texture_depth_");
                self.ctx.emit(dim.suffix());
            }
            TypeKind::StorageTexture { dim, format } => {
                self.ctx.emit("texture_storage_");
                self.ctx.emit(dim.suffix());
                self.ctx.emit("<");
                self.ctx.emit(format.as_str());
                self.ctx.emit(">");
            }
            TypeKind::ExternalTexture => self.ctx.emit("texture_external"),
            TypeKind::Access { access, ty } => {
                self.ctx.emit("@access(");
                self.ctx.emit(access.as_str());
                self.ctx.emit(") ");
                self.ty(*ty);
            }
        }
    }

    /// `<T>`
    fn elem(&mut self, elem: TypeId) {
        self.ctx.emit("<");
        self.ty(elem);
        self.ctx.emit(">");
    }

    /// Each attribute followed by a space.
    pub(crate) fn decorations_inline(&mut self, decorations: DecorationRange) {
        if decorations.is_empty() {
            return;
        }
        self.decoration_list(decorations);
        self.ctx.emit(" ");
    }

    /// Space separated `@name(args)` attributes.
    pub(crate) fn decoration_list(&mut self, decorations: DecorationRange) {
        let program = self.program;
        for (i, &id) in program[decorations].iter().enumerate() {
            if i > 0 {
                self.ctx.emit(" ");
            }
            let kind = &program[id].kind;
            self.ctx.emit("@");
            self.ctx.emit(kind.name());
            match kind {
                DecorationKind::Access(access) => self.paren_text(access.as_str()),
                DecorationKind::Builtin(builtin) => self.paren_text(builtin.as_str()),
                DecorationKind::Stage(stage) => self.paren_text(stage.as_str()),
                DecorationKind::Location(n)
                | DecorationKind::Binding(n)
                | DecorationKind::Group(n)
                | DecorationKind::Stride(n)
                | DecorationKind::Offset(n)
                | DecorationKind::Size(n)
                | DecorationKind::Align(n)
                | DecorationKind::Override(Some(n)) => self.paren_text(&n.to_string()),
                DecorationKind::WorkgroupSize { x, y, z } => {
                    self.ctx.emit("(");
                    self.expr(*x);
                    for dim in [y, z].into_iter().flatten() {
                        self.ctx.emit(", ");
                        self.expr(*dim);
                    }
                    self.ctx.emit(")");
                }
                DecorationKind::Block | DecorationKind::Override(None) => {}
            }
        }
    }

    fn paren_text(&mut self, text: &str) {
        self.ctx.emit("(");
        self.ctx.emit(text);
        self.ctx.emit(")");
    }
}
