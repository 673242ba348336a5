//! Tree walk from a [`Program`] to source text.
//!
//! - `mod.rs`: module-scope declarations
//! - `stmt`: statements and blocks
//! - `expr`: expressions, types, and attributes

mod expr;
mod stmt;

use shade_ir::{
    Alias, DecorationRange, Function, GlobalDecl, Program, Struct, Symbol, TypeKind, Variable,
    VariableKind,
};

use crate::context::FormatContext;
use crate::emitter::{Emitter, StringEmitter};

/// Prints one program. Every declaration and statement starts on its own
/// line; nothing is ever wrapped.
pub struct Printer<'p, E: Emitter = StringEmitter> {
    program: &'p Program,
    ctx: FormatContext<E>,
}

impl<'p> Printer<'p, StringEmitter> {
    pub fn new(program: &'p Program) -> Self {
        Self::with_context(program, FormatContext::new())
    }
}

impl<'p, E: Emitter> Printer<'p, E> {
    pub fn with_context(program: &'p Program, ctx: FormatContext<E>) -> Self {
        Printer { program, ctx }
    }

    pub fn into_context(self) -> FormatContext<E> {
        self.ctx
    }

    /// All global declarations in source order, one blank line apart.
    pub fn print_module(&mut self) {
        let program = self.program;
        for (i, decl) in program.globals().iter().enumerate() {
            if i > 0 {
                self.ctx.emit_newline();
            }
            self.global(*decl);
            self.ctx.emit_newline();
        }
    }

    fn global(&mut self, decl: GlobalDecl) {
        let program = self.program;
        match decl {
            GlobalDecl::Variable(id) => {
                self.variable(&program[id]);
                self.ctx.emit(";");
            }
            GlobalDecl::Function(id) => self.function(&program[id]),
            GlobalDecl::Struct(id) => self.struct_decl(&program[id]),
            GlobalDecl::Alias(id) => self.alias(&program[id]),
        }
    }

    fn name(&mut self, symbol: Symbol) {
        let program = self.program;
        self.ctx.emit(&program.name_for(symbol));
    }

    /// A variable up to, but not including, any `;`. Parameters print as
    /// `name : T` with their attributes in front.
    pub(crate) fn variable(&mut self, var: &Variable) {
        self.decorations_inline(var.decorations);
        match var.kind {
            VariableKind::Var(None) => self.ctx.emit("var "),
            VariableKind::Var(Some(class)) => {
                self.ctx.emit("var<");
                self.ctx.emit(class.as_str());
                self.ctx.emit("> ");
            }
            VariableKind::Let => self.ctx.emit("let "),
            VariableKind::Param => {}
        }
        self.name(var.name);
        if let Some(ty) = var.ty {
            self.ctx.emit(" : ");
            self.ty(ty);
        }
        if let Some(init) = var.initializer {
            self.ctx.emit(" = ");
            self.expr(init);
        }
    }

    /// Attributes on their own line, as written above functions and structs.
    fn decorations_above(&mut self, decorations: DecorationRange) {
        if decorations.is_empty() {
            return;
        }
        self.decoration_list(decorations);
        self.ctx.emit_newline_indent();
    }

    fn function(&mut self, function: &Function) {
        let program = self.program;
        self.decorations_above(function.decorations);
        self.ctx.emit("fn ");
        self.name(function.name);
        self.ctx.emit("(");
        for (i, &param) in program[function.params].iter().enumerate() {
            if i > 0 {
                self.ctx.emit(", ");
            }
            self.variable(&program[param]);
        }
        self.ctx.emit(")");

        let is_void = matches!(program[function.return_type].kind, TypeKind::Void);
        if !is_void || !function.return_decorations.is_empty() {
            self.ctx.emit(" -> ");
            self.decorations_inline(function.return_decorations);
            self.ty(function.return_type);
        }
        self.ctx.emit(" ");
        self.block(function.body);
    }

    fn struct_decl(&mut self, decl: &Struct) {
        let program = self.program;
        self.decorations_above(decl.decorations);
        self.ctx.emit("struct ");
        self.name(decl.name);
        self.ctx.emit(" {");
        self.ctx.indent();
        for member in &program[decl.members] {
            self.ctx.emit_newline_indent();
            self.decorations_inline(member.decorations);
            self.name(member.name);
            self.ctx.emit(" : ");
            self.ty(member.ty);
            self.ctx.emit(";");
        }
        self.ctx.dedent();
        self.ctx.emit_newline_indent();
        self.ctx.emit("};");
    }

    fn alias(&mut self, alias: &Alias) {
        self.ctx.emit("type ");
        self.name(alias.name);
        self.ctx.emit(" = ");
        self.ty(alias.ty);
        self.ctx.emit(";");
    }
}
