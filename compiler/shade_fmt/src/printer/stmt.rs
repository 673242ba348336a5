//! Statements.
//!
//! Loops print in their desugared form: a `for` comes back out as a block
//! holding its initializer and a `loop`.

use shade_ir::{CaseRange, ElseRange, ExprId, StmtId, StmtKind};

use super::Printer;
use crate::emitter::Emitter;

impl<E: Emitter> Printer<'_, E> {
    /// `{`, the statements of `block` one level deeper, and `}`. The caller
    /// has already emitted whatever precedes the brace.
    pub(crate) fn block(&mut self, block: StmtId) {
        self.ctx.emit("{");
        self.block_contents(block);
        self.ctx.emit_newline_indent();
        self.ctx.emit("}");
    }

    /// Statements of a block, each on a new line one level deeper. A
    /// statement that is not a block prints as if it were the only one.
    fn block_contents(&mut self, block: StmtId) {
        let program = self.program;
        self.ctx.indent();
        match program[block].kind {
            StmtKind::Block(stmts) => {
                for &stmt in &program[stmts] {
                    self.ctx.emit_newline_indent();
                    self.stmt(stmt);
                }
            }
            _ => {
                self.ctx.emit_newline_indent();
                self.stmt(block);
            }
        }
        self.ctx.dedent();
    }

    pub(crate) fn stmt(&mut self, id: StmtId) {
        let program = self.program;
        match &program[id].kind {
            StmtKind::Block(_) => self.block(id),
            StmtKind::Variable(var) => {
                self.variable(&program[*var]);
                self.ctx.emit(";");
            }
            StmtKind::Assign { lhs, rhs } => {
                self.expr(*lhs);
                self.ctx.emit(" = ");
                self.expr(*rhs);
                self.ctx.emit(";");
            }
            StmtKind::Call(call) => {
                self.expr(*call);
                self.ctx.emit(";");
            }
            StmtKind::If {
                condition,
                body,
                else_clauses,
            } => self.if_stmt(*condition, *body, *else_clauses),
            StmtKind::Switch { condition, cases } => self.switch_stmt(*condition, *cases),
            StmtKind::Loop { body, continuing } => {
                self.ctx.emit("loop {");
                self.block_contents(*body);
                if let Some(continuing) = continuing {
                    self.ctx.indent();
                    self.ctx.emit_newline_indent();
                    self.ctx.emit("continuing ");
                    self.block(*continuing);
                    self.ctx.dedent();
                }
                self.ctx.emit_newline_indent();
                self.ctx.emit("}");
            }
            StmtKind::Break => self.ctx.emit("break;"),
            StmtKind::Continue => self.ctx.emit("continue;"),
            StmtKind::Discard => self.ctx.emit("discard;"),
            StmtKind::Fallthrough => self.ctx.emit("fallthrough;"),
            StmtKind::Return(None) => self.ctx.emit("return;"),
            StmtKind::Return(Some(value)) => {
                self.ctx.emit("return ");
                self.expr(*value);
                self.ctx.emit(";");
            }
        }
    }

    fn if_stmt(&mut self, condition: ExprId, body: StmtId, else_clauses: ElseRange) {
        let program = self.program;
        self.ctx.emit("if ");
        self.paren_expr(condition);
        self.ctx.emit(" ");
        self.block(body);
        for clause in &program[else_clauses] {
            match clause.condition {
                Some(condition) => {
                    self.ctx.emit(" else if ");
                    self.paren_expr(condition);
                    self.ctx.emit(" ");
                }
                None => self.ctx.emit(" else "),
            }
            self.block(clause.body);
        }
    }

    fn switch_stmt(&mut self, condition: ExprId, cases: CaseRange) {
        let program = self.program;
        self.ctx.emit("switch ");
        self.paren_expr(condition);
        self.ctx.emit(" {");
        self.ctx.indent();
        for case in &program[cases] {
            self.ctx.emit_newline_indent();
            if case.is_default() {
                self.ctx.emit("default");
            } else {
                self.ctx.emit("case ");
                self.expr_list(case.selectors);
            }
            self.ctx.emit(": ");
            self.block(case.body);
        }
        self.ctx.dedent();
        self.ctx.emit_newline_indent();
        self.ctx.emit("}");
    }
}
