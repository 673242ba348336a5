use super::*;
use crate::ast::{BinaryOp, Literal, VariableKind};
use crate::{Range, VariableRange};
use pretty_assertions::assert_eq;

/// `fn f() { let x = a + a; }` where both operands share one identifier node.
fn source_program() -> (Program, ExprId) {
    let mut b = ProgramBuilder::new();
    // Pad the source table so symbol indices differ from the destination's.
    b.sym("unused_padding");
    let a = b.sym("a");
    let ident = b.create(Expr::new(ExprKind::Identifier(a), Range::EMPTY));
    let sum = b.create(Expr::new(
        ExprKind::Binary {
            op: BinaryOp::Add,
            lhs: ident,
            rhs: ident,
        },
        Range::EMPTY,
    ));
    let x = b.sym("x");
    let var = b.create(Variable {
        name: x,
        kind: VariableKind::Let,
        ty: None,
        initializer: Some(sum),
        decorations: DecorationRange::EMPTY,
        range: Range::EMPTY,
    });
    let decl = b.create(Stmt::new(StmtKind::Variable(var), Range::EMPTY));
    let stmts = b.create_list(vec![decl]);
    let body = b.create(Stmt::new(StmtKind::Block(stmts), Range::EMPTY));
    let void = b.create(Type::new(TypeKind::Void, Range::EMPTY));
    let name = b.sym("f");
    let f = b.create(Function {
        name,
        params: VariableRange::EMPTY,
        return_type: void,
        return_decorations: DecorationRange::EMPTY,
        decorations: DecorationRange::EMPTY,
        body,
        range: Range::EMPTY,
    });
    b.add_global(GlobalDecl::Function(f));
    (b.build(), sum)
}

#[test]
fn test_clone_module_remaps_symbols() {
    let (src, _) = source_program();
    let mut dst = ProgramBuilder::new();
    let existing_a = dst.sym("a");

    clone_program_into(&src, &mut dst);
    let dst = dst.build();

    let f = dst.function("f").unwrap();
    assert_eq!(f.name.program(), dst.id());
    let StmtKind::Block(stmts) = dst[f.body].kind else {
        panic!("function body is not a block");
    };
    let StmtKind::Variable(var) = dst[dst[stmts][0]].kind else {
        panic!("expected a variable statement");
    };
    let init = dst[var].initializer.unwrap();
    let ExprKind::Binary { lhs, .. } = dst[init].kind else {
        panic!("expected a binary expression");
    };
    // `a` maps onto the destination's pre-existing symbol.
    assert_eq!(dst[lhs].kind, ExprKind::Identifier(existing_a));
    assert_eq!(dst.name_for(dst[var].name), "x");
}

#[test]
fn test_clone_preserves_sharing() {
    let (src, sum) = source_program();
    let mut dst = ProgramBuilder::new();
    let cloned = CloneContext::new(&src, &mut dst).clone_expr(sum);

    let ExprKind::Binary { lhs, rhs, .. } = dst[cloned].kind else {
        panic!("expected a binary expression");
    };
    assert_eq!(lhs, rhs);
    assert_eq!(dst.arena().expr_count(), 2);
}

#[test]
fn test_clone_twice_is_memoized() {
    let (src, sum) = source_program();
    let mut dst = ProgramBuilder::new();
    let mut ctx = CloneContext::new(&src, &mut dst);
    let first = ctx.clone_expr(sum);
    let second = ctx.clone_expr(sum);
    assert_eq!(first, second);
}

#[test]
fn test_clone_literals_and_types() {
    let mut b = ProgramBuilder::new();
    let f32_ty = b.create(Type::new(TypeKind::F32, Range::EMPTY));
    let vec = b.create(Type::new(
        TypeKind::Vector {
            width: 3,
            elem: f32_ty,
        },
        Range::EMPTY,
    ));
    let one = b.create(Expr::new(ExprKind::Literal(Literal::Float(1.0)), Range::EMPTY));
    let args = b.create_list(vec![one, one, one]);
    let ctor = b.create(Expr::new(
        ExprKind::TypeConstructor { ty: vec, args },
        Range::EMPTY,
    ));
    let src = b.build();

    let mut dst = ProgramBuilder::new();
    let cloned = CloneContext::new(&src, &mut dst).clone_expr(ctor);
    let ExprKind::TypeConstructor { ty, args } = dst[cloned].kind else {
        panic!("expected a type constructor");
    };
    let TypeKind::Vector { width, elem } = dst[ty].kind else {
        panic!("expected a vector type");
    };
    assert_eq!(width, 3);
    assert_eq!(dst[elem].kind, TypeKind::F32);
    assert_eq!(dst[args].len(), 3);
    assert_eq!(dst[dst[args][0]].kind, ExprKind::Literal(Literal::Float(1.0)));
}
