#![allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use humus_ir::{Eqtn, Number, Ptrn};
use pretty_assertions::assert_eq;

use super::*;

fn let_stmt(left: Ptrn) -> Stmt {
    Stmt::Let {
        eqtn: Eqtn {
            left,
            right: Ptrn::Value {
                expr: Expr::ident("v"),
            },
        },
    }
}

fn block_vars(beh: &ExprBeh) -> &[String] {
    match beh {
        ExprBeh::Block { vars, .. } | ExprBeh::Let { vars, .. } => vars,
        other => panic!("no scope on {}", other.tag()),
    }
}

#[test]
fn first_binding_wins() {
    let stmts = vec![
        Stmt::Create {
            ident: "a".into(),
            expr: Expr::SelfRef,
        },
        let_stmt(Ptrn::ident("b")),
        let_stmt(Ptrn::pair(Ptrn::ident("a"), Ptrn::ident("c"))),
    ];
    let block = Lowerer::new().lower_block(&stmts).unwrap();
    assert_eq!(block_vars(&block), ["a", "b", "c"]);
}

#[test]
fn nested_blocks_keep_their_own_vars() {
    let inner = Expr::Block {
        stmts: vec![let_stmt(Ptrn::ident("inner"))],
    };
    let stmts = vec![
        let_stmt(Ptrn::ident("outer")),
        Stmt::Become {
            expr: Expr::abs(Ptrn::ident("param"), inner),
        },
    ];
    let block = Lowerer::new().lower_block(&stmts).unwrap();
    assert_eq!(block_vars(&block), ["outer"]);

    let ExprBeh::Block { stmt, .. } = &block else {
        panic!("expected a block");
    };
    let Some(StmtBeh::Become { expr }) = stmt.iter().nth(1) else {
        panic!("expected BECOME");
    };
    let ExprBeh::Abs { body, .. } = expr else {
        panic!("expected an abstraction");
    };
    assert_eq!(block_vars(body), ["inner"]);
}

#[test]
fn let_in_declares_its_own_names() {
    let expr = Expr::LetIn {
        eqtn: Box::new(Eqtn {
            left: Ptrn::ident("x"),
            right: Ptrn::Any,
        }),
        expr: Box::new(Expr::ident("x")),
    };
    let block = Lowerer::new()
        .lower_block(&[Stmt::Expr { expr }])
        .unwrap();
    assert!(block_vars(&block).is_empty());

    let ExprBeh::Block { stmt, .. } = &block else {
        panic!("expected a block");
    };
    let Some(StmtBeh::Expr { expr }) = stmt.iter().next() else {
        panic!("expected an expression statement");
    };
    assert_eq!(block_vars(expr), ["x"]);
}

#[test]
fn conditional_patterns_declare_nothing() {
    let expr = Expr::If {
        eqtn: Box::new(Eqtn {
            left: Ptrn::ident("x"),
            right: Ptrn::ident("y"),
        }),
        expr: Box::new(Expr::ident("x")),
        next: None,
    };
    let block = Lowerer::new()
        .lower_block(&[Stmt::Expr { expr }])
        .unwrap();
    assert!(block_vars(&block).is_empty());
}

#[test]
fn statements_outside_blocks_declare_nowhere() {
    let mut lowerer = Lowerer::new();
    let stmt = lowerer.lower_stmt(&let_stmt(Ptrn::ident("x"))).unwrap();
    assert_eq!(stmt.tag(), "let_stmt");
    assert!(lowerer.scopes.is_empty());
}

#[test]
fn literal_patterns_are_checked() {
    let bad = Ptrn::Literal {
        value: Literal::Number(Number::new(None, 8, "9")),
    };
    let error = Lowerer::new().lower_ptrn(&bad, false).unwrap_err();
    assert_eq!(
        error,
        CodegenError::InvalidNumber {
            literal: "8#9".into()
        }
    );
}

#[test]
fn long_pair_chains_lower() {
    let expr = (0..5_000).fold(Expr::constant(Const::Nil), |tail, i| {
        Expr::pair(Expr::ident(format!("x{i}")), tail)
    });
    let lowered = Lowerer::new().lower_expr(&expr).unwrap();
    assert_eq!(lowered.tag(), "pair_expr");
}
