#![allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use pretty_assertions::assert_eq;
use serde_json::json;

use super::*;

fn ident(name: &str) -> ExprBeh {
    ExprBeh::Ident {
        ident: name.into(),
    }
}

#[test]
fn chain_nests_to_the_right() {
    let stmts = vec![
        StmtBeh::Become { expr: ident("a") },
        StmtBeh::Throw { expr: ident("b") },
    ];
    let chain = StmtBeh::chain(stmts.clone());
    assert_eq!(chain.tag(), "stmt_pair");
    assert_eq!(chain.iter().cloned().collect::<Vec<_>>(), stmts);
    assert_eq!(StmtBeh::chain(Vec::new()), StmtBeh::Empty);
    assert_eq!(StmtBeh::Empty.iter().count(), 0);
}

#[test]
fn nodes_serialize_with_beh_tags() {
    let block = ExprBeh::Block {
        vars: vec!["out".into()],
        stmt: Box::new(StmtBeh::chain(vec![StmtBeh::Send {
            msg: ExprBeh::Const { value: Const::False },
            to: ident("out"),
        }])),
    };
    assert_eq!(
        serde_json::to_value(&block).unwrap(),
        json!({
            "beh": "block_expr",
            "vars": ["out"],
            "stmt": {
                "beh": "stmt_pair",
                "head": {
                    "beh": "send_stmt",
                    "msg": {"beh": "const_expr", "value": false},
                    "to": {"beh": "ident_expr", "ident": "out"}
                },
                "tail": {"beh": "empty_stmt"}
            }
        })
    );
}

#[test]
fn equations_and_patterns_serialize() {
    let eqtn = EqtnBeh {
        left: PtrnBeh::Const { value: Const::Nil },
        right: PtrnBeh::Value {
            expr: ExprBeh::Const {
                value: Const::Undefined,
            },
        },
    };
    assert_eq!(eqtn.tag(), "eqtn");
    assert_eq!(
        serde_json::to_value(&eqtn).unwrap(),
        json!({
            "beh": "eqtn",
            "left": {"beh": "const_ptrn", "value": null},
            "right": {"beh": "value_ptrn", "expr": {"beh": "const_expr", "value": "?"}}
        })
    );
}

#[test]
fn case_chains_end_in_case_end() {
    let case = ExprBeh::Case {
        expr: Box::new(ident("x")),
        next: Box::new(CaseBeh::Choice {
            ptrn: PtrnBeh::Any,
            expr: ExprBeh::SelfRef,
            next: Box::new(CaseBeh::End),
        }),
    };
    assert_eq!(
        serde_json::to_value(&case).unwrap(),
        json!({
            "beh": "case_expr",
            "expr": {"beh": "ident_expr", "ident": "x"},
            "next": {
                "beh": "case_choice",
                "ptrn": {"beh": "any_ptrn"},
                "expr": {"beh": "self_expr"},
                "next": {"beh": "case_end"}
            }
        })
    );
}
