//! Behavior tree: the lowered form of a Humus program.
//!
//! Every node carries a `beh` tag naming the runtime behavior that evaluates
//! it (`send_stmt`, `app_expr`, `ident_ptrn`, ...). Statement lists are
//! right-nested [`StmtBeh::Pair`] chains ending in [`StmtBeh::Empty`], and
//! case arms are [`CaseBeh::Choice`] chains ending in [`CaseBeh::End`].

use serde::Serialize;

use crate::ast::{Const, Literal};

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "beh")]
pub enum StmtBeh {
    #[serde(rename = "stmt_pair")]
    Pair {
        head: Box<StmtBeh>,
        tail: Box<StmtBeh>,
    },
    #[serde(rename = "empty_stmt")]
    Empty,
    #[serde(rename = "expr_stmt")]
    Expr { expr: ExprBeh },
    #[serde(rename = "let_stmt")]
    Let { eqtn: EqtnBeh },
    #[serde(rename = "send_stmt")]
    Send { msg: ExprBeh, to: ExprBeh },
    #[serde(rename = "after_send_stmt")]
    AfterSend {
        dt: ExprBeh,
        msg: ExprBeh,
        to: ExprBeh,
    },
    #[serde(rename = "create_stmt")]
    Create { ident: String, expr: ExprBeh },
    #[serde(rename = "become_stmt")]
    Become { expr: ExprBeh },
    #[serde(rename = "throw_stmt")]
    Throw { expr: ExprBeh },
}

impl StmtBeh {
    pub fn tag(&self) -> &'static str {
        match self {
            StmtBeh::Pair { .. } => "stmt_pair",
            StmtBeh::Empty => "empty_stmt",
            StmtBeh::Expr { .. } => "expr_stmt",
            StmtBeh::Let { .. } => "let_stmt",
            StmtBeh::Send { .. } => "send_stmt",
            StmtBeh::AfterSend { .. } => "after_send_stmt",
            StmtBeh::Create { .. } => "create_stmt",
            StmtBeh::Become { .. } => "become_stmt",
            StmtBeh::Throw { .. } => "throw_stmt",
        }
    }

    /// Right-nested statement chain.
    pub fn chain(stmts: Vec<StmtBeh>) -> Self {
        stmts
            .into_iter()
            .rev()
            .fold(StmtBeh::Empty, |tail, head| StmtBeh::Pair {
                head: Box::new(head),
                tail: Box::new(tail),
            })
    }

    /// Statements of a chain, in order.
    pub fn iter(&self) -> impl Iterator<Item = &StmtBeh> {
        let mut rest = Some(self);
        std::iter::from_fn(move || match rest? {
            StmtBeh::Pair { head, tail } => {
                rest = Some(&**tail);
                Some(&**head)
            }
            StmtBeh::Empty => None,
            single => {
                rest = None;
                Some(single)
            }
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "beh")]
pub enum ExprBeh {
    #[serde(rename = "block_expr")]
    Block { vars: Vec<String>, stmt: Box<StmtBeh> },
    #[serde(rename = "pair_expr")]
    Pair {
        head: Box<ExprBeh>,
        tail: Box<ExprBeh>,
    },
    #[serde(rename = "let_expr")]
    Let {
        vars: Vec<String>,
        eqtn: Box<EqtnBeh>,
        expr: Box<ExprBeh>,
    },
    #[serde(rename = "if_expr")]
    If {
        eqtn: Box<EqtnBeh>,
        expr: Box<ExprBeh>,
        next: Box<ExprBeh>,
    },
    #[serde(rename = "case_expr")]
    Case { expr: Box<ExprBeh>, next: Box<CaseBeh> },
    #[serde(rename = "new_expr")]
    New { expr: Box<ExprBeh> },
    #[serde(rename = "app_expr")]
    App {
        abs: Box<ExprBeh>,
        arg: Box<ExprBeh>,
    },
    #[serde(rename = "ident_expr")]
    Ident { ident: String },
    #[serde(rename = "self_expr")]
    SelfRef,
    #[serde(rename = "abs_expr")]
    Abs {
        ptrn: Box<PtrnBeh>,
        body: Box<ExprBeh>,
    },
    #[serde(rename = "const_expr")]
    Const { value: Const },
    #[serde(rename = "literal_expr")]
    Literal { value: Literal },
}

impl ExprBeh {
    pub fn tag(&self) -> &'static str {
        match self {
            ExprBeh::Block { .. } => "block_expr",
            ExprBeh::Pair { .. } => "pair_expr",
            ExprBeh::Let { .. } => "let_expr",
            ExprBeh::If { .. } => "if_expr",
            ExprBeh::Case { .. } => "case_expr",
            ExprBeh::New { .. } => "new_expr",
            ExprBeh::App { .. } => "app_expr",
            ExprBeh::Ident { .. } => "ident_expr",
            ExprBeh::SelfRef => "self_expr",
            ExprBeh::Abs { .. } => "abs_expr",
            ExprBeh::Const { .. } => "const_expr",
            ExprBeh::Literal { .. } => "literal_expr",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "beh")]
pub enum CaseBeh {
    #[serde(rename = "case_choice")]
    Choice {
        ptrn: PtrnBeh,
        expr: ExprBeh,
        next: Box<CaseBeh>,
    },
    #[serde(rename = "case_end")]
    End,
}

impl CaseBeh {
    pub fn tag(&self) -> &'static str {
        match self {
            CaseBeh::Choice { .. } => "case_choice",
            CaseBeh::End => "case_end",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "beh")]
pub enum PtrnBeh {
    #[serde(rename = "pair_ptrn")]
    Pair {
        head: Box<PtrnBeh>,
        tail: Box<PtrnBeh>,
    },
    #[serde(rename = "any_ptrn")]
    Any,
    #[serde(rename = "value_ptrn")]
    Value { expr: ExprBeh },
    #[serde(rename = "ident_ptrn")]
    Ident { ident: String },
    #[serde(rename = "self_ptrn")]
    SelfRef,
    #[serde(rename = "const_ptrn")]
    Const { value: Const },
    #[serde(rename = "literal_ptrn")]
    Literal { value: Literal },
}

impl PtrnBeh {
    pub fn tag(&self) -> &'static str {
        match self {
            PtrnBeh::Pair { .. } => "pair_ptrn",
            PtrnBeh::Any => "any_ptrn",
            PtrnBeh::Value { .. } => "value_ptrn",
            PtrnBeh::Ident { .. } => "ident_ptrn",
            PtrnBeh::SelfRef => "self_ptrn",
            PtrnBeh::Const { .. } => "const_ptrn",
            PtrnBeh::Literal { .. } => "literal_ptrn",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "beh", rename = "eqtn")]
pub struct EqtnBeh {
    pub left: PtrnBeh,
    pub right: PtrnBeh,
}

impl EqtnBeh {
    pub fn tag(&self) -> &'static str {
        "eqtn"
    }
}

#[cfg(test)]
mod tests;
