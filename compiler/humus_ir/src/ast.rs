//! Reduced syntax tree.
//!
//! This is what the syntax reductions build out of raw parse values. It is
//! already desugared: `ELIF` chains are nested [`Expr::If`]s, `()` is
//! [`Const::Nil`], and the function equation `f(p) = e` is the ordinary
//! equation `f = $(\p.e)`.

use serde::Serialize;

use crate::token::Number;

/// Constants with no literal spelling.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Const {
    Nil,
    True,
    False,
    /// `?`
    Undefined,
}

/// Serializes as JSON `null`, `true`, `false` and the string `"?"`.
impl Serialize for Const {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Const::Nil => serializer.serialize_unit(),
            Const::True => serializer.serialize_bool(true),
            Const::False => serializer.serialize_bool(false),
            Const::Undefined => serializer.serialize_str("?"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Literal {
    Symbol(String),
    Number(Number),
    Char(char),
    String(String),
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Stmt {
    Expr { expr: Expr },
    Let { eqtn: Eqtn },
    Send { msg: Expr, to: Expr },
    AfterSend { dt: Expr, msg: Expr, to: Expr },
    Create { ident: String, expr: Expr },
    Become { expr: Expr },
    Throw { expr: Expr },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Expr {
    Pair {
        head: Box<Expr>,
        tail: Box<Expr>,
    },
    LetIn {
        eqtn: Box<Eqtn>,
        expr: Box<Expr>,
    },
    If {
        eqtn: Box<Eqtn>,
        expr: Box<Expr>,
        next: Option<Box<Expr>>,
    },
    Case {
        expr: Box<Expr>,
        arms: Vec<CaseArm>,
    },
    New {
        expr: Box<Expr>,
    },
    App {
        abs: Box<Expr>,
        arg: Box<Expr>,
    },
    Ident {
        ident: String,
    },
    Block {
        stmts: Vec<Stmt>,
    },
    #[serde(rename = "self")]
    SelfRef,
    Abs {
        ptrn: Box<Ptrn>,
        body: Box<Expr>,
    },
    Const {
        value: Const,
    },
    Literal {
        value: Literal,
    },
}

impl Expr {
    pub fn ident(name: impl Into<String>) -> Self {
        Expr::Ident { ident: name.into() }
    }

    pub fn constant(value: Const) -> Self {
        Expr::Const { value }
    }

    pub fn literal(value: Literal) -> Self {
        Expr::Literal { value }
    }

    pub fn abs(ptrn: Ptrn, body: Expr) -> Self {
        Expr::Abs {
            ptrn: Box::new(ptrn),
            body: Box::new(body),
        }
    }

    pub fn app(abs: Expr, arg: Expr) -> Self {
        Expr::App {
            abs: Box::new(abs),
            arg: Box::new(arg),
        }
    }

    pub fn pair(head: Expr, tail: Expr) -> Self {
        Expr::Pair {
            head: Box::new(head),
            tail: Box::new(tail),
        }
    }
}

/// Long pair lists and `NEW` chains nest one box per element, so teardown
/// walks an explicit work list instead of recursing.
impl Drop for Expr {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.detach_children(&mut pending);
        while let Some(mut expr) = pending.pop() {
            expr.detach_children(&mut pending);
        }
    }
}

impl Expr {
    /// Moves every directly nested expression onto `pending`, leaving
    /// childless placeholders behind.
    fn detach_children(&mut self, pending: &mut Vec<Expr>) {
        match self {
            Expr::Pair { head, tail } | Expr::App { abs: head, arg: tail } => {
                pending.push(take_expr(head));
                pending.push(take_expr(tail));
            }
            Expr::LetIn { eqtn, expr } => {
                detach_eqtn(take_eqtn(eqtn), pending);
                pending.push(take_expr(expr));
            }
            Expr::If { eqtn, expr, next } => {
                detach_eqtn(take_eqtn(eqtn), pending);
                pending.push(take_expr(expr));
                if let Some(next) = next.take() {
                    pending.push(*next);
                }
            }
            Expr::Case { expr, arms } => {
                pending.push(take_expr(expr));
                for arm in std::mem::take(arms) {
                    detach_ptrn(arm.ptrn, pending);
                    pending.push(arm.expr);
                }
            }
            Expr::New { expr } => pending.push(take_expr(expr)),
            Expr::Block { stmts } => {
                for stmt in std::mem::take(stmts) {
                    detach_stmt(stmt, pending);
                }
            }
            Expr::Abs { ptrn, body } => {
                detach_ptrn(std::mem::replace(&mut **ptrn, Ptrn::Any), pending);
                pending.push(take_expr(body));
            }
            Expr::Ident { .. } | Expr::SelfRef | Expr::Const { .. } | Expr::Literal { .. } => {}
        }
    }
}

fn take_expr(slot: &mut Box<Expr>) -> Expr {
    std::mem::replace(&mut **slot, Expr::SelfRef)
}

fn take_eqtn(slot: &mut Box<Eqtn>) -> Eqtn {
    std::mem::replace(
        &mut **slot,
        Eqtn {
            left: Ptrn::Any,
            right: Ptrn::Any,
        },
    )
}

fn detach_stmt(stmt: Stmt, pending: &mut Vec<Expr>) {
    match stmt {
        Stmt::Expr { expr } | Stmt::Become { expr } | Stmt::Throw { expr } => pending.push(expr),
        Stmt::Create { expr, .. } => pending.push(expr),
        Stmt::Let { eqtn } => detach_eqtn(eqtn, pending),
        Stmt::Send { msg, to } => {
            pending.push(msg);
            pending.push(to);
        }
        Stmt::AfterSend { dt, msg, to } => {
            pending.push(dt);
            pending.push(msg);
            pending.push(to);
        }
    }
}

fn detach_eqtn(eqtn: Eqtn, pending: &mut Vec<Expr>) {
    detach_ptrn(eqtn.left, pending);
    detach_ptrn(eqtn.right, pending);
}

fn detach_ptrn(ptrn: Ptrn, pending: &mut Vec<Expr>) {
    let mut rest = vec![ptrn];
    while let Some(ptrn) = rest.pop() {
        match ptrn {
            Ptrn::Pair { head, tail } => {
                rest.push(*head);
                rest.push(*tail);
            }
            Ptrn::Value { expr } => pending.push(expr),
            _ => {}
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CaseArm {
    pub ptrn: Ptrn,
    pub expr: Expr,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Ptrn {
    Pair { head: Box<Ptrn>, tail: Box<Ptrn> },
    Any,
    /// Matches a value computed by an expression: `$term`, blocks and
    /// abstractions.
    Value { expr: Expr },
    Ident { ident: String },
    #[serde(rename = "self")]
    SelfRef,
    Const { value: Const },
    Literal { value: Literal },
}

impl Ptrn {
    pub fn ident(name: impl Into<String>) -> Self {
        Ptrn::Ident { ident: name.into() }
    }

    pub fn pair(head: Ptrn, tail: Ptrn) -> Self {
        Ptrn::Pair {
            head: Box::new(head),
            tail: Box::new(tail),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Eqtn {
    pub left: Ptrn,
    pub right: Ptrn,
}
