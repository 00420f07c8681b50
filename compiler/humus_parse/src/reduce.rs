//! Syntax reductions: raw token-layer values to the typed syntax tree.
//!
//! Every structural rule reduces to one of [`Value::Stmt`], [`Value::Expr`],
//! [`Value::Ptrn`] or [`Value::Eqtn`], so a rule's transform only has to
//! tell apart the alternatives of its own choice. `ident` reduces to the bare
//! name as [`Value::Text`], since only its context decides whether it names
//! an expression, a pattern or a new actor.

use humus_ir::{CaseArm, Const, Eqtn, Expr, Keyword, Literal, Ptrn, Stmt, Token, Value};
use humus_peg::{GrammarError, Namespace, Span, TransformError};

type Reduction = fn(&str, Value, &Span) -> Result<Value, TransformError>;

const REDUCTIONS: &[(&str, Reduction)] = &[
    ("humus", reduce_humus),
    ("block", reduce_block),
    ("stmt", reduce_stmt),
    ("expr", reduce_expr),
    ("term", reduce_term),
    ("call", reduce_call),
    ("eqtn", reduce_eqtn),
    ("ptrn", reduce_ptrn),
    ("pterm", reduce_pterm),
    ("const", reduce_const),
    ("ident", reduce_ident),
];

pub(crate) fn install(ns: &mut Namespace<Value>) -> Result<(), GrammarError> {
    for &(rule, reduction) in REDUCTIONS {
        ns.transform(rule, reduction)?;
    }
    Ok(())
}

fn malformed(rule: &str, value: &Value) -> TransformError {
    TransformError::new(format!("unexpected shape for {rule}: {value:?}"))
}

fn list(rule: &str, value: Value) -> Result<Vec<Value>, TransformError> {
    match value {
        Value::List(items) => Ok(items),
        other => Err(malformed(rule, &other)),
    }
}

fn array<const N: usize>(rule: &str, items: Vec<Value>) -> Result<[Value; N], TransformError> {
    <[Value; N]>::try_from(items).map_err(|items| malformed(rule, &Value::List(items)))
}

/// The `N` items of a sequence value.
fn parts<const N: usize>(rule: &str, value: Value) -> Result<[Value; N], TransformError> {
    array(rule, list(rule, value)?)
}

/// The value of an `optional(...)` match.
fn optional_value(rule: &str, value: Value) -> Result<Option<Value>, TransformError> {
    let mut items = list(rule, value)?;
    if items.len() > 1 {
        return Err(malformed(rule, &Value::List(items)));
    }
    Ok(items.pop())
}

fn leading_keyword(items: &[Value]) -> Option<Keyword> {
    items.first().and_then(Value::as_token).and_then(Token::keyword)
}

fn into_expr(rule: &str, value: Value) -> Result<Expr, TransformError> {
    match value {
        Value::Expr(expr) => Ok(expr),
        other => Err(malformed(rule, &other)),
    }
}

fn into_ptrn(rule: &str, value: Value) -> Result<Ptrn, TransformError> {
    match value {
        Value::Ptrn(ptrn) => Ok(ptrn),
        other => Err(malformed(rule, &other)),
    }
}

fn into_eqtn(rule: &str, value: Value) -> Result<Eqtn, TransformError> {
    match value {
        Value::Eqtn(eqtn) => Ok(eqtn),
        other => Err(malformed(rule, &other)),
    }
}

fn into_name(rule: &str, value: Value) -> Result<String, TransformError> {
    match value {
        Value::Text(name) => Ok(name),
        other => Err(malformed(rule, &other)),
    }
}

/// `()` and `f()` stand for NIL.
fn expr_or_nil(rule: &str, value: Value) -> Result<Expr, TransformError> {
    match optional_value(rule, value)? {
        Some(expr) => into_expr(rule, expr),
        None => Ok(Expr::constant(Const::Nil)),
    }
}

fn ptrn_or_nil(rule: &str, value: Value) -> Result<Ptrn, TransformError> {
    match optional_value(rule, value)? {
        Some(ptrn) => into_ptrn(rule, ptrn),
        None => Ok(Ptrn::Const { value: Const::Nil }),
    }
}

fn reduce_humus(rule: &str, value: Value, _: &Span) -> Result<Value, TransformError> {
    let [stmts, _end] = parts(rule, value)?;
    Ok(stmts)
}

fn reduce_block(rule: &str, value: Value, _: &Span) -> Result<Value, TransformError> {
    let [_open, stmts, _close] = parts(rule, value)?;
    let stmts = list(rule, stmts)?
        .into_iter()
        .map(|stmt| match stmt {
            Value::Stmt(stmt) => Ok(stmt),
            other => Err(malformed(rule, &other)),
        })
        .collect::<Result<_, _>>()?;
    Ok(Value::Expr(Expr::Block { stmts }))
}

fn reduce_stmt(rule: &str, value: Value, _: &Span) -> Result<Value, TransformError> {
    let items = match value {
        Value::Expr(expr) => return Ok(Value::Stmt(Stmt::Expr { expr })),
        other => list(rule, other)?,
    };
    let stmt = match leading_keyword(&items) {
        Some(Keyword::Let) => {
            let [_let, eqtn, _not_in] = array(rule, items)?;
            Stmt::Let {
                eqtn: into_eqtn(rule, eqtn)?,
            }
        }
        Some(Keyword::Create) => {
            let [_create, ident, _with, expr] = array(rule, items)?;
            Stmt::Create {
                ident: into_name(rule, ident)?,
                expr: into_expr(rule, expr)?,
            }
        }
        Some(Keyword::Become) => {
            let [_become, expr] = array(rule, items)?;
            Stmt::Become {
                expr: into_expr(rule, expr)?,
            }
        }
        Some(Keyword::Throw) => {
            let [_throw, expr] = array(rule, items)?;
            Stmt::Throw {
                expr: into_expr(rule, expr)?,
            }
        }
        _ => {
            let [after, _send, msg, _to, to] = array(rule, items)?;
            let msg = into_expr(rule, msg)?;
            let to = into_expr(rule, to)?;
            match optional_value(rule, after)? {
                None => Stmt::Send { msg, to },
                Some(after) => {
                    let [_after, dt] = parts(rule, after)?;
                    Stmt::AfterSend {
                        dt: into_expr(rule, dt)?,
                        msg,
                        to,
                    }
                }
            }
        }
    };
    Ok(Value::Stmt(stmt))
}

fn reduce_expr(rule: &str, value: Value, _: &Span) -> Result<Value, TransformError> {
    let items = list(rule, value)?;
    let expr = match leading_keyword(&items) {
        Some(Keyword::Let) => {
            let [_let, eqtn, _in, body] = array(rule, items)?;
            Expr::LetIn {
                eqtn: Box::new(into_eqtn(rule, eqtn)?),
                expr: Box::new(into_expr(rule, body)?),
            }
        }
        Some(Keyword::If) => {
            let [_if, eqtn, then, elifs, otherwise] = array(rule, items)?;
            // Desugar ELIF chains into nested IFs, innermost first.
            let mut next = match optional_value(rule, otherwise)? {
                Some(otherwise) => {
                    let [_else, alt] = parts(rule, otherwise)?;
                    Some(Box::new(into_expr(rule, alt)?))
                }
                None => None,
            };
            for elif in list(rule, elifs)?.into_iter().rev() {
                let [_elif, eqtn, then] = parts(rule, elif)?;
                next = Some(Box::new(Expr::If {
                    eqtn: Box::new(into_eqtn(rule, eqtn)?),
                    expr: Box::new(into_expr(rule, then)?),
                    next,
                }));
            }
            Expr::If {
                eqtn: Box::new(into_eqtn(rule, eqtn)?),
                expr: Box::new(into_expr(rule, then)?),
                next,
            }
        }
        Some(Keyword::Case) => {
            let [_case, subject, _of, arms, _end] = array(rule, items)?;
            let arms = list(rule, arms)?
                .into_iter()
                .map(|arm| -> Result<CaseArm, TransformError> {
                    let [ptrn, _colon, expr] = parts(rule, arm)?;
                    Ok(CaseArm {
                        ptrn: into_ptrn(rule, ptrn)?,
                        expr: into_expr(rule, expr)?,
                    })
                })
                .collect::<Result<_, _>>()?;
            Expr::Case {
                expr: Box::new(into_expr(rule, subject)?),
                arms,
            }
        }
        _ => {
            let [head, tail] = array(rule, items)?;
            let head = into_expr(rule, head)?;
            match optional_value(rule, tail)? {
                None => head,
                Some(tail) => {
                    let [_comma, tail] = parts(rule, tail)?;
                    Expr::pair(head, into_expr(rule, tail)?)
                }
            }
        }
    };
    Ok(Value::Expr(expr))
}

fn reduce_term(rule: &str, value: Value, _: &Span) -> Result<Value, TransformError> {
    let items = match value {
        // const and call arrive already reduced
        Value::Expr(expr) => return Ok(Value::Expr(expr)),
        other => list(rule, other)?,
    };
    if leading_keyword(&items) != Some(Keyword::New) {
        return Err(malformed(rule, &Value::List(items)));
    }
    let [_new, term] = array(rule, items)?;
    Ok(Value::Expr(Expr::New {
        expr: Box::new(into_expr(rule, term)?),
    }))
}

fn reduce_call(rule: &str, value: Value, _: &Span) -> Result<Value, TransformError> {
    let [head, tail] = parts(rule, value)?;
    let (abs, argument) = match head {
        Value::Text(name) => (Expr::ident(name), tail),
        // '(' then either `expr ')' argument?` or the `')'` of `()`
        _open => match tail {
            Value::List(items) => {
                let [inner, _close, argument] = array(rule, items)?;
                (into_expr(rule, inner)?, argument)
            }
            _close => return Ok(Value::Expr(Expr::constant(Const::Nil))),
        },
    };
    let expr = match optional_value(rule, argument)? {
        Some(argument) => {
            let [_open, arg, _close] = parts(rule, argument)?;
            Expr::app(abs, expr_or_nil(rule, arg)?)
        }
        None => abs,
    };
    Ok(Value::Expr(expr))
}

fn reduce_eqtn(rule: &str, value: Value, _: &Span) -> Result<Value, TransformError> {
    let items = list(rule, value)?;
    let eqtn = if items.len() == 3 {
        let [left, _eq, right] = array(rule, items)?;
        Eqtn {
            left: into_ptrn(rule, left)?,
            right: into_ptrn(rule, right)?,
        }
    } else {
        // f(p) = e  is  f = $\p.e
        let [name, _open, param, _close, _eq, body] = array(rule, items)?;
        let abs = Expr::abs(ptrn_or_nil(rule, param)?, into_expr(rule, body)?);
        Eqtn {
            left: Ptrn::ident(into_name(rule, name)?),
            right: Ptrn::Value { expr: abs },
        }
    };
    Ok(Value::Eqtn(eqtn))
}

fn reduce_ptrn(rule: &str, value: Value, _: &Span) -> Result<Value, TransformError> {
    let [head, tail] = parts(rule, value)?;
    let head = into_ptrn(rule, head)?;
    let ptrn = match optional_value(rule, tail)? {
        None => head,
        Some(tail) => {
            let [_comma, tail] = parts(rule, tail)?;
            Ptrn::pair(head, into_ptrn(rule, tail)?)
        }
    };
    Ok(Value::Ptrn(ptrn))
}

/// Pattern matching the value of a constant expression.
fn const_ptrn(expr: Expr) -> Ptrn {
    let simple = match &expr {
        Expr::Const { value } => Some(Ptrn::Const { value: *value }),
        Expr::Literal { value } => Some(Ptrn::Literal {
            value: value.clone(),
        }),
        Expr::SelfRef => Some(Ptrn::SelfRef),
        _ => None,
    };
    simple.unwrap_or(Ptrn::Value { expr })
}

fn reduce_pterm(rule: &str, value: Value, _: &Span) -> Result<Value, TransformError> {
    let ptrn = match value {
        any if any.is_keyword(Keyword::Any) => Ptrn::Any,
        Value::Expr(expr) => const_ptrn(expr),
        Value::Text(name) => Ptrn::ident(name),
        other => {
            let items = list(rule, other)?;
            if items.len() == 2 {
                let [_dollar, term] = array(rule, items)?;
                Ptrn::Value {
                    expr: into_expr(rule, term)?,
                }
            } else {
                let [_open, inner, _close] = array(rule, items)?;
                ptrn_or_nil(rule, inner)?
            }
        }
    };
    Ok(Value::Ptrn(ptrn))
}

fn reduce_const(rule: &str, value: Value, _: &Span) -> Result<Value, TransformError> {
    let expr = match value {
        Value::Expr(block) => block,
        Value::Token(Token::Keyword(keyword)) => match keyword {
            Keyword::SelfRef => Expr::SelfRef,
            Keyword::Nil => Expr::constant(Const::Nil),
            Keyword::True => Expr::constant(Const::True),
            Keyword::False => Expr::constant(Const::False),
            Keyword::Undefined => Expr::constant(Const::Undefined),
            _ => return Err(malformed(rule, &Value::from(keyword))),
        },
        Value::Token(Token::Symbol(name)) => Expr::literal(Literal::Symbol(name)),
        Value::Token(Token::Number(number)) => Expr::literal(Literal::Number(number)),
        Value::Token(Token::Char(c)) => Expr::literal(Literal::Char(c)),
        Value::Token(Token::String(s)) => Expr::literal(Literal::String(s)),
        other => {
            let [_lambda, ptrn, _dot, body] = parts(rule, other)?;
            Expr::abs(into_ptrn(rule, ptrn)?, into_expr(rule, body)?)
        }
    };
    Ok(Value::Expr(expr))
}

fn reduce_ident(rule: &str, value: Value, _: &Span) -> Result<Value, TransformError> {
    match value {
        Value::Token(Token::Ident(name)) => Ok(Value::Text(name)),
        other => Err(malformed(rule, &other)),
    }
}
