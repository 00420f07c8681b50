//! Syntax tree → behavior tree.
//!
//! The [`Lowerer`] keeps a stack of open scopes, one per block or `LET … IN`
//! being lowered. Binding sites declare into the innermost one.

mod patterns;

use humus_ir::{CaseArm, CaseBeh, Const, Expr, ExprBeh, Literal, Stmt, StmtBeh};
use humus_peg::ensure_sufficient_stack;
use rustc_hash::FxHashSet;
use tracing::trace;

use crate::CodegenError;

/// Names declared by one block, in order of first binding.
#[derive(Debug, Default)]
struct Scope {
    vars: Vec<String>,
    seen: FxHashSet<String>,
}

impl Scope {
    fn declare(&mut self, name: &str) {
        if self.seen.insert(name.to_owned()) {
            self.vars.push(name.to_owned());
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct Lowerer {
    scopes: Vec<Scope>,
}

impl Lowerer {
    pub(crate) fn new() -> Self {
        Lowerer::default()
    }

    /// Declare `name` in the innermost open scope, if there is one.
    fn declare(&mut self, name: &str) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.declare(name);
        }
    }

    /// Run `f` inside a fresh scope and return what it declared.
    fn scoped<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, CodegenError>,
    ) -> Result<(Vec<String>, T), CodegenError> {
        self.scopes.push(Scope::default());
        let result = f(self);
        let scope = self.scopes.pop().unwrap_or_default();
        result.map(|value| (scope.vars, value))
    }

    pub(crate) fn lower_block(&mut self, stmts: &[Stmt]) -> Result<ExprBeh, CodegenError> {
        let (vars, stmts) = self.scoped(|this| {
            stmts
                .iter()
                .map(|stmt| this.lower_stmt(stmt))
                .collect::<Result<Vec<_>, _>>()
        })?;
        trace!(stmts = stmts.len(), vars = ?vars, "block");
        Ok(ExprBeh::Block {
            vars,
            stmt: Box::new(StmtBeh::chain(stmts)),
        })
    }

    pub(crate) fn lower_stmt(&mut self, stmt: &Stmt) -> Result<StmtBeh, CodegenError> {
        Ok(match stmt {
            Stmt::Expr { expr } => StmtBeh::Expr {
                expr: self.lower_expr(expr)?,
            },
            Stmt::Let { eqtn } => StmtBeh::Let {
                eqtn: self.lower_eqtn(eqtn, true)?,
            },
            Stmt::Send { msg, to } => StmtBeh::Send {
                msg: self.lower_expr(msg)?,
                to: self.lower_expr(to)?,
            },
            Stmt::AfterSend { dt, msg, to } => StmtBeh::AfterSend {
                dt: self.lower_expr(dt)?,
                msg: self.lower_expr(msg)?,
                to: self.lower_expr(to)?,
            },
            Stmt::Create { ident, expr } => {
                self.declare(ident);
                StmtBeh::Create {
                    ident: ident.clone(),
                    expr: self.lower_expr(expr)?,
                }
            }
            Stmt::Become { expr } => StmtBeh::Become {
                expr: self.lower_expr(expr)?,
            },
            Stmt::Throw { expr } => StmtBeh::Throw {
                expr: self.lower_expr(expr)?,
            },
        })
    }

    pub(crate) fn lower_expr(&mut self, expr: &Expr) -> Result<ExprBeh, CodegenError> {
        ensure_sufficient_stack(|| self.lower_expr_inner(expr))
    }

    fn lower_expr_inner(&mut self, expr: &Expr) -> Result<ExprBeh, CodegenError> {
        Ok(match expr {
            Expr::Pair { head, tail } => ExprBeh::Pair {
                head: Box::new(self.lower_expr(head)?),
                tail: Box::new(self.lower_expr(tail)?),
            },
            Expr::LetIn { eqtn, expr } => {
                let (vars, eqtn) = self.scoped(|this| this.lower_eqtn(eqtn, true))?;
                ExprBeh::Let {
                    vars,
                    eqtn: Box::new(eqtn),
                    expr: Box::new(self.lower_expr(expr)?),
                }
            }
            Expr::If { eqtn, expr, next } => {
                let next = match next {
                    Some(next) => self.lower_expr(next)?,
                    None => ExprBeh::Const {
                        value: Const::Undefined,
                    },
                };
                ExprBeh::If {
                    eqtn: Box::new(self.lower_eqtn(eqtn, false)?),
                    expr: Box::new(self.lower_expr(expr)?),
                    next: Box::new(next),
                }
            }
            Expr::Case { expr, arms } => ExprBeh::Case {
                expr: Box::new(self.lower_expr(expr)?),
                next: Box::new(self.lower_arms(arms)?),
            },
            Expr::New { expr } => ExprBeh::New {
                expr: Box::new(self.lower_expr(expr)?),
            },
            Expr::App { abs, arg } => ExprBeh::App {
                abs: Box::new(self.lower_expr(abs)?),
                arg: Box::new(self.lower_expr(arg)?),
            },
            Expr::Ident { ident } => ExprBeh::Ident {
                ident: ident.clone(),
            },
            Expr::Block { stmts } => self.lower_block(stmts)?,
            Expr::SelfRef => ExprBeh::SelfRef,
            Expr::Abs { ptrn, body } => ExprBeh::Abs {
                ptrn: Box::new(self.lower_ptrn(ptrn, false)?),
                body: Box::new(self.lower_expr(body)?),
            },
            Expr::Const { value } => ExprBeh::Const { value: *value },
            Expr::Literal { value } => ExprBeh::Literal {
                value: checked_literal(value)?,
            },
        })
    }

    fn lower_arms(&mut self, arms: &[CaseArm]) -> Result<CaseBeh, CodegenError> {
        let mut next = CaseBeh::End;
        for arm in arms.iter().rev() {
            next = CaseBeh::Choice {
                ptrn: self.lower_ptrn(&arm.ptrn, false)?,
                expr: self.lower_expr(&arm.expr)?,
                next: Box::new(next),
            };
        }
        Ok(next)
    }
}

fn checked_literal(literal: &Literal) -> Result<Literal, CodegenError> {
    match literal {
        Literal::Number(number) if number.value.is_none() => Err(CodegenError::InvalidNumber {
            literal: number.to_string(),
        }),
        other => Ok(other.clone()),
    }
}

#[cfg(test)]
mod tests;
