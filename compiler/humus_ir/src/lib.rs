//! Humus IR - shared data for the Humus front end
//!
//! - [`Token`]s produced by the token grammar
//! - the reduced syntax tree ([`Stmt`], [`Expr`], [`Ptrn`], [`Eqtn`])
//! - the behavior tree emitted by lowering ([`StmtBeh`], [`ExprBeh`], ...)
//! - [`Value`], the match value flowing through both grammar layers

pub mod ast;
pub mod beh;
mod token;
mod value;

pub use ast::{CaseArm, Const, Eqtn, Expr, Literal, Ptrn, Stmt};
pub use beh::{CaseBeh, EqtnBeh, ExprBeh, PtrnBeh, StmtBeh};
pub use token::{Keyword, Number, Token};
pub use value::Value;
