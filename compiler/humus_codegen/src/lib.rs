//! Behavior-tree generation for Humus.
//!
//! Lowers the reduced syntax tree from `humus_parse` into the
//! [`humus_ir::beh`] nodes a Humus runtime evaluates.
//!
//! # Pipeline Position
//!
//! ```text
//! Source → Tokens → Syntax tree → **Behavior tree**
//! ```
//!
//! # What Happens During Lowering
//!
//! 1. Statement lists become right-nested `stmt_pair` chains.
//! 2. Names bound by `CREATE` and by `LET` equations are declared in the
//!    `vars` of the block that binds them.
//! 3. An `IF` without `ELSE` gets the undefined constant as its `next`.
//! 4. `CASE` arms become a `case_choice` chain.

mod error;
mod lower;

use humus_ir::{Expr, ExprBeh, Stmt, StmtBeh};
use tracing::debug;

pub use error::CodegenError;

use lower::Lowerer;

/// Lower a whole program. The top level is a block like any other.
pub fn lower_program(stmts: &[Stmt]) -> Result<ExprBeh, CodegenError> {
    let program = Lowerer::new().lower_block(stmts)?;
    if let ExprBeh::Block { vars, .. } = &program {
        debug!(stmts = stmts.len(), vars = vars.len(), "lowered program");
    }
    Ok(program)
}

/// Lower one statement outside of any block; whatever it binds is not
/// declared anywhere.
pub fn lower_stmt(stmt: &Stmt) -> Result<StmtBeh, CodegenError> {
    Lowerer::new().lower_stmt(stmt)
}

pub fn lower_expr(expr: &Expr) -> Result<ExprBeh, CodegenError> {
    Lowerer::new().lower_expr(expr)
}
