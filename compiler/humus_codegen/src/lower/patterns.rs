//! Pattern and equation lowering.

use humus_ir::{Eqtn, EqtnBeh, Ptrn, PtrnBeh};

use super::{checked_literal, Lowerer};
use crate::CodegenError;

impl Lowerer {
    /// `declare` is set for binding sites: identifier patterns then name
    /// variables of the innermost scope.
    pub(super) fn lower_eqtn(&mut self, eqtn: &Eqtn, declare: bool) -> Result<EqtnBeh, CodegenError> {
        Ok(EqtnBeh {
            left: self.lower_ptrn(&eqtn.left, declare)?,
            right: self.lower_ptrn(&eqtn.right, declare)?,
        })
    }

    pub(super) fn lower_ptrn(&mut self, ptrn: &Ptrn, declare: bool) -> Result<PtrnBeh, CodegenError> {
        Ok(match ptrn {
            Ptrn::Pair { head, tail } => PtrnBeh::Pair {
                head: Box::new(self.lower_ptrn(head, declare)?),
                tail: Box::new(self.lower_ptrn(tail, declare)?),
            },
            Ptrn::Any => PtrnBeh::Any,
            Ptrn::Value { expr } => PtrnBeh::Value {
                expr: self.lower_expr(expr)?,
            },
            Ptrn::Ident { ident } => {
                if declare {
                    self.declare(ident);
                }
                PtrnBeh::Ident {
                    ident: ident.clone(),
                }
            }
            Ptrn::SelfRef => PtrnBeh::SelfRef,
            Ptrn::Const { value } => PtrnBeh::Const { value: *value },
            Ptrn::Literal { value } => PtrnBeh::Literal {
                value: checked_literal(value)?,
            },
        })
    }
}
