//! Guards for markup sections: show the body only if the expression allows.

use wikiacl_core::PageStore;

use crate::context::ResourceContext;
use crate::error::EvaluationError;
use crate::evaluate::Evaluator;
use crate::expression::PermissionExpression;
use crate::oracle::AuthorizationOracle;

/// What to do with the guarded body.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    IncludeBody,
    SkipBody,
}

/// A permission expression parsed once and evaluated per render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionGuard {
    expression: PermissionExpression,
}

impl PermissionGuard {
    pub fn new(raw: &str) -> Result<Self, EvaluationError> {
        Ok(Self {
            expression: PermissionExpression::parse(raw)?,
        })
    }

    pub fn expression(&self) -> &PermissionExpression {
        &self.expression
    }

    pub fn outcome<O, S>(
        &self,
        evaluator: &Evaluator<'_, O, S>,
        context: &ResourceContext,
    ) -> Result<GuardOutcome, EvaluationError>
    where
        O: AuthorizationOracle + ?Sized,
        S: PageStore + ?Sized,
    {
        let decision = evaluator.evaluate(&self.expression, context)?;
        Ok(if decision.is_allowed() {
            GuardOutcome::IncludeBody
        } else {
            GuardOutcome::SkipBody
        })
    }
}
