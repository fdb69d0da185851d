//! Expression evaluator: short-circuit OR over permission atoms.
//!
//! Evaluation scans atoms in order. Each atom is resolved to a concrete
//! permission (or a definitive deny), checked with the oracle, and negated if
//! the atom says so. The first atom whose effective result is `true` ends the
//! scan with [`Decision::Allow`]; running off the end yields [`Decision::Deny`];
//! a resolution failure aborts with an error and no partial result.
//!
//! ```text
//! Scanning(0) ──atom true──▶ Allow
//!     │  └──────resolution error──▶ Failed
//!     ▼ atom false
//! Scanning(i+1) ... Scanning(n) ──▶ Deny
//! ```

use serde::Serialize;

use wikiacl_core::PageStore;

use crate::context::ResourceContext;
use crate::error::EvaluationError;
use crate::expression::{PermissionAtom, PermissionExpression};
use crate::oracle::AuthorizationOracle;
use crate::permissions::ConcretePermission;
use crate::resolver::{resolve, DenyReason, Resolution};

/// Result of a successfully evaluated expression.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Allow,
    Deny,
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }
}

impl From<bool> for Decision {
    fn from(value: bool) -> Self {
        if value { Decision::Allow } else { Decision::Deny }
    }
}

/// What happened to one atom during evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AtomOutcome {
    pub atom: PermissionAtom,

    /// The permission handed to the oracle, if it was consulted.
    pub permission: Option<ConcretePermission>,

    /// Set when resolution denied the atom without consulting the oracle.
    pub denied_by: Option<DenyReason>,

    /// Check result before negation.
    pub raw: bool,

    /// Check result after negation.
    pub effective: bool,
}

/// Audit record of an evaluation.
///
/// Only atoms that were actually evaluated appear: the list ends at the
/// short-circuit point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvaluationTrace {
    pub expression: String,
    pub decision: Decision,
    pub atoms: Vec<AtomOutcome>,
}

/// Evaluates permission expressions with injected collaborators.
///
/// Holds no state of its own; one evaluator can serve concurrent evaluations
/// as long as the collaborators are thread-safe (which their traits require).
#[derive(Debug)]
pub struct Evaluator<'a, O: ?Sized, S: ?Sized> {
    oracle: &'a O,
    store: &'a S,
}

impl<O: ?Sized, S: ?Sized> Clone for Evaluator<'_, O, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<O: ?Sized, S: ?Sized> Copy for Evaluator<'_, O, S> {}

impl<'a, O, S> Evaluator<'a, O, S>
where
    O: AuthorizationOracle + ?Sized,
    S: PageStore + ?Sized,
{
    pub fn new(oracle: &'a O, store: &'a S) -> Self {
        Self { oracle, store }
    }

    /// Parse `raw` and evaluate it.
    pub fn evaluate_str(
        &self,
        raw: &str,
        context: &ResourceContext,
    ) -> Result<Decision, EvaluationError> {
        let expression = PermissionExpression::parse(raw).inspect_err(|e| {
            tracing::warn!(expression = raw, error = %e, "invalid permission expression");
        })?;
        self.evaluate(&expression, context)
    }

    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(expression = %expression, session = %context.session.id)
    )]
    pub fn evaluate(
        &self,
        expression: &PermissionExpression,
        context: &ResourceContext,
    ) -> Result<Decision, EvaluationError> {
        self.scan(expression, context, |_| {})
    }

    /// Like [`Evaluator::evaluate`], also recording every evaluated atom.
    pub fn evaluate_traced(
        &self,
        expression: &PermissionExpression,
        context: &ResourceContext,
    ) -> Result<EvaluationTrace, EvaluationError> {
        let mut atoms = Vec::with_capacity(expression.len());
        let decision = self.scan(expression, context, |outcome| atoms.push(outcome))?;

        Ok(EvaluationTrace {
            expression: expression.to_string(),
            decision,
            atoms,
        })
    }

    /// Evaluate a single atom, negation included.
    pub fn check_atom(
        &self,
        atom: &PermissionAtom,
        context: &ResourceContext,
    ) -> Result<AtomOutcome, EvaluationError> {
        let (permission, denied_by, raw) = match resolve(atom.name(), context, self.store)? {
            Resolution::Check(permission) => {
                let raw = self.oracle.check(&context.session, &permission);
                (Some(permission), None, raw)
            }
            // Negation still applies: `!edit` on a stale revision is true.
            Resolution::Deny(reason) => (None, Some(reason), false),
        };

        let effective = atom.effective(raw);
        tracing::debug!(atom = %atom, raw, effective, "evaluated permission atom");

        Ok(AtomOutcome {
            atom: atom.clone(),
            permission,
            denied_by,
            raw,
            effective,
        })
    }

    fn scan<F>(
        &self,
        expression: &PermissionExpression,
        context: &ResourceContext,
        mut record: F,
    ) -> Result<Decision, EvaluationError>
    where
        F: FnMut(AtomOutcome),
    {
        if expression.is_empty() {
            tracing::warn!("refusing to evaluate empty permission expression");
            return Err(EvaluationError::EmptyExpression);
        }

        for atom in expression.atoms() {
            let outcome = self.check_atom(atom, context).inspect_err(|e| {
                tracing::warn!(atom = %atom, error = %e, "permission evaluation failed");
            })?;
            let effective = outcome.effective;
            record(outcome);

            if effective {
                tracing::debug!(decision = "allow", "permission expression evaluated");
                return Ok(Decision::Allow);
            }
        }

        tracing::debug!(decision = "deny", "permission expression evaluated");
        Ok(Decision::Deny)
    }
}
