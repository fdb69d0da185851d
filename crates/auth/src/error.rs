use thiserror::Error;

use wikiacl_core::PageStoreError;

use crate::catalog::ResourceRequirement;

/// Why an expression could not be evaluated.
///
/// A plain deny is **not** an error; see [`crate::Decision`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EvaluationError {
    #[error("permission expression is empty")]
    EmptyExpression,

    #[error("malformed permission atom '{0}'")]
    MalformedAtom(String),

    /// A group/page permission was evaluated without that resource in context.
    #[error("permission '{permission}' requires a {required} in the resource context")]
    MissingResourceContext {
        permission: String,
        required: ResourceRequirement,
    },

    #[error("page store failure: {0}")]
    PageStoreFailure(#[from] PageStoreError),
}

impl EvaluationError {
    /// Wiring/configuration defects, as opposed to infrastructure failures.
    pub fn is_configuration_error(&self) -> bool {
        !matches!(self, EvaluationError::PageStoreFailure(_))
    }
}
