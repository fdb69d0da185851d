//! `wikiacl-auth` — request-time access control for wiki pages and groups.
//!
//! Decides whether a session may proceed given a permission expression such as
//! `edit|rename|view` or `!upload`. This crate is decoupled from HTTP, markup
//! and storage: the authorization oracle and the page store are injected.

pub mod catalog;
pub mod context;
pub mod error;
pub mod evaluate;
pub mod expression;
pub mod guard;
pub mod oracle;
pub mod permissions;
pub mod resolver;

pub use catalog::{PermissionKind, ResourceRequirement};
pub use context::{Resource, ResourceContext};
pub use error::EvaluationError;
pub use evaluate::{AtomOutcome, Decision, EvaluationTrace, Evaluator};
pub use expression::{PermissionAtom, PermissionExpression};
pub use guard::{GuardOutcome, PermissionGuard};
pub use oracle::{AuthorizationOracle, FnOracle, PolicyOracle};
pub use permissions::{ConcretePermission, GroupAction, PageAction, WikiAction};
pub use resolver::{resolve, DenyReason, Resolution};
