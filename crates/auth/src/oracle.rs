//! Authorization oracle contract and a grant-table implementation.

use std::collections::HashMap;

use wikiacl_core::WikiSession;

use crate::permissions::ConcretePermission;

/// Page or group name that matches every page/group in a grant.
pub const WILDCARD: &str = "*";

/// Decides whether a session holds a concrete permission.
///
/// Must be deterministic for a fixed session and permission, and free of side
/// effects observable by the evaluator (evaluation short-circuits).
pub trait AuthorizationOracle: Send + Sync {
    fn check(&self, session: &WikiSession, permission: &ConcretePermission) -> bool;
}

impl<O: AuthorizationOracle + ?Sized> AuthorizationOracle for std::sync::Arc<O> {
    fn check(&self, session: &WikiSession, permission: &ConcretePermission) -> bool {
        (**self).check(session, permission)
    }
}

/// Adapter turning a closure into an oracle.
#[derive(Debug, Clone, Copy)]
pub struct FnOracle<F>(pub F);

impl<F> AuthorizationOracle for FnOracle<F>
where
    F: Fn(&WikiSession, &ConcretePermission) -> bool + Send + Sync,
{
    fn check(&self, session: &WikiSession, permission: &ConcretePermission) -> bool {
        (self.0)(session, permission)
    }
}

/// Oracle backed by an in-memory table of grants per principal.
///
/// Principals are user names or role names, including the built-in roles
/// implied by session state (`All`, `Anonymous`, `Authenticated`).
/// Page and group grants may use [`WILDCARD`] as the page/group name.
#[derive(Debug, Clone, Default)]
pub struct PolicyOracle {
    grants: HashMap<String, Vec<ConcretePermission>>,
}

impl PolicyOracle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grant(mut self, principal: impl Into<String>, permission: ConcretePermission) -> Self {
        self.grants
            .entry(principal.into())
            .or_default()
            .push(permission);
        self
    }

    pub fn grants_for(&self, principal: &str) -> &[ConcretePermission] {
        self.grants.get(principal).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl AuthorizationOracle for PolicyOracle {
    fn check(&self, session: &WikiSession, permission: &ConcretePermission) -> bool {
        let principals = session.principals();
        let granted = principals.iter().find(|principal| {
            self.grants_for(principal)
                .iter()
                .any(|held| implies(held, permission))
        });

        if let Some(principal) = granted {
            tracing::trace!(%permission, principal = %principal, "permission granted");
            true
        } else {
            false
        }
    }
}

/// Whether holding `held` grants `requested`.
pub fn implies(held: &ConcretePermission, requested: &ConcretePermission) -> bool {
    use ConcretePermission::{All, Group, Page, Wiki};

    match (held, requested) {
        (All { application }, All { application: other })
        | (All { application }, Wiki { application: other, .. })
        | (All { application }, Page { application: other, .. }) => application == other,
        (All { .. }, Group { .. }) => true,

        (
            Wiki {
                application,
                action,
            },
            Wiki {
                application: other,
                action: wanted,
            },
        ) => application == other && action.implied().contains(wanted),

        (
            Group { group, action },
            Group {
                group: other,
                action: wanted,
            },
        ) => (group.as_str() == WILDCARD || group == other) && action.implied().contains(wanted),

        (
            Page {
                application,
                page,
                action,
            },
            Page {
                application: other_app,
                page: other_page,
                action: wanted,
            },
        ) => {
            application == other_app
                && (page.as_str() == WILDCARD || page == other_page)
                && action.implies(wanted)
        }

        _ => false,
    }
}
