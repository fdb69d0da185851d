//! Wiki sessions and the roles they carry.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::id::SessionId;

/// Role identifier.
///
/// Roles are opaque strings at this layer; mapping roles to permissions is the
/// authorization oracle's business. Three built-in roles are implied by session
/// state rather than granted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(Cow<'static, str>);

impl Role {
    /// Every session, authenticated or not.
    pub const ALL: Role = Role(Cow::Borrowed("All"));
    /// Sessions with no authenticated user.
    pub const ANONYMOUS: Role = Role(Cow::Borrowed("Anonymous"));
    /// Sessions with an authenticated user.
    pub const AUTHENTICATED: Role = Role(Cow::Borrowed("Authenticated"));

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// An already-authenticated (or anonymous) wiki session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WikiSession {
    pub id: SessionId,
    pub user: Option<String>,
    pub roles: Vec<Role>,
}

impl WikiSession {
    pub fn anonymous() -> Self {
        Self {
            id: SessionId::new(),
            user: None,
            roles: Vec::new(),
        }
    }

    pub fn authenticated(user: impl Into<String>, roles: Vec<Role>) -> Self {
        Self {
            id: SessionId::new(),
            user: Some(user.into()),
            roles,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Built-in roles implied by the session's authentication state.
    pub fn builtin_roles(&self) -> [Role; 2] {
        if self.is_authenticated() {
            [Role::ALL, Role::AUTHENTICATED]
        } else {
            [Role::ALL, Role::ANONYMOUS]
        }
    }

    /// Every principal name this session speaks for: the user (if any), the
    /// granted roles and the implied built-in roles.
    pub fn principals(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::with_capacity(self.roles.len() + 3);
        if let Some(user) = &self.user {
            out.push(user.clone());
        }
        out.extend(self.roles.iter().map(|r| r.as_str().to_string()));
        out.extend(self.builtin_roles().iter().map(|r| r.as_str().to_string()));
        out
    }
}
