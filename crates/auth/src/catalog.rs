//! Permission catalog: which kind of permission a name denotes.
//!
//! Classification is a pure function of the (case-sensitive) name. It never
//! looks at the session or the resource being checked.

use serde::Serialize;

use crate::permissions::{GroupAction, PageAction, WikiAction};

pub const ALL_PERMISSION: &str = "allPermission";
pub const VIEW_GROUP: &str = "viewGroup";
pub const EDIT_GROUP: &str = "editGroup";
pub const DELETE_GROUP: &str = "deleteGroup";

/// Kind of a permission name, with the parameters resolution needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PermissionKind {
    ApplicationWide(WikiAction),
    /// The group action *requested* by the name. Resolution currently maps all
    /// three onto a view check; see [`crate::resolver`].
    GroupScoped(GroupAction),
    AllPermission,
    /// Any unrecognized name is a page action.
    PageScoped(PageAction),
}

/// Which resource a [`PermissionKind`] must find in the context.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceRequirement {
    /// Only the application identity.
    Application,
    Group,
    Page,
}

impl core::fmt::Display for ResourceRequirement {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ResourceRequirement::Application => f.write_str("application"),
            ResourceRequirement::Group => f.write_str("group"),
            ResourceRequirement::Page => f.write_str("page"),
        }
    }
}

impl PermissionKind {
    pub fn classify(name: &str) -> Self {
        if let Some(action) = WikiAction::ALL.iter().find(|a| a.as_str() == name) {
            return PermissionKind::ApplicationWide(*action);
        }

        match name {
            VIEW_GROUP => PermissionKind::GroupScoped(GroupAction::View),
            EDIT_GROUP => PermissionKind::GroupScoped(GroupAction::Edit),
            DELETE_GROUP => PermissionKind::GroupScoped(GroupAction::Delete),
            ALL_PERMISSION => PermissionKind::AllPermission,
            page_action => PermissionKind::PageScoped(PageAction::new(page_action.to_string())),
        }
    }

    pub fn requirement(&self) -> ResourceRequirement {
        match self {
            PermissionKind::ApplicationWide(_) | PermissionKind::AllPermission => {
                ResourceRequirement::Application
            }
            PermissionKind::GroupScoped(_) => ResourceRequirement::Group,
            PermissionKind::PageScoped(_) => ResourceRequirement::Page,
        }
    }
}
