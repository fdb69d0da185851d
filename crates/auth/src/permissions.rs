use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use wikiacl_core::{ApplicationName, GroupName, PageName};

/// Wiki-wide actions (not tied to any page or group).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WikiAction {
    CreateGroups,
    CreatePages,
    EditPreferences,
    EditProfile,
    Login,
}

impl WikiAction {
    pub const ALL: [WikiAction; 5] = [
        WikiAction::CreateGroups,
        WikiAction::CreatePages,
        WikiAction::EditPreferences,
        WikiAction::EditProfile,
        WikiAction::Login,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WikiAction::CreateGroups => "createGroups",
            WikiAction::CreatePages => "createPages",
            WikiAction::EditPreferences => "editPreferences",
            WikiAction::EditProfile => "editProfile",
            WikiAction::Login => "login",
        }
    }

    /// Actions implied by holding this one (including itself).
    pub fn implied(&self) -> &'static [WikiAction] {
        match self {
            WikiAction::CreateGroups => &[WikiAction::CreateGroups, WikiAction::CreatePages],
            WikiAction::CreatePages => &[WikiAction::CreatePages],
            WikiAction::EditPreferences => &[WikiAction::EditPreferences],
            WikiAction::EditProfile => &[WikiAction::EditProfile, WikiAction::EditPreferences],
            WikiAction::Login => &[WikiAction::Login],
        }
    }
}

/// Actions on a named group.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupAction {
    View,
    Edit,
    Delete,
}

impl GroupAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupAction::View => "view",
            GroupAction::Edit => "edit",
            GroupAction::Delete => "delete",
        }
    }

    pub fn implied(&self) -> &'static [GroupAction] {
        match self {
            GroupAction::View => &[GroupAction::View],
            GroupAction::Edit => &[GroupAction::Edit, GroupAction::View],
            GroupAction::Delete => &[GroupAction::Delete, GroupAction::Edit, GroupAction::View],
        }
    }
}

/// Page action identifier (e.g. "edit", "view").
///
/// Page actions are opaque strings at this layer: which actions exist is up to
/// the authorization oracle. The well-known ones are provided as constants.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageAction(Cow<'static, str>);

impl PageAction {
    pub const VIEW: PageAction = PageAction(Cow::Borrowed("view"));
    pub const COMMENT: PageAction = PageAction(Cow::Borrowed("comment"));
    pub const EDIT: PageAction = PageAction(Cow::Borrowed("edit"));
    pub const MODIFY: PageAction = PageAction(Cow::Borrowed("modify"));
    pub const UPLOAD: PageAction = PageAction(Cow::Borrowed("upload"));
    pub const RENAME: PageAction = PageAction(Cow::Borrowed("rename"));
    pub const DELETE: PageAction = PageAction(Cow::Borrowed("delete"));

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether holding `self` grants `other` (reflexive).
    pub fn implies(&self, other: &PageAction) -> bool {
        let implied: &[&str] = match self.as_str() {
            "view" => &["view"],
            "comment" => &["comment", "view"],
            "upload" => &["upload", "view"],
            "edit" => &["edit", "comment", "view"],
            "modify" => &["modify", "edit", "upload", "comment", "view"],
            "rename" => &["rename", "edit", "comment", "view"],
            "delete" => &["delete", "edit", "comment", "view"],
            unknown => return unknown == other.as_str(),
        };
        implied.contains(&other.as_str())
    }
}

impl core::fmt::Display for PageAction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A resolved, checkable permission handed to the authorization oracle.
///
/// Constructed per atom and discarded after the check.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConcretePermission {
    Wiki {
        application: ApplicationName,
        action: WikiAction,
    },
    Group {
        group: GroupName,
        action: GroupAction,
    },
    /// Administrative override for the whole application.
    All { application: ApplicationName },
    Page {
        application: ApplicationName,
        page: PageName,
        action: PageAction,
    },
}

impl core::fmt::Display for ConcretePermission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConcretePermission::Wiki {
                application,
                action,
            } => write!(f, "wiki:{application}:{}", action.as_str()),
            ConcretePermission::Group { group, action } => {
                write!(f, "group:{group}:{}", action.as_str())
            }
            ConcretePermission::All { application } => write!(f, "all:{application}"),
            ConcretePermission::Page {
                application,
                page,
                action,
            } => write!(f, "page:{application}:{page}:{action}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_action_implication_follows_hierarchy() {
        assert!(PageAction::EDIT.implies(&PageAction::VIEW));
        assert!(PageAction::EDIT.implies(&PageAction::COMMENT));
        assert!(PageAction::DELETE.implies(&PageAction::EDIT));
        assert!(PageAction::MODIFY.implies(&PageAction::UPLOAD));
        assert!(!PageAction::VIEW.implies(&PageAction::EDIT));
        assert!(!PageAction::UPLOAD.implies(&PageAction::EDIT));
    }

    #[test]
    fn unknown_page_actions_only_imply_themselves() {
        let custom = PageAction::new("publish");
        assert!(custom.implies(&PageAction::new("publish")));
        assert!(!custom.implies(&PageAction::VIEW));
    }

    #[test]
    fn wiki_and_group_implications() {
        assert!(WikiAction::CreateGroups.implied().contains(&WikiAction::CreatePages));
        assert!(WikiAction::EditProfile.implied().contains(&WikiAction::EditPreferences));
        assert!(!WikiAction::Login.implied().contains(&WikiAction::CreatePages));
        assert!(GroupAction::Delete.implied().contains(&GroupAction::View));
        assert!(!GroupAction::View.implied().contains(&GroupAction::Edit));
    }

    #[test]
    fn display_is_compact() {
        let p = ConcretePermission::Page {
            application: ApplicationName::new("JSPWiki"),
            page: PageName::new("Main"),
            action: PageAction::EDIT,
        };
        assert_eq!(p.to_string(), "page:JSPWiki:Main:edit");
    }
}
