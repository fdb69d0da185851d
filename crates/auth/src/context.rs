//! The resource a permission expression is evaluated against.

use wikiacl_core::{ApplicationName, EngineConfig, GroupName, Page, WikiSession};

/// Target of the check, beyond the application itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource {
    /// No page or group: only application-wide permissions can resolve.
    Application,
    Page(Page),
    Group(GroupName),
}

/// Session plus resource, supplied once per evaluation and read-only throughout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceContext {
    pub session: WikiSession,
    pub application: ApplicationName,
    pub resource: Resource,
}

impl ResourceContext {
    pub fn new(session: WikiSession, application: ApplicationName) -> Self {
        Self {
            session,
            application,
            resource: Resource::Application,
        }
    }

    /// Context scoped to the application configured in `config`.
    pub fn from_config(config: &EngineConfig, session: WikiSession) -> Self {
        Self::new(session, config.application.clone())
    }

    pub fn with_page(mut self, page: Page) -> Self {
        self.resource = Resource::Page(page);
        self
    }

    pub fn with_group(mut self, group: GroupName) -> Self {
        self.resource = Resource::Group(group);
        self
    }

    pub fn page(&self) -> Option<&Page> {
        match &self.resource {
            Resource::Page(page) => Some(page),
            _ => None,
        }
    }

    pub fn group(&self) -> Option<&GroupName> {
        match &self.resource {
            Resource::Group(group) => Some(group),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wikiacl_core::PageName;

    #[test]
    fn resource_accessors_follow_variant() {
        let base = ResourceContext::from_config(&EngineConfig::default(), WikiSession::anonymous());
        assert_eq!(base.resource, Resource::Application);
        assert_eq!(base.application.as_str(), "JSPWiki");

        let page_ctx = base.clone().with_page(Page::latest(PageName::new("Main")));
        assert!(page_ctx.page().is_some());
        assert!(page_ctx.group().is_none());

        let group_ctx = base.with_group(GroupName::new("Editors"));
        assert_eq!(group_ctx.group().map(GroupName::as_str), Some("Editors"));
        assert!(group_ctx.page().is_none());
    }
}
