//! Permission resolver: permission name + context → checkable permission.
//!
//! - No oracle calls
//! - Only I/O: the canonical page re-fetch for `edit` on a pinned revision

use serde::Serialize;

use wikiacl_core::{PageName, PageStore, PageVersion};

use crate::catalog::{PermissionKind, ResourceRequirement};
use crate::context::ResourceContext;
use crate::error::EvaluationError;
use crate::permissions::{ConcretePermission, GroupAction, PageAction};

/// Outcome of resolving one permission name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Ask the oracle about this permission.
    Check(ConcretePermission),
    /// Denied without consulting the oracle.
    Deny(DenyReason),
}

/// Why a permission was denied during resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DenyReason {
    /// The context pins an old revision; old revisions are never editable.
    /// `latest` is `None` when the page no longer exists in the store.
    StaleVersion {
        page: PageName,
        requested: PageVersion,
        latest: Option<PageVersion>,
    },
}

/// Resolve `name` against `context`.
pub fn resolve<S>(
    name: &str,
    context: &ResourceContext,
    store: &S,
) -> Result<Resolution, EvaluationError>
where
    S: PageStore + ?Sized,
{
    let kind = PermissionKind::classify(name);
    let missing = |required: ResourceRequirement| EvaluationError::MissingResourceContext {
        permission: name.to_string(),
        required,
    };

    let permission = match kind {
        PermissionKind::ApplicationWide(action) => ConcretePermission::Wiki {
            application: context.application.clone(),
            action,
        },
        // viewGroup/editGroup/deleteGroup all check view access on the group.
        PermissionKind::GroupScoped(_requested) => {
            let group = context
                .group()
                .ok_or_else(|| missing(ResourceRequirement::Group))?;
            ConcretePermission::Group {
                group: group.clone(),
                action: GroupAction::View,
            }
        }
        PermissionKind::AllPermission => ConcretePermission::All {
            application: context.application.clone(),
        },
        PermissionKind::PageScoped(action) => {
            let page = context
                .page()
                .ok_or_else(|| missing(ResourceRequirement::Page))?;

            if action == PageAction::EDIT && !page.version.is_latest() {
                let latest = store.canonical_page(&page.name)?.map(|p| p.version);
                if latest != Some(page.version) {
                    tracing::debug!(
                        page = %page.name,
                        requested = %page.version,
                        latest = ?latest,
                        "edit denied on stale page revision"
                    );
                    return Ok(Resolution::Deny(DenyReason::StaleVersion {
                        page: page.name.clone(),
                        requested: page.version,
                        latest,
                    }));
                }
            }

            ConcretePermission::Page {
                application: context.application.clone(),
                page: page.name.clone(),
                action,
            }
        }
    };

    Ok(Resolution::Check(permission))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use wikiacl_core::{
        ApplicationName, GroupName, InMemoryPageStore, Page, PageStoreError, WikiSession,
    };

    use crate::permissions::WikiAction;

    struct CountingStore {
        inner: InMemoryPageStore,
        reads: AtomicUsize,
    }

    impl PageStore for CountingStore {
        fn canonical_page(&self, name: &PageName) -> Result<Option<Page>, PageStoreError> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            self.inner.canonical_page(name)
        }
    }

    struct FailingStore;

    impl PageStore for FailingStore {
        fn canonical_page(&self, _name: &PageName) -> Result<Option<Page>, PageStoreError> {
            Err(PageStoreError::Unavailable("connection reset".to_string()))
        }
    }

    fn store_with_versions(name: &'static str, versions: usize) -> CountingStore {
        let inner = InMemoryPageStore::new();
        for _ in 0..versions {
            inner.save_revision(PageName::new(name), None).unwrap();
        }
        CountingStore {
            inner,
            reads: AtomicUsize::new(0),
        }
    }

    fn ctx() -> ResourceContext {
        ResourceContext::new(WikiSession::anonymous(), ApplicationName::new("JSPWiki"))
    }

    fn page_ctx(version: PageVersion) -> ResourceContext {
        ctx().with_page(Page::new(PageName::new("Main"), version))
    }

    #[test]
    fn application_wide_uses_application_identity() {
        let store = store_with_versions("Main", 1);
        let res = resolve("createPages", &ctx(), &store).unwrap();
        assert_eq!(
            res,
            Resolution::Check(ConcretePermission::Wiki {
                application: ApplicationName::new("JSPWiki"),
                action: WikiAction::CreatePages,
            })
        );
    }

    #[test]
    fn group_aliases_collapse_to_view() {
        let store = store_with_versions("Main", 1);
        let context = ctx().with_group(GroupName::new("Editors"));

        let resolved: Vec<Resolution> = ["viewGroup", "editGroup", "deleteGroup"]
            .iter()
            .map(|name| resolve(name, &context, &store).unwrap())
            .collect();

        let expected = Resolution::Check(ConcretePermission::Group {
            group: GroupName::new("Editors"),
            action: GroupAction::View,
        });
        assert!(resolved.iter().all(|r| *r == expected));
    }

    #[test]
    fn group_permission_without_group_is_missing_context() {
        let store = store_with_versions("Main", 1);
        let err = resolve("editGroup", &ctx(), &store).unwrap_err();
        assert_eq!(
            err,
            EvaluationError::MissingResourceContext {
                permission: "editGroup".to_string(),
                required: ResourceRequirement::Group,
            }
        );
    }

    #[test]
    fn page_permission_without_page_is_missing_context() {
        let store = store_with_versions("Main", 1);
        let context = ctx().with_group(GroupName::new("Editors"));
        let err = resolve("view", &context, &store).unwrap_err();
        assert!(matches!(
            err,
            EvaluationError::MissingResourceContext {
                required: ResourceRequirement::Page,
                ..
            }
        ));
    }

    #[test]
    fn all_permission_ignores_page() {
        let store = store_with_versions("Main", 5);
        let res = resolve("allPermission", &page_ctx(PageVersion::new(3)), &store).unwrap();
        assert_eq!(
            res,
            Resolution::Check(ConcretePermission::All {
                application: ApplicationName::new("JSPWiki")
            })
        );
        assert_eq!(store.reads.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn edit_on_stale_revision_is_denied() {
        let store = store_with_versions("Main", 5);
        let res = resolve("edit", &page_ctx(PageVersion::new(3)), &store).unwrap();
        assert_eq!(
            res,
            Resolution::Deny(DenyReason::StaleVersion {
                page: PageName::new("Main"),
                requested: PageVersion::new(3),
                latest: Some(PageVersion::new(5)),
            })
        );
    }

    #[test]
    fn edit_on_current_revision_is_checked() {
        let store = store_with_versions("Main", 5);
        let res = resolve("edit", &page_ctx(PageVersion::new(5)), &store).unwrap();
        assert!(matches!(res, Resolution::Check(ConcretePermission::Page { .. })));
        assert_eq!(store.reads.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn edit_on_latest_sentinel_skips_store() {
        let store = store_with_versions("Main", 5);
        let res = resolve("edit", &page_ctx(PageVersion::LATEST), &store).unwrap();
        assert!(matches!(res, Resolution::Check(_)));
        assert_eq!(store.reads.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn other_page_actions_skip_stale_rule() {
        let store = store_with_versions("Main", 5);
        let res = resolve("view", &page_ctx(PageVersion::new(1)), &store).unwrap();
        assert_eq!(
            res,
            Resolution::Check(ConcretePermission::Page {
                application: ApplicationName::new("JSPWiki"),
                page: PageName::new("Main"),
                action: PageAction::VIEW,
            })
        );
        assert_eq!(store.reads.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn edit_on_vanished_page_is_denied() {
        let store = store_with_versions("Other", 1);
        let res = resolve("edit", &page_ctx(PageVersion::new(2)), &store).unwrap();
        assert!(matches!(
            res,
            Resolution::Deny(DenyReason::StaleVersion { latest: None, .. })
        ));
    }

    #[test]
    fn store_failure_propagates() {
        let err = resolve("edit", &page_ctx(PageVersion::new(2)), &FailingStore).unwrap_err();
        assert!(matches!(err, EvaluationError::PageStoreFailure(_)));
        assert!(!err.is_configuration_error());
    }
}
