//! Resolution of free-text page names to canonical pages.
//!
//! The exact name is tried first. When English plural matching is enabled and
//! the exact name is absent, the singular/plural variant is tried next
//! (`"Pages"` ↔ `"Page"`).

use thiserror::Error;

use crate::name::PageName;
use crate::page::Page;
use crate::store::{PageStore, PageStoreError};

/// Why a raw page name could not be resolved.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// Neither the exact name nor any fallback variant exists.
    #[error("page not found: {requested}")]
    PageNotFound { requested: String },

    /// The store failed while looking the page up.
    #[error("{0}")]
    Store(String),
}

impl ResolveError {
    /// Message suitable for showing to the user who asked for the page.
    pub fn user_message(&self) -> String {
        match self {
            ResolveError::PageNotFound { requested } => format!("Page \"{requested}\" not found"),
            ResolveError::Store(message) => message.clone(),
        }
    }
}

impl From<PageStoreError> for ResolveError {
    fn from(value: PageStoreError) -> Self {
        ResolveError::Store(value.to_string())
    }
}

/// Resolves raw page names against a [`PageStore`].
#[derive(Debug, Clone)]
pub struct PageNameResolver<S> {
    store: S,
    match_english_plurals: bool,
}

impl<S: PageStore> PageNameResolver<S> {
    pub fn new(store: S, match_english_plurals: bool) -> Self {
        Self {
            store,
            match_english_plurals,
        }
    }

    /// Resolve `raw` to its canonical page.
    pub fn resolve(&self, raw: &str) -> Result<Page, ResolveError> {
        let not_found = || ResolveError::PageNotFound {
            requested: raw.to_string(),
        };

        let name = PageName::parse(raw).map_err(|_| not_found())?;
        if let Some(page) = self.store.canonical_page(&name)? {
            return Ok(page);
        }

        if let Some(variant) = self.plural_variant(raw) {
            if let Some(page) = self.store.canonical_page(&variant)? {
                tracing::debug!(requested = raw, resolved = %page.name, "resolved page via plural fallback");
                return Ok(page);
            }
        }

        Err(not_found())
    }

    fn plural_variant(&self, raw: &str) -> Option<PageName> {
        if !self.match_english_plurals {
            return None;
        }

        match raw.strip_suffix('s') {
            Some(singular) if !singular.is_empty() => Some(PageName::new(singular.to_string())),
            Some(_) => None,
            None => Some(PageName::new(format!("{raw}s"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryPageStore;

    struct BrokenStore;

    impl PageStore for BrokenStore {
        fn canonical_page(&self, _name: &PageName) -> Result<Option<Page>, PageStoreError> {
            Err(PageStoreError::Unavailable("disk on fire".to_string()))
        }
    }

    fn store_with(names: &[&'static str]) -> InMemoryPageStore {
        let store = InMemoryPageStore::new();
        for name in names {
            store.save_revision(PageName::new(*name), None).unwrap();
        }
        store
    }

    #[test]
    fn exact_name_wins() {
        let store = store_with(&["Page", "Pages"]);
        let resolver = PageNameResolver::new(&store, true);
        assert_eq!(resolver.resolve("Pages").unwrap().name.as_str(), "Pages");
    }

    #[test]
    fn plural_falls_back_to_singular_and_back() {
        let store = store_with(&["Page", "Recipes"]);
        let resolver = PageNameResolver::new(&store, true);
        assert_eq!(resolver.resolve("Pages").unwrap().name.as_str(), "Page");
        assert_eq!(resolver.resolve("Recipe").unwrap().name.as_str(), "Recipes");
    }

    #[test]
    fn plural_fallback_can_be_disabled() {
        let store = store_with(&["Page"]);
        let resolver = PageNameResolver::new(&store, false);
        let err = resolver.resolve("Pages").unwrap_err();
        assert_eq!(
            err,
            ResolveError::PageNotFound {
                requested: "Pages".to_string()
            }
        );
    }

    #[test]
    fn not_found_carries_requested_name() {
        let store = store_with(&[]);
        let resolver = PageNameResolver::new(&store, true);
        let err = resolver.resolve("Missing").unwrap_err();
        assert_eq!(err.user_message(), "Page \"Missing\" not found");
    }

    #[test]
    fn blank_name_is_not_found() {
        let store = store_with(&[]);
        let resolver = PageNameResolver::new(&store, true);
        assert!(matches!(resolver.resolve(""), Err(ResolveError::PageNotFound { .. })));
    }

    #[test]
    fn store_failure_is_distinct_from_not_found() {
        let resolver = PageNameResolver::new(BrokenStore, true);
        let err = resolver.resolve("Main").unwrap_err();
        assert_eq!(err.user_message(), "page store unavailable: disk on fire");
    }
}
