//! Page store contract and an in-memory implementation.

use std::collections::HashMap;
use std::sync::RwLock;

use thiserror::Error;

use crate::name::PageName;
use crate::page::{Page, PageVersion};

/// Failure reading from (or writing to) a page store.
///
/// "Not found" is **not** an error: lookups return `Ok(None)` for that.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PageStoreError {
    /// Backend unreachable, lock poisoned, I/O failure, ...
    #[error("page store unavailable: {0}")]
    Unavailable(String),

    /// Stored data could not be interpreted.
    #[error("page store data corrupt: {0}")]
    Corrupt(String),
}

/// Read access to canonical pages.
///
/// Implementations must be safe to share across concurrent evaluations.
pub trait PageStore: Send + Sync {
    /// Fetch the newest revision of the page called `name`.
    fn canonical_page(&self, name: &PageName) -> Result<Option<Page>, PageStoreError>;
}

impl<S: PageStore + ?Sized> PageStore for &S {
    fn canonical_page(&self, name: &PageName) -> Result<Option<Page>, PageStoreError> {
        (**self).canonical_page(name)
    }
}

impl<S: PageStore + ?Sized> PageStore for std::sync::Arc<S> {
    fn canonical_page(&self, name: &PageName) -> Result<Option<Page>, PageStoreError> {
        (**self).canonical_page(name)
    }
}

/// In-memory page store keeping the full revision history of every page.
///
/// Intended for tests/dev. Not optimized for performance.
#[derive(Debug, Default)]
pub struct InMemoryPageStore {
    pages: RwLock<HashMap<PageName, Vec<Page>>>,
}

impl InMemoryPageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new revision of `name`, numbered one past the current newest.
    pub fn save_revision(
        &self,
        name: PageName,
        author: Option<&str>,
    ) -> Result<Page, PageStoreError> {
        let mut pages = self
            .pages
            .write()
            .map_err(|_| PageStoreError::Unavailable("lock poisoned".to_string()))?;

        let history = pages.entry(name.clone()).or_default();
        let next = history.last().map(|p| p.version.get()).unwrap_or(0) + 1;

        let mut page = Page::new(name, PageVersion::new(next));
        page.author = author.map(str::to_string);
        history.push(page.clone());

        tracing::debug!(page = %page.name, version = %page.version, "stored page revision");
        Ok(page)
    }

    /// A specific stored revision, or `None` when unknown.
    pub fn revision(
        &self,
        name: &PageName,
        version: PageVersion,
    ) -> Result<Option<Page>, PageStoreError> {
        let pages = self
            .pages
            .read()
            .map_err(|_| PageStoreError::Unavailable("lock poisoned".to_string()))?;

        Ok(pages
            .get(name)
            .and_then(|history| history.iter().find(|p| p.version == version))
            .cloned())
    }
}

impl PageStore for InMemoryPageStore {
    fn canonical_page(&self, name: &PageName) -> Result<Option<Page>, PageStoreError> {
        let pages = self
            .pages
            .read()
            .map_err(|_| PageStoreError::Unavailable("lock poisoned".to_string()))?;

        Ok(pages.get(name).and_then(|history| history.last()).cloned())
    }
}
