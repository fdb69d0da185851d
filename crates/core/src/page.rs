//! Wiki pages and their revision numbers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::name::PageName;

/// Revision number of a page.
///
/// Real revisions are positive ordinals starting at 1. [`PageVersion::LATEST`]
/// is a reserved sentinel meaning "whatever is newest right now"; it compares
/// unequal to every real revision.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageVersion(i64);

impl PageVersion {
    pub const LATEST: PageVersion = PageVersion(-1);

    pub fn new(ordinal: i64) -> Self {
        Self(ordinal)
    }

    pub fn is_latest(&self) -> bool {
        *self == Self::LATEST
    }

    pub fn get(&self) -> i64 {
        self.0
    }
}

impl core::fmt::Display for PageVersion {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.is_latest() {
            f.write_str("latest")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// A page (or a reference to one revision of it).
///
/// Pages served by a [`crate::PageStore`] carry a real revision; references
/// built by request handling may carry [`PageVersion::LATEST`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub name: PageName,
    pub version: PageVersion,
    pub author: Option<String>,
    pub last_modified: DateTime<Utc>,
}

impl Page {
    pub fn new(name: PageName, version: PageVersion) -> Self {
        Self {
            name,
            version,
            author: None,
            last_modified: Utc::now(),
        }
    }

    /// A reference that always tracks the newest revision of `name`.
    pub fn latest(name: PageName) -> Self {
        Self::new(name, PageVersion::LATEST)
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }
}
