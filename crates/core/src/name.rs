//! Wiki names: pages, groups and the application itself.
//!
//! Names are opaque, case-sensitive strings. They are compared exactly; any
//! normalization (plural fallback etc.) belongs to [`crate::resolve`].

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Name of a wiki page (e.g. `"Main"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageName(Cow<'static, str>);

/// Name of a wiki group (e.g. `"Editors"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupName(Cow<'static, str>);

/// Identity of the wiki application that owns pages and groups.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationName(Cow<'static, str>);

macro_rules! impl_name_newtype {
    ($t:ty, $label:literal) => {
        impl $t {
            /// Wrap a name without validation (trusted input, literals).
            pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
                Self(name.into())
            }

            /// Validate untrusted input: must not be empty or whitespace-only.
            pub fn parse(raw: &str) -> CoreResult<Self> {
                if raw.trim().is_empty() {
                    return Err(CoreError::invalid_name(format!("{} must not be empty", $label)));
                }
                Ok(Self(Cow::Owned(raw.to_string())))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $t {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

impl_name_newtype!(PageName, "page name");
impl_name_newtype!(GroupName, "group name");
impl_name_newtype!(ApplicationName, "application name");
