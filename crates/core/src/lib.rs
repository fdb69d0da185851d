//! `wikiacl-core` — wiki domain primitives shared by the access-control layer.
//!
//! This crate contains **pure domain** types plus the collaborator contracts
//! (page store, page-name resolution) the authorization crate reads through.

pub mod config;
pub mod error;
pub mod id;
pub mod name;
pub mod page;
pub mod resolve;
pub mod session;
pub mod store;

pub use config::EngineConfig;
pub use error::{CoreError, CoreResult};
pub use id::SessionId;
pub use name::{ApplicationName, GroupName, PageName};
pub use page::{Page, PageVersion};
pub use resolve::{PageNameResolver, ResolveError};
pub use session::{Role, WikiSession};
pub use store::{InMemoryPageStore, PageStore, PageStoreError};
