//! # rostersync-remote
//!
//! Blocking clients for the two REST APIs a run talks to, behind the
//! [`RosterSource`] and [`Directory`] traits so the engine can be driven by
//! in-memory fakes.

pub mod error;
pub mod github;
mod http;
pub mod link;
pub mod nexus;

use rostersync_core::{LocalAccount, NewAccount, Role};

pub use error::RemoteError;
pub use github::GithubClient;
pub use http::USER_AGENT;
pub use nexus::NexusClient;

/// Profile details for one remote member.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Profile {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Source-of-truth group membership.
pub trait RosterSource {
    /// Every member login of `group`, across all pages.
    fn list_group_members(&self, group: &str) -> Result<Vec<String>, RemoteError>;

    /// Extended profile for `login`; `None` when the platform has none.
    fn fetch_profile(&self, login: &str) -> Result<Option<Profile>, RemoteError>;
}

/// The local user directory being reconciled.
pub trait Directory {
    fn list_users(&self) -> Result<Vec<LocalAccount>, RemoteError>;

    fn list_roles(&self) -> Result<Vec<Role>, RemoteError>;

    fn create_user(&self, account: &NewAccount) -> Result<(), RemoteError>;

    /// Replace the full record for `account.user_id`.
    fn update_user(&self, account: &LocalAccount) -> Result<(), RemoteError>;
}
