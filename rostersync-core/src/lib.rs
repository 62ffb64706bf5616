//! rostersync core library: domain types, run configuration, identity
//! normalization.
//!
//! - [`types`]: account, member and role types
//! - [`config`]: [`SyncConfig`] built once per run
//! - [`normalize`]: remote member → local account id mapping
//! - [`error`]: [`ConfigError`]

pub mod config;
pub mod error;
pub mod normalize;
pub mod types;

pub use config::{SyncConfig, UsernameStrategy};
pub use error::ConfigError;
pub use normalize::NormalizedRoster;
pub use types::{
    AccountId, AccountStatus, LocalAccount, NewAccount, NormalizedAccount, RemoteMember, Role,
    RoleId,
};
