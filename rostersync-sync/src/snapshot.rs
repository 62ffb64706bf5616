//! The two snapshots a run reconciles, fetched fresh every time.

use std::collections::{BTreeMap, BTreeSet};

use rostersync_core::{
    normalize::normalize_roster, AccountId, LocalAccount, NormalizedRoster, RoleId, SyncConfig,
};
use rostersync_remote::{Directory, RosterSource};

use crate::error::SyncError;
use crate::roster::fetch_members;

/// Existing directory accounts keyed by id, exclusions already removed.
pub type ExistingAccounts = BTreeMap<AccountId, LocalAccount>;

/// Local directory state as read at the start of a run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DirectorySnapshot {
    pub accounts: ExistingAccounts,
    pub role_ids: BTreeSet<RoleId>,
}

/// Both sides of a run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub roster: NormalizedRoster,
    pub directory: DirectorySnapshot,
}

impl Snapshot {
    /// Fetch and normalize the roster, then read the directory.
    pub fn collect(
        config: &SyncConfig,
        source: &dyn RosterSource,
        directory: &dyn Directory,
    ) -> Result<Self, SyncError> {
        let members = fetch_members(source, &config.github_org).map_err(|source| {
            SyncError::Roster {
                group: config.github_org.clone(),
                source,
            }
        })?;
        let roster = normalize_roster(config.username_strategy, &members, |id| {
            config.is_excluded(id)
        });
        tracing::info!(count = roster.len(), "remote members considered (after excludes)");

        let directory = read_directory(config, directory)?;
        Ok(Self { roster, directory })
    }
}

/// Read users and roles, dropping excluded account ids.
pub fn read_directory(
    config: &SyncConfig,
    directory: &dyn Directory,
) -> Result<DirectorySnapshot, SyncError> {
    let accounts: ExistingAccounts = directory
        .list_users()
        .map_err(SyncError::Users)?
        .into_iter()
        .filter(|account| !config.is_excluded(&account.user_id))
        .map(|account| (account.user_id.clone(), account))
        .collect();
    tracing::info!(count = accounts.len(), "existing directory accounts (after excludes)");

    let role_ids = directory
        .list_roles()
        .map_err(SyncError::Roles)?
        .into_iter()
        .map(|role| role.id)
        .collect();

    Ok(DirectorySnapshot { accounts, role_ids })
}
