//! Reconciliation engine: a pure diff of the two snapshots.

use std::collections::BTreeSet;

use serde::Serialize;

use rostersync_core::{AccountId, RoleId, SyncConfig};

use crate::snapshot::Snapshot;

/// Roles every directory ships with; never reported as missing.
pub const BUILTIN_ROLES: [&str; 3] = ["nx-browser", "nx-admin", "nx-anonymous"];

/// The changes a run intends to make.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Plan {
    pub to_create: Vec<AccountId>,
    pub to_disable: Vec<AccountId>,
    /// Configured default roles the directory does not know. Warning only.
    pub missing_roles: Vec<RoleId>,
}

impl Plan {
    pub fn is_empty(&self) -> bool {
        self.to_create.is_empty() && self.to_disable.is_empty()
    }
}

/// Ids in `left` that are absent from `right` and not excluded, sorted.
pub fn set_difference(
    left: &BTreeSet<AccountId>,
    right: &BTreeSet<AccountId>,
    excluded: &BTreeSet<AccountId>,
) -> Vec<AccountId> {
    left.difference(right)
        .filter(|id| !excluded.contains(*id))
        .cloned()
        .collect()
}

/// Default roles that are neither built in nor present in `available`.
pub fn missing_roles(configured: &[RoleId], available: &BTreeSet<RoleId>) -> Vec<RoleId> {
    configured
        .iter()
        .filter(|role| !BUILTIN_ROLES.contains(&role.0.as_str()))
        .filter(|role| !available.contains(*role))
        .cloned()
        .collect()
}

/// Diff the snapshots under `config`.
pub fn plan(config: &SyncConfig, snapshot: &Snapshot) -> Plan {
    let remote: BTreeSet<AccountId> = snapshot.roster.keys().cloned().collect();
    let existing: BTreeSet<AccountId> = snapshot.directory.accounts.keys().cloned().collect();

    let to_create = set_difference(&remote, &existing, &config.exclude_users);
    let to_disable = if config.disable_missing {
        set_difference(&existing, &remote, &config.exclude_users)
    } else {
        Vec::new()
    };
    let missing_roles = missing_roles(&config.default_roles, &snapshot.directory.role_ids);
    for role in &missing_roles {
        tracing::warn!(role = %role, "default role not found in directory; create it or adjust DEFAULT_ROLES");
    }

    Plan {
        to_create,
        to_disable,
        missing_roles,
    }
}
