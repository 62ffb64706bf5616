//! Directory mutator: applies a [`Plan`] one account at a time.
//!
//! Every account produces exactly one [`MutationResult`]. A failed call is
//! recorded and logged; it never stops the remaining accounts. In dry-run
//! mode no mutating call is made and the `Would*` variants are returned.

use rostersync_core::{AccountId, LocalAccount, NewAccount, NormalizedRoster, SyncConfig};
use rostersync_remote::Directory;

use crate::reconcile::Plan;
use crate::snapshot::ExistingAccounts;

// ---------------------------------------------------------------------------
// Mutation result
// ---------------------------------------------------------------------------

/// Kind of change attempted on an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create,
    Disable,
}

/// Outcome of one attempted change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationResult {
    /// Account was created.
    Created { account_id: AccountId },
    /// `dry-run`: the account *would* have been created.
    WouldCreate { account_id: AccountId },
    /// Account status was set to `disabled`.
    Disabled { account_id: AccountId },
    /// `dry-run`: the account *would* have been disabled.
    WouldDisable { account_id: AccountId },
    /// Account was already disabled; no call made.
    AlreadyDisabled { account_id: AccountId },
    /// The directory rejected the call or could not be reached.
    Failed {
        account_id: AccountId,
        action: Action,
        error: String,
    },
}

impl MutationResult {
    pub fn account_id(&self) -> &AccountId {
        match self {
            MutationResult::Created { account_id }
            | MutationResult::WouldCreate { account_id }
            | MutationResult::Disabled { account_id }
            | MutationResult::WouldDisable { account_id }
            | MutationResult::AlreadyDisabled { account_id }
            | MutationResult::Failed { account_id, .. } => account_id,
        }
    }
}

// ---------------------------------------------------------------------------
// apply
// ---------------------------------------------------------------------------

/// Apply creations, then disables.
pub fn apply(
    plan: &Plan,
    roster: &NormalizedRoster,
    existing: &ExistingAccounts,
    config: &SyncConfig,
    directory: &dyn Directory,
) -> Vec<MutationResult> {
    let mut results = Vec::with_capacity(plan.to_create.len() + plan.to_disable.len());

    for account_id in &plan.to_create {
        let Some(account) = roster.get(account_id) else {
            continue;
        };
        let payload =
            NewAccount::from_normalized(account, &config.default_password, &config.default_roles);
        results.push(create(&payload, config.dry_run, directory));
    }

    if config.disable_missing {
        for account_id in &plan.to_disable {
            let Some(account) = existing.get(account_id) else {
                continue;
            };
            results.push(disable(account, config.dry_run, directory));
        }
    }

    results
}

fn create(payload: &NewAccount, dry_run: bool, directory: &dyn Directory) -> MutationResult {
    let account_id = payload.user_id.clone();
    let roles = join_roles(payload);

    if dry_run {
        tracing::info!(account_id = %account_id, roles = %roles, "[dry-run] would create account");
        return MutationResult::WouldCreate { account_id };
    }

    match directory.create_user(payload) {
        Ok(()) => {
            tracing::info!(account_id = %account_id, roles = %roles, "created account");
            MutationResult::Created { account_id }
        }
        Err(err) => {
            tracing::error!(account_id = %account_id, error = %err, "create account failed");
            MutationResult::Failed {
                account_id,
                action: Action::Create,
                error: err.to_string(),
            }
        }
    }
}

fn disable(account: &LocalAccount, dry_run: bool, directory: &dyn Directory) -> MutationResult {
    let account_id = account.user_id.clone();
    if account.is_disabled() {
        tracing::debug!(account_id = %account_id, "already disabled");
        return MutationResult::AlreadyDisabled { account_id };
    }

    if dry_run {
        tracing::info!(account_id = %account_id, "[dry-run] would disable account");
        return MutationResult::WouldDisable { account_id };
    }

    match directory.update_user(&account.disabled()) {
        Ok(()) => {
            tracing::info!(account_id = %account_id, "disabled account (not in remote group)");
            MutationResult::Disabled { account_id }
        }
        Err(err) => {
            tracing::error!(account_id = %account_id, error = %err, "disable account failed");
            MutationResult::Failed {
                account_id,
                action: Action::Disable,
                error: err.to_string(),
            }
        }
    }
}

fn join_roles(payload: &NewAccount) -> String {
    payload
        .roles
        .iter()
        .map(|r| r.0.as_str())
        .collect::<Vec<_>>()
        .join(",")
}
