//! Run reporter: the machine-readable summary printed at the end of a run.

use chrono::{DateTime, Utc};
use serde::Serialize;

use rostersync_core::{AccountId, RoleId, SyncConfig, UsernameStrategy};

use crate::mutator::{Action, MutationResult};
use crate::reconcile::Plan;
use crate::snapshot::Snapshot;

/// Summary of one run. Dry-run counts report what *would* have changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub github_org: String,
    pub default_roles: Vec<RoleId>,
    pub username_strategy: UsernameStrategy,
    pub exclude_users: Vec<AccountId>,
    pub disable_missing: bool,
    pub nexus_url: String,
    pub created: usize,
    pub disabled: usize,
    pub total_considered: usize,
    pub dry_run: bool,
    pub existing_considered: usize,
    pub create_failed: usize,
    pub disable_failed: usize,
    pub already_disabled: usize,
    pub missing_roles: Vec<RoleId>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Tally {
    created: usize,
    disabled: usize,
    create_failed: usize,
    disable_failed: usize,
    already_disabled: usize,
}

impl Tally {
    fn of(results: &[MutationResult]) -> Self {
        results.iter().fold(Self::default(), |mut t, result| {
            match result {
                MutationResult::Created { .. } | MutationResult::WouldCreate { .. } => {
                    t.created += 1
                }
                MutationResult::Disabled { .. } | MutationResult::WouldDisable { .. } => {
                    t.disabled += 1
                }
                MutationResult::AlreadyDisabled { .. } => t.already_disabled += 1,
                MutationResult::Failed {
                    action: Action::Create,
                    ..
                } => t.create_failed += 1,
                MutationResult::Failed {
                    action: Action::Disable,
                    ..
                } => t.disable_failed += 1,
            }
            t
        })
    }
}

impl RunSummary {
    pub fn new(
        config: &SyncConfig,
        snapshot: &Snapshot,
        plan: &Plan,
        results: &[MutationResult],
        started_at: DateTime<Utc>,
    ) -> Self {
        let tally = Tally::of(results);
        Self {
            github_org: config.github_org.clone(),
            default_roles: config.default_roles.clone(),
            username_strategy: config.username_strategy,
            exclude_users: config.exclude_users.iter().cloned().collect(),
            disable_missing: config.disable_missing,
            nexus_url: config.nexus_url.clone(),
            created: tally.created,
            disabled: tally.disabled,
            total_considered: snapshot.roster.len(),
            dry_run: config.dry_run,
            existing_considered: snapshot.directory.accounts.len(),
            create_failed: tally.create_failed,
            disable_failed: tally.disable_failed,
            already_disabled: tally.already_disabled,
            missing_roles: plan.missing_roles.clone(),
            started_at,
            finished_at: Utc::now(),
        }
    }

    /// Pretty-printed JSON, the form written to stdout.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
