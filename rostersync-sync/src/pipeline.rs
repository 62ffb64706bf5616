//! Shared run entrypoints used by `rostersync sync` and `rostersync plan`.

use chrono::Utc;

use rostersync_core::SyncConfig;
use rostersync_remote::{Directory, RosterSource};

use crate::mutator::{self, MutationResult};
use crate::reconcile::{self, Plan};
use crate::report::RunSummary;
use crate::snapshot::Snapshot;
use crate::SyncError;

/// Everything one run produced.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub plan: Plan,
    pub results: Vec<MutationResult>,
    pub summary: RunSummary,
}

/// Fetch both snapshots and compute the plan. Never mutates.
pub fn prepare(
    config: &SyncConfig,
    source: &dyn RosterSource,
    directory: &dyn Directory,
) -> Result<(Snapshot, Plan), SyncError> {
    let snapshot = Snapshot::collect(config, source, directory)?;
    let plan = reconcile::plan(config, &snapshot);
    tracing::info!(
        to_create = plan.to_create.len(),
        to_disable = plan.to_disable.len(),
        "reconciliation planned"
    );
    Ok((snapshot, plan))
}

/// Full reconciliation: fetch, diff, apply, summarize.
///
/// Only snapshot failures are returned as errors; per-account failures are
/// part of the report.
pub fn run(
    config: &SyncConfig,
    source: &dyn RosterSource,
    directory: &dyn Directory,
) -> Result<RunReport, SyncError> {
    let started_at = Utc::now();
    let (snapshot, plan) = prepare(config, source, directory)?;
    let results = mutator::apply(
        &plan,
        &snapshot.roster,
        &snapshot.directory.accounts,
        config,
        directory,
    );
    let summary = RunSummary::new(config, &snapshot, &plan, &results, started_at);
    Ok(RunReport {
        plan,
        results,
        summary,
    })
}
