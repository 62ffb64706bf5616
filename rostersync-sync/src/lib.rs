//! # rostersync-sync
//!
//! Reconciliation of a remote group roster against the local directory.
//!
//! Call [`pipeline::run`] for a full run, or [`pipeline::prepare`] to fetch
//! both snapshots and compute the [`Plan`] without mutating anything.

pub mod error;
pub mod mutator;
pub mod pipeline;
pub mod reconcile;
pub mod report;
pub mod roster;
pub mod snapshot;

pub use error::SyncError;
pub use mutator::{Action, MutationResult};
pub use pipeline::RunReport;
pub use reconcile::Plan;
pub use report::RunSummary;
pub use snapshot::Snapshot;
