//! `rostersync sync`: apply the reconciliation and print the run summary.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;

use rostersync_remote::{GithubClient, NexusClient};
use rostersync_sync::pipeline;

use super::load_config;

/// Arguments for `rostersync sync`.
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Log intended changes without calling the directory (same as `DRY_RUN=true`).
    #[arg(long)]
    pub dry_run: bool,

    /// Disable directory users missing from the roster (same as `DISABLE_MISSING=true`).
    #[arg(long)]
    pub disable_missing: bool,
}

impl SyncArgs {
    pub fn run(self, env_file: Option<&Path>) -> Result<()> {
        let mut config = load_config(env_file)?;
        config.dry_run |= self.dry_run;
        config.disable_missing |= self.disable_missing;
        let config = config;

        tracing::info!(
            org = %config.github_org,
            nexus_url = %config.nexus_url,
            dry_run = config.dry_run,
            disable_missing = config.disable_missing,
            "starting reconciliation"
        );

        let github = GithubClient::from_config(&config);
        let nexus = NexusClient::from_config(&config);
        let report = pipeline::run(&config, &github, &nexus).context("sync failed")?;

        println!(
            "{}",
            report
                .summary
                .to_json_pretty()
                .context("failed to serialize run summary")?
        );
        Ok(())
    }
}
