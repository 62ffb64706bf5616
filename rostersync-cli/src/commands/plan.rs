//! `rostersync plan`: show the changes `sync` would make. Never mutates.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use rostersync_remote::{GithubClient, NexusClient};
use rostersync_sync::{pipeline, Plan, Snapshot};

use super::load_config;

/// Arguments for `rostersync plan`.
#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Include disables for directory users missing from the roster.
    #[arg(long)]
    pub disable_missing: bool,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct PlanJson<'a> {
    github_org: &'a str,
    nexus_url: &'a str,
    total_considered: usize,
    existing_considered: usize,
    #[serde(flatten)]
    plan: &'a Plan,
}

#[derive(Tabled)]
struct PlanRow {
    #[tabled(rename = "action")]
    action: String,
    #[tabled(rename = "account")]
    account: String,
    #[tabled(rename = "detail")]
    detail: String,
}

impl PlanArgs {
    pub fn run(self, env_file: Option<&Path>) -> Result<()> {
        let mut config = load_config(env_file)?;
        config.disable_missing |= self.disable_missing;
        let config = config;

        let github = GithubClient::from_config(&config);
        let nexus = NexusClient::from_config(&config);
        let (snapshot, plan) =
            pipeline::prepare(&config, &github, &nexus).context("plan failed")?;

        if self.json {
            let payload = PlanJson {
                github_org: &config.github_org,
                nexus_url: &config.nexus_url,
                total_considered: snapshot.roster.len(),
                existing_considered: snapshot.directory.accounts.len(),
                plan: &plan,
            };
            println!(
                "{}",
                serde_json::to_string_pretty(&payload).context("failed to serialize plan JSON")?
            );
            return Ok(());
        }

        print_table(&config.github_org, &snapshot, &plan);
        Ok(())
    }
}

fn print_table(org: &str, snapshot: &Snapshot, plan: &Plan) {
    println!(
        "rostersync v{} | {} | {} remote | {} local",
        env!("CARGO_PKG_VERSION"),
        org.bold(),
        snapshot.roster.len(),
        snapshot.directory.accounts.len(),
    );

    for role in &plan.missing_roles {
        println!("{} default role '{role}' not found in directory", "warning:".yellow().bold());
    }

    if plan.is_empty() {
        println!("{} nothing to do", "✓".green().bold());
        return;
    }

    let mut rows = Vec::with_capacity(plan.to_create.len() + plan.to_disable.len());
    for id in &plan.to_create {
        let detail = snapshot
            .roster
            .get(id)
            .map(|account| format!("{} <{}>", account.display_name, account.email))
            .unwrap_or_default();
        rows.push(PlanRow {
            action: "create".green().to_string(),
            account: id.to_string(),
            detail,
        });
    }
    for id in &plan.to_disable {
        let (action, detail) = match snapshot.directory.accounts.get(id) {
            Some(account) if account.is_disabled() => {
                ("skip".bright_black().to_string(), "already disabled".to_string())
            }
            Some(account) => ("disable".red().to_string(), format!("status {}", account.status)),
            None => ("disable".red().to_string(), String::new()),
        };
        rows.push(PlanRow {
            action,
            account: id.to_string(),
            detail,
        });
    }

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
    println!("Run 'rostersync sync' to apply.");
}
