pub mod plan;
pub mod sync;

use std::path::Path;

use anyhow::{Context, Result};

use rostersync_core::SyncConfig;

/// Read the run configuration, loading `env_file` into the environment first.
pub fn load_config(env_file: Option<&Path>) -> Result<SyncConfig> {
    if let Some(path) = env_file {
        dotenvy::from_path(path)
            .with_context(|| format!("failed to load env file {}", path.display()))?;
    }
    SyncConfig::from_env().context("invalid configuration")
}
