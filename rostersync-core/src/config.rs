//! Run configuration, read once from environment-style key/value pairs.
//!
//! # Keys
//!
//! ```text
//! required  NEXUS_URL, NEXUS_ADMIN_PASS, GITHUB_ORG, GITHUB_TOKEN
//! optional  NEXUS_ADMIN_USER=admin
//!           DEFAULT_ROLES=nx-browser
//!           USERNAME_STRATEGY=github_login|email_localpart|raw
//!           DISABLE_MISSING=false
//!           DEFAULT_PASSWORD=unused-temp
//!           EXCLUDE_USERS=admin
//!           DRY_RUN=false
//!           GITHUB_API_URL=https://api.github.com
//!           HTTP_TIMEOUT_SECS=90
//! ```
//!
//! [`SyncConfig::from_lookup`] takes any lookup function so tests never touch
//! the process environment; [`SyncConfig::from_env`] binds it to `std::env`.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::Serialize;

use crate::error::{invalid, ConfigError};
use crate::types::{AccountId, RoleId};

pub const NEXUS_URL: &str = "NEXUS_URL";
pub const NEXUS_ADMIN_USER: &str = "NEXUS_ADMIN_USER";
pub const NEXUS_ADMIN_PASS: &str = "NEXUS_ADMIN_PASS";
pub const GITHUB_ORG: &str = "GITHUB_ORG";
pub const GITHUB_TOKEN: &str = "GITHUB_TOKEN";
pub const GITHUB_API_URL: &str = "GITHUB_API_URL";
pub const DEFAULT_ROLES: &str = "DEFAULT_ROLES";
pub const USERNAME_STRATEGY: &str = "USERNAME_STRATEGY";
pub const DISABLE_MISSING: &str = "DISABLE_MISSING";
pub const DEFAULT_PASSWORD: &str = "DEFAULT_PASSWORD";
pub const EXCLUDE_USERS: &str = "EXCLUDE_USERS";
pub const DRY_RUN: &str = "DRY_RUN";
pub const HTTP_TIMEOUT_SECS: &str = "HTTP_TIMEOUT_SECS";

const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
const DEFAULT_TIMEOUT_SECS: u64 = 90;

// ---------------------------------------------------------------------------
// Username strategy
// ---------------------------------------------------------------------------

/// How a remote login is mapped onto a local account id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UsernameStrategy {
    /// Use the login verbatim.
    #[default]
    GithubLogin,
    /// Local part of the profile email, falling back to the login.
    #[serde(rename = "email_localpart")]
    EmailLocalPart,
    /// Use the login verbatim (kept as a distinct name for existing configs).
    Raw,
}

impl FromStr for UsernameStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "github_login" | "verbatim-id" | "login" => Ok(Self::GithubLogin),
            "email_localpart" | "email-local-part" => Ok(Self::EmailLocalPart),
            "raw" | "raw-passthrough" => Ok(Self::Raw),
            other => Err(format!(
                "unknown username strategy '{other}'; expected: github_login, email_localpart, raw"
            )),
        }
    }
}

impl fmt::Display for UsernameStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UsernameStrategy::GithubLogin => write!(f, "github_login"),
            UsernameStrategy::EmailLocalPart => write!(f, "email_localpart"),
            UsernameStrategy::Raw => write!(f, "raw"),
        }
    }
}

// ---------------------------------------------------------------------------
// SyncConfig
// ---------------------------------------------------------------------------

/// Immutable configuration for one reconciliation run.
#[derive(Clone, PartialEq, Eq)]
pub struct SyncConfig {
    /// Directory base URL without a trailing slash.
    pub nexus_url: String,
    pub nexus_admin_user: String,
    pub nexus_admin_pass: String,
    pub github_org: String,
    pub github_token: String,
    /// GitHub REST base URL without a trailing slash.
    pub github_api_url: String,
    pub default_roles: Vec<RoleId>,
    pub username_strategy: UsernameStrategy,
    pub disable_missing: bool,
    pub default_password: String,
    pub exclude_users: BTreeSet<AccountId>,
    pub dry_run: bool,
    pub http_timeout: Duration,
}

impl SyncConfig {
    /// Build the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    ///
    /// Every missing required key is reported in a single
    /// [`ConfigError::Missing`]. Empty values count as unset, except for the
    /// two list keys where an empty value means an empty list.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mut missing = Vec::new();
        let mut required = |key: &'static str| {
            let value = get(key);
            if value.is_none() {
                missing.push(key);
            }
            value.unwrap_or_default()
        };
        let nexus_url = required(NEXUS_URL);
        let nexus_admin_pass = required(NEXUS_ADMIN_PASS);
        let github_org = required(GITHUB_ORG);
        let github_token = required(GITHUB_TOKEN);
        if !missing.is_empty() {
            return Err(ConfigError::Missing { keys: missing });
        }

        let username_strategy = match get(USERNAME_STRATEGY) {
            Some(raw) => raw
                .parse::<UsernameStrategy>()
                .map_err(|reason: String| invalid(USERNAME_STRATEGY, &raw, reason))?,
            None => UsernameStrategy::default(),
        };

        let http_timeout = match get(HTTP_TIMEOUT_SECS) {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => return Err(invalid(HTTP_TIMEOUT_SECS, &raw, "expected a positive integer")),
            },
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self {
            nexus_url: trim_base_url(&nexus_url),
            nexus_admin_user: get(NEXUS_ADMIN_USER).unwrap_or_else(|| "admin".to_owned()),
            nexus_admin_pass,
            github_org,
            github_token,
            github_api_url: trim_base_url(
                &get(GITHUB_API_URL).unwrap_or_else(|| DEFAULT_GITHUB_API_URL.to_owned()),
            ),
            default_roles: split_list(&lookup(DEFAULT_ROLES).unwrap_or_else(|| "nx-browser".into()))
                .map(RoleId::from)
                .collect(),
            username_strategy,
            disable_missing: parse_flag(DISABLE_MISSING, get(DISABLE_MISSING))?,
            default_password: get(DEFAULT_PASSWORD).unwrap_or_else(|| "unused-temp".to_owned()),
            exclude_users: split_list(&lookup(EXCLUDE_USERS).unwrap_or_else(|| "admin".into()))
                .map(AccountId::from)
                .collect(),
            dry_run: parse_flag(DRY_RUN, get(DRY_RUN))?,
            http_timeout,
        })
    }

    pub fn is_excluded(&self, id: &AccountId) -> bool {
        self.exclude_users.contains(id)
    }
}

impl fmt::Debug for SyncConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncConfig")
            .field("nexus_url", &self.nexus_url)
            .field("nexus_admin_user", &self.nexus_admin_user)
            .field("nexus_admin_pass", &"<redacted>")
            .field("github_org", &self.github_org)
            .field("github_token", &"<redacted>")
            .field("github_api_url", &self.github_api_url)
            .field("default_roles", &self.default_roles)
            .field("username_strategy", &self.username_strategy)
            .field("disable_missing", &self.disable_missing)
            .field("default_password", &"<redacted>")
            .field("exclude_users", &self.exclude_users)
            .field("dry_run", &self.dry_run)
            .field("http_timeout", &self.http_timeout)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Parsing helpers
// ---------------------------------------------------------------------------

fn trim_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_owned()
}

/// Comma-separated list with surrounding whitespace and blank items dropped.
fn split_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|s| !s.is_empty())
}

fn parse_flag(key: &'static str, raw: Option<String>) -> Result<bool, ConfigError> {
    let Some(raw) = raw else { return Ok(false) };
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(invalid(key, &raw, "expected true or false")),
    }
}
