//! Blocking GitHub REST client: organization members and user profiles.

use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;

use rostersync_core::SyncConfig;

use crate::error::{decode_err, RemoteError};
use crate::http::{agent, expect_status};
use crate::link::next_link;
use crate::{Profile, RosterSource};

const API_VERSION: &str = "2022-11-28";
const PAGE_SIZE: u32 = 100;

/// GitHub client authenticated with a static bearer token.
pub struct GithubClient {
    agent: ureq::Agent,
    api_url: String,
    token: String,
}

#[derive(Debug, Deserialize)]
struct UserProfile {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    email: Option<String>,
}

impl GithubClient {
    pub fn new(api_url: impl Into<String>, token: impl Into<String>, timeout: Duration) -> Self {
        Self {
            agent: agent(timeout),
            api_url: api_url.into().trim_end_matches('/').to_owned(),
            token: token.into(),
        }
    }

    pub fn from_config(config: &SyncConfig) -> Self {
        Self::new(&config.github_api_url, &config.github_token, config.http_timeout)
    }

    fn get(&self, url: &str) -> Result<ureq::Response, RemoteError> {
        tracing::debug!(url, "GET");
        let result = self
            .agent
            .get(url)
            .set("Authorization", &format!("Bearer {}", self.token))
            .set("Accept", "application/vnd.github+json")
            .set("X-GitHub-Api-Version", API_VERSION)
            .call();
        expect_status(url, result, &[200])
    }
}

impl RosterSource for GithubClient {
    fn list_group_members(&self, org: &str) -> Result<Vec<String>, RemoteError> {
        let mut url = format!(
            "{}/orgs/{}/members?per_page={PAGE_SIZE}",
            self.api_url,
            urlencoding::encode(org)
        );
        let mut logins = Vec::new();
        let mut pages = 0usize;

        loop {
            let response = self.get(&url)?;
            let next = response
                .header("Link")
                .and_then(next_link)
                .map(str::to_owned);
            let page: Vec<Value> = response.into_json().map_err(|e| decode_err(&url, e))?;
            pages += 1;

            logins.extend(
                page.iter()
                    .filter_map(|member| member.get("login")?.as_str())
                    .filter(|login| !login.is_empty())
                    .map(str::to_owned),
            );

            match next {
                Some(next) => url = next,
                None => break,
            }
        }

        tracing::debug!(org, pages, members = logins.len(), "listed organization members");
        Ok(logins)
    }

    fn fetch_profile(&self, login: &str) -> Result<Option<Profile>, RemoteError> {
        let url = format!("{}/users/{}", self.api_url, urlencoding::encode(login));
        let response = match self.get(&url) {
            Ok(response) => response,
            Err(err) if err.is_not_found() => return Ok(None),
            Err(err) => return Err(err),
        };
        let profile: UserProfile = response.into_json().map_err(|e| decode_err(&url, e))?;
        Ok(Some(Profile {
            name: profile.name,
            email: profile.email,
        }))
    }
}
