//! Blocking Nexus security REST client: users and roles.
//!
//! | operation   | request                                         | accepted |
//! |-------------|-------------------------------------------------|----------|
//! | list roles  | `GET  /service/rest/v1/security/roles`          | 200      |
//! | list users  | `GET  /service/rest/beta/security/users`        | 200      |
//! | create user | `POST /service/rest/beta/security/users`        | 200, 201 |
//! | update user | `PUT  /service/rest/beta/security/users/{id}`   | 200, 204 |
//!
//! A 404 on either listing is read as an empty directory.

use std::time::Duration;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::de::DeserializeOwned;
use serde_json::Value;

use rostersync_core::{LocalAccount, NewAccount, Role, SyncConfig};

use crate::error::{decode_err, RemoteError};
use crate::http::{agent, expect_status};
use crate::Directory;

const ROLES_PATH: &str = "/service/rest/v1/security/roles";
const USERS_PATH: &str = "/service/rest/beta/security/users";

/// Nexus client authenticated with HTTP basic credentials.
pub struct NexusClient {
    agent: ureq::Agent,
    base_url: String,
    authorization: String,
}

impl NexusClient {
    pub fn new(base_url: impl Into<String>, user: &str, password: &str, timeout: Duration) -> Self {
        Self {
            agent: agent(timeout),
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            authorization: format!("Basic {}", STANDARD.encode(format!("{user}:{password}"))),
        }
    }

    pub fn from_config(config: &SyncConfig) -> Self {
        Self::new(
            &config.nexus_url,
            &config.nexus_admin_user,
            &config.nexus_admin_pass,
            config.http_timeout,
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: &str, url: &str) -> ureq::Request {
        tracing::debug!(method, url, "nexus request");
        self.agent
            .request(method, url)
            .set("Authorization", &self.authorization)
            .set("Accept", "application/json")
    }

    /// GET a JSON array, keeping only object entries; 404 yields an empty list.
    fn list_objects(&self, path: &str) -> Result<Vec<Value>, RemoteError> {
        let url = format!("{}{path}", self.base_url);
        let response = match expect_status(&url, self.request("GET", &url).call(), &[200]) {
            Ok(response) => response,
            Err(err) if err.is_not_found() => return Ok(Vec::new()),
            Err(err) => return Err(err),
        };
        let items: Vec<Value> = response.into_json().map_err(|e| decode_err(&url, e))?;
        Ok(items.into_iter().filter(Value::is_object).collect())
    }
}

/// Deserialize each entry, skipping (and logging) the ones that do not fit.
fn parse_entries<T: DeserializeOwned>(kind: &str, items: Vec<Value>) -> Vec<T> {
    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(parsed) => Some(parsed),
            Err(err) => {
                tracing::warn!(kind, error = %err, "skipping malformed directory entry");
                None
            }
        })
        .collect()
}

impl Directory for NexusClient {
    fn list_users(&self) -> Result<Vec<LocalAccount>, RemoteError> {
        Ok(parse_entries("user", self.list_objects(USERS_PATH)?))
    }

    fn list_roles(&self) -> Result<Vec<Role>, RemoteError> {
        Ok(parse_entries("role", self.list_objects(ROLES_PATH)?))
    }

    fn create_user(&self, account: &NewAccount) -> Result<(), RemoteError> {
        let url = format!("{}{USERS_PATH}", self.base_url);
        let result = self.request("POST", &url).send_json(account);
        expect_status(&url, result, &[200, 201]).map(drop)
    }

    fn update_user(&self, account: &LocalAccount) -> Result<(), RemoteError> {
        let url = format!(
            "{}{USERS_PATH}/{}",
            self.base_url,
            urlencoding::encode(account.user_id.as_str())
        );
        let result = self.request("PUT", &url).send_json(account);
        expect_status(&url, result, &[200, 204]).map(drop)
    }
}
