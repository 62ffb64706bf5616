//! Domain types shared by the roster fetcher, the directory client and the
//! reconciliation engine.
//!
//! Wire-facing structs (`LocalAccount`, `NewAccount`, `Role`) serialize with
//! the directory's camelCase field names.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// Primary key of an account in the local directory (`userId`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(pub String);

impl AccountId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for AccountId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for AccountId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// Identifier of a permission role in the local directory.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleId(pub String);

impl fmt::Display for RoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for RoleId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for RoleId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Status of a local directory account.
///
/// Unknown values reported by the server are kept verbatim in
/// [`AccountStatus::Other`] so that a read-modify-write never rewrites them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum AccountStatus {
    #[default]
    Active,
    Locked,
    Disabled,
    ChangePassword,
    Other(String),
}

impl AccountStatus {
    pub fn as_str(&self) -> &str {
        match self {
            AccountStatus::Active => "active",
            AccountStatus::Locked => "locked",
            AccountStatus::Disabled => "disabled",
            AccountStatus::ChangePassword => "changepassword",
            AccountStatus::Other(s) => s,
        }
    }
}

impl From<String> for AccountStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "active" => AccountStatus::Active,
            "locked" => AccountStatus::Locked,
            "disabled" => AccountStatus::Disabled,
            "changepassword" => AccountStatus::ChangePassword,
            _ => AccountStatus::Other(s),
        }
    }
}

impl From<AccountStatus> for String {
    fn from(s: AccountStatus) -> Self {
        match s {
            AccountStatus::Other(raw) => raw,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Remote side
// ---------------------------------------------------------------------------

/// A member of the remote group, as fetched for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteMember {
    pub login: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
}

impl RemoteMember {
    /// A member whose profile could not be fetched.
    pub fn login_only(login: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            display_name: None,
            email: None,
        }
    }
}

/// A remote member mapped onto the local account-id space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedAccount {
    pub account_id: AccountId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub display_name: String,
    pub source_login: String,
}

// ---------------------------------------------------------------------------
// Local directory side
// ---------------------------------------------------------------------------

/// An existing account in the local directory.
///
/// Only the fields reconciliation reads are typed; everything else the
/// server returns lives in `extra` and is sent back unchanged on update.
/// A `null` status or role list reads as its default, so only `userId` is
/// required for a record to be kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalAccount {
    pub user_id: AccountId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: AccountStatus,
    #[serde(default, deserialize_with = "null_as_default")]
    pub roles: Vec<RoleId>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LocalAccount {
    pub fn is_disabled(&self) -> bool {
        self.status == AccountStatus::Disabled
    }

    /// Copy of this record with only the status changed to `disabled`.
    pub fn disabled(&self) -> Self {
        Self {
            status: AccountStatus::Disabled,
            ..self.clone()
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Creation payload for a new local account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    pub user_id: AccountId,
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    pub password: String,
    pub status: AccountStatus,
    pub roles: Vec<RoleId>,
}

impl NewAccount {
    /// Active account built from a normalized remote member.
    pub fn from_normalized(account: &NormalizedAccount, password: &str, roles: &[RoleId]) -> Self {
        Self {
            user_id: account.account_id.clone(),
            first_name: account.first_name.clone(),
            last_name: account.last_name.clone(),
            email_address: account.email.clone(),
            password: password.to_owned(),
            status: AccountStatus::Active,
            roles: roles.to_vec(),
        }
    }
}

/// A permission role available in the local directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: RoleId,
}
