//! In-memory fakes of the two remote APIs.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use rostersync_core::{
    config, AccountId, AccountStatus, LocalAccount, NewAccount, Role, RoleId, SyncConfig,
};
use rostersync_remote::{Directory, Profile, RemoteError, RosterSource};
use serde_json::{Map, Value};

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

pub fn config_with(overrides: &[(&str, &str)]) -> SyncConfig {
    let mut env: HashMap<String, String> = HashMap::from([
        (config::NEXUS_URL.to_string(), "http://nexus3:8081".to_string()),
        (config::NEXUS_ADMIN_PASS.to_string(), "admin123".to_string()),
        (config::GITHUB_ORG.to_string(), "acme".to_string()),
        (config::GITHUB_TOKEN.to_string(), "ghp_token".to_string()),
    ]);
    for (key, value) in overrides {
        env.insert(key.to_string(), value.to_string());
    }
    SyncConfig::from_lookup(|key| env.get(key).cloned()).expect("config")
}

// ---------------------------------------------------------------------------
// Roster
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct FakeRoster {
    pub logins: Vec<String>,
    pub profiles: HashMap<String, Profile>,
    pub broken_profiles: BTreeSet<String>,
    pub listing_fails: bool,
}

impl FakeRoster {
    pub fn with_member(mut self, login: &str, name: Option<&str>, email: Option<&str>) -> Self {
        self.logins.push(login.to_string());
        self.profiles.insert(
            login.to_string(),
            Profile {
                name: name.map(str::to_string),
                email: email.map(str::to_string),
            },
        );
        self
    }
}

impl RosterSource for FakeRoster {
    fn list_group_members(&self, group: &str) -> Result<Vec<String>, RemoteError> {
        if self.listing_fails {
            return Err(RemoteError::Status {
                url: format!("fake://orgs/{group}/members"),
                status: 502,
                body: "bad gateway".into(),
            });
        }
        Ok(self.logins.clone())
    }

    fn fetch_profile(&self, login: &str) -> Result<Option<Profile>, RemoteError> {
        if self.broken_profiles.contains(login) {
            return Err(RemoteError::Status {
                url: format!("fake://users/{login}"),
                status: 500,
                body: "boom".into(),
            });
        }
        Ok(self.profiles.get(login).cloned())
    }
}

// ---------------------------------------------------------------------------
// Directory
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Create(NewAccount),
    Update(LocalAccount),
}

/// Directory that applies successful mutations to its own state.
#[derive(Default)]
pub struct FakeDirectory {
    pub users: RefCell<BTreeMap<AccountId, LocalAccount>>,
    pub roles: Vec<Role>,
    pub failing: BTreeSet<AccountId>,
    pub users_listing_fails: bool,
    pub calls: RefCell<Vec<Call>>,
}

impl FakeDirectory {
    pub fn with_user(self, id: &str, status: AccountStatus) -> Self {
        let mut extra = Map::new();
        extra.insert("firstName".into(), Value::from(id));
        extra.insert("lastName".into(), Value::from("Existing"));
        extra.insert("emailAddress".into(), Value::from(format!("{id}@co.com")));
        extra.insert("source".into(), Value::from("default"));
        self.users.borrow_mut().insert(
            AccountId::from(id),
            LocalAccount {
                user_id: AccountId::from(id),
                status,
                roles: vec![RoleId::from("nx-browser")],
                extra,
            },
        );
        self
    }

    pub fn with_role(mut self, id: &str) -> Self {
        self.roles.push(Role { id: RoleId::from(id) });
        self
    }

    pub fn failing_on(mut self, id: &str) -> Self {
        self.failing.insert(AccountId::from(id));
        self
    }

    pub fn user(&self, id: &str) -> Option<LocalAccount> {
        self.users.borrow().get(&AccountId::from(id)).cloned()
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    fn reject(&self, id: &AccountId) -> Result<(), RemoteError> {
        if self.failing.contains(id) {
            return Err(RemoteError::Status {
                url: format!("fake://users/{id}"),
                status: 400,
                body: "rejected".into(),
            });
        }
        Ok(())
    }
}

impl Directory for FakeDirectory {
    fn list_users(&self) -> Result<Vec<LocalAccount>, RemoteError> {
        if self.users_listing_fails {
            return Err(RemoteError::Status {
                url: "fake://users".into(),
                status: 503,
                body: "unavailable".into(),
            });
        }
        Ok(self.users.borrow().values().cloned().collect())
    }

    fn list_roles(&self) -> Result<Vec<Role>, RemoteError> {
        Ok(self.roles.clone())
    }

    fn create_user(&self, account: &NewAccount) -> Result<(), RemoteError> {
        self.calls.borrow_mut().push(Call::Create(account.clone()));
        self.reject(&account.user_id)?;
        let mut extra = Map::new();
        extra.insert("firstName".into(), Value::from(account.first_name.clone()));
        extra.insert("lastName".into(), Value::from(account.last_name.clone()));
        extra.insert("emailAddress".into(), Value::from(account.email_address.clone()));
        self.users.borrow_mut().insert(
            account.user_id.clone(),
            LocalAccount {
                user_id: account.user_id.clone(),
                status: account.status.clone(),
                roles: account.roles.clone(),
                extra,
            },
        );
        Ok(())
    }

    fn update_user(&self, account: &LocalAccount) -> Result<(), RemoteError> {
        self.calls.borrow_mut().push(Call::Update(account.clone()));
        self.reject(&account.user_id)?;
        self.users
            .borrow_mut()
            .insert(account.user_id.clone(), account.clone());
        Ok(())
    }
}
