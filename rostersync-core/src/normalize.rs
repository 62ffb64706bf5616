//! Identity normalizer: maps remote members onto local account ids.

use std::collections::BTreeMap;

use crate::config::UsernameStrategy;
use crate::types::{AccountId, NormalizedAccount, RemoteMember};

/// Last name used when a display name has no second component.
pub const LAST_NAME_PLACEHOLDER: &str = "user";

/// Domain of the synthesized address for members without a public email.
pub const PLACEHOLDER_EMAIL_DOMAIN: &str = "example.invalid";

/// Normalized roster keyed by account id.
pub type NormalizedRoster = BTreeMap<AccountId, NormalizedAccount>;

/// Derive the local account id for a login under `strategy`.
///
/// Never returns an empty id as long as `login` is non-empty.
pub fn account_id(strategy: UsernameStrategy, login: &str, email: Option<&str>) -> AccountId {
    match strategy {
        UsernameStrategy::GithubLogin | UsernameStrategy::Raw => AccountId::from(login),
        UsernameStrategy::EmailLocalPart => email
            .and_then(|e| e.split('@').next())
            .filter(|local| !local.is_empty())
            .map_or_else(|| AccountId::from(login), AccountId::from),
    }
}

/// Split a display name on its first space into `(first, last)`.
///
/// An empty first component falls back to `fallback_first`; a missing or
/// empty last component falls back to [`LAST_NAME_PLACEHOLDER`].
pub fn split_name(full: &str, fallback_first: &str) -> (String, String) {
    let full = full.trim();
    let (first, last) = full.split_once(' ').unwrap_or((full, ""));
    let last = last.trim();

    let first = if first.is_empty() { fallback_first } else { first };
    let last = if last.is_empty() { LAST_NAME_PLACEHOLDER } else { last };
    (first.to_owned(), last.to_owned())
}

/// Normalize a single member. Excluded members are not filtered here.
pub fn normalize_member(strategy: UsernameStrategy, member: &RemoteMember) -> NormalizedAccount {
    let email = member.email.as_deref().map(str::trim).filter(|e| !e.is_empty());
    let id = account_id(strategy, &member.login, email);

    let display_name = member
        .display_name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(&member.login)
        .to_owned();
    let (first_name, last_name) = split_name(&display_name, id.as_str());

    NormalizedAccount {
        first_name,
        last_name,
        email: email.map_or_else(
            || format!("{}@{PLACEHOLDER_EMAIL_DOMAIN}", member.login),
            str::to_owned,
        ),
        display_name,
        source_login: member.login.clone(),
        account_id: id,
    }
}

/// Normalize the whole roster, dropping excluded ids.
///
/// When two logins map to the same account id the later one wins and a
/// warning is logged.
pub fn normalize_roster(
    strategy: UsernameStrategy,
    members: &[RemoteMember],
    is_excluded: impl Fn(&AccountId) -> bool,
) -> NormalizedRoster {
    let mut roster = NormalizedRoster::new();
    for member in members {
        let account = normalize_member(strategy, member);
        if is_excluded(&account.account_id) {
            tracing::info!(account_id = %account.account_id, "skipping excluded account");
            continue;
        }
        if let Some(previous) = roster.insert(account.account_id.clone(), account) {
            tracing::warn!(
                account_id = %previous.account_id,
                replaced_login = %previous.source_login,
                login = %member.login,
                "two members map to the same account id; keeping the later one"
            );
        }
    }
    roster
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_strategy_uses_local_part() {
        let id = account_id(UsernameStrategy::EmailLocalPart, "octo", Some("jane.doe@co.com"));
        assert_eq!(id.as_str(), "jane.doe");
    }

    #[test]
    fn email_strategy_falls_back_to_login_without_local_part() {
        assert_eq!(account_id(UsernameStrategy::EmailLocalPart, "octo", None).as_str(), "octo");
        assert_eq!(
            account_id(UsernameStrategy::EmailLocalPart, "octo", Some("@co.com")).as_str(),
            "octo"
        );
    }

    #[test]
    fn email_local_part_is_taken_verbatim() {
        let id = account_id(UsernameStrategy::EmailLocalPart, "octo", Some(" jane @co.com"));
        assert_eq!(id.as_str(), " jane ");
    }

    #[test]
    fn login_strategies_ignore_email() {
        for strategy in [UsernameStrategy::GithubLogin, UsernameStrategy::Raw] {
            assert_eq!(account_id(strategy, "Octo", Some("x@y.z")).as_str(), "Octo");
        }
    }

    #[test]
    fn name_without_space_gets_placeholder_last_name() {
        assert_eq!(split_name("Madonna", "m"), ("Madonna".into(), "user".into()));
    }

    #[test]
    fn name_splits_on_first_space_only() {
        assert_eq!(
            split_name("Guido van Rossum", "g"),
            ("Guido".into(), "van Rossum".into())
        );
    }
}
