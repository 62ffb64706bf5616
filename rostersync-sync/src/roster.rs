//! Remote roster fetch: member listing plus one profile lookup per member.

use rostersync_core::RemoteMember;
use rostersync_remote::{RemoteError, RosterSource};

/// Fetch every member of `group` with whatever profile data is available.
///
/// A failed listing is returned as an error. A failed profile lookup is
/// logged and the member continues with login-only data.
pub fn fetch_members(
    source: &dyn RosterSource,
    group: &str,
) -> Result<Vec<RemoteMember>, RemoteError> {
    let logins = source.list_group_members(group)?;
    tracing::debug!(group, members = logins.len(), "fetched roster");

    let members = logins
        .into_iter()
        .map(|login| match source.fetch_profile(&login) {
            Ok(Some(profile)) => RemoteMember {
                login,
                display_name: profile.name,
                email: profile.email,
            },
            Ok(None) => RemoteMember::login_only(login),
            Err(err) => {
                tracing::warn!(login = %login, error = %err, "profile fetch failed; using login only");
                RemoteMember::login_only(login)
            }
        })
        .collect();
    Ok(members)
}
