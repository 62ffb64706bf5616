//! Shared blocking HTTP plumbing for both clients.

use std::time::Duration;

use crate::error::RemoteError;

/// `User-Agent` sent on every request.
pub const USER_AGENT: &str = concat!("rostersync/", env!("CARGO_PKG_VERSION"));

pub(crate) fn agent(timeout: Duration) -> ureq::Agent {
    ureq::AgentBuilder::new()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
}

/// Turn a raw `ureq` result into a response whose status is in `expected`.
///
/// Any other status, including non-listed 2xx codes, becomes
/// [`RemoteError::Status`] carrying the response body.
pub(crate) fn expect_status(
    url: &str,
    result: Result<ureq::Response, ureq::Error>,
    expected: &[u16],
) -> Result<ureq::Response, RemoteError> {
    let response = match result {
        Ok(response) => response,
        Err(ureq::Error::Status(status, response)) => {
            return Err(RemoteError::Status {
                url: url.to_owned(),
                status,
                body: response.into_string().unwrap_or_default(),
            });
        }
        Err(ureq::Error::Transport(transport)) => {
            return Err(RemoteError::Transport {
                url: url.to_owned(),
                source: Box::new(transport),
            });
        }
    };

    let status = response.status();
    if expected.contains(&status) {
        Ok(response)
    } else {
        Err(RemoteError::Status {
            url: url.to_owned(),
            status,
            body: response.into_string().unwrap_or_default(),
        })
    }
}
