//! Error types for rostersync-remote.

use thiserror::Error;

/// All errors that can arise from a call to either REST API.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// Connection, TLS, DNS or timeout failure; no response was received.
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: Box<ureq::Transport>,
    },

    /// The server answered with a status the call does not accept.
    #[error("unexpected status {status} from {url}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    /// The response body was not the JSON shape the call expects.
    #[error("could not decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: std::io::Error,
    },
}

impl RemoteError {
    /// `true` when the server answered 404.
    pub fn is_not_found(&self) -> bool {
        matches!(self, RemoteError::Status { status: 404, .. })
    }
}

/// Convenience constructor for [`RemoteError::Decode`].
pub(crate) fn decode_err(url: &str, source: std::io::Error) -> RemoteError {
    RemoteError::Decode {
        url: url.to_owned(),
        source,
    }
}
