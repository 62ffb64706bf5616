//! Error types for rostersync-sync.

use thiserror::Error;

use rostersync_remote::RemoteError;

/// Fatal errors that abort a run. Per-account mutation failures are not
/// errors at this level; they are reported as
/// [`MutationResult::Failed`](crate::mutator::MutationResult::Failed).
#[derive(Debug, Error)]
pub enum SyncError {
    /// The group member listing could not be fetched.
    #[error("failed to list members of '{group}': {source}")]
    Roster {
        group: String,
        #[source]
        source: RemoteError,
    },

    /// The directory user listing could not be fetched.
    #[error("failed to list directory users: {0}")]
    Users(#[source] RemoteError),

    /// The directory role listing could not be fetched.
    #[error("failed to list directory roles: {0}")]
    Roles(#[source] RemoteError),
}
