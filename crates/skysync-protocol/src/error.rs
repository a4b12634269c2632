//! Error taxonomy for sync operations.
//!
//! Negative server outcomes (`NotFound`, `NotSaved`, ...) are deliberately
//! not part of this enum: they are expected application flow, modeled as
//! [`crate::response::SyncOutcome::Negative`], and must never be conflated
//! with an error.

use skysync_codec::CodecError;
use thiserror::Error;

/// A failed sync operation.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The operation requires credentials the session does not hold. Fails
    /// before any network call.
    #[error("player is not authenticated")]
    NotAuthenticated,

    /// A malformed player id, friend id, or other path parameter. Fails
    /// before any network call.
    #[error("invalid {what}: `{value}`")]
    InvalidInput { what: &'static str, value: String },

    /// The response carried an `error` field; the message is the server's,
    /// verbatim.
    #[error("server error: {0}")]
    Server(String),

    /// The recomputed validation hash does not match the response's hash.
    /// Always fatal to the call; never retried silently.
    #[error("hash verification failed for {operation}")]
    ValidationFailure { operation: &'static str },

    /// The response matched none of the expected success, negative, or
    /// error shapes.
    #[error("bad server response: {0}")]
    MalformedResponse(String),

    /// A block or compression round-trip could not complete.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// The transport collaborator failed before a response arrived.
    #[error("transport failure: {0}")]
    Transport(String),
}

impl SyncError {
    /// Shorthand for an [`SyncError::InvalidInput`].
    pub fn invalid(what: &'static str, value: impl Into<String>) -> Self {
        SyncError::InvalidInput {
            what,
            value: value.into(),
        }
    }
}
