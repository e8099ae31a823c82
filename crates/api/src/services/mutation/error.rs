//! Mutation error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Message shown in place of any storage failure.
pub const UNEXPECTED_ERROR: &str = "An unexpected error occurred.";

/// Why an upsert or delete was refused.
#[derive(Debug, Error)]
pub enum MutationError {
    /// A referenced user, product or target record does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The acting user does not own the target record.
    #[error("{0}")]
    Forbidden(String),

    /// The draft failed validation; every message is kept.
    #[error("validation failed: {}", .0.join(" "))]
    Validation(Vec<String>),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

impl MutationError {
    /// Messages reported to the caller.
    ///
    /// Storage failures are logged and captured to Sentry here, and replaced
    /// by a generic message.
    #[must_use]
    pub fn into_messages(self) -> Vec<String> {
        match self {
            Self::NotFound(message) | Self::Forbidden(message) => vec![message],
            Self::Validation(messages) => messages,
            Self::Repository(ref err) => {
                let event_id = sentry::capture_error(err);
                tracing::error!(
                    error = %err,
                    sentry_event_id = %event_id,
                    "Mutation failed"
                );
                vec![UNEXPECTED_ERROR.to_string()]
            }
        }
    }
}
