//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::email::EmailError;
use crate::services::mutation::UNEXPECTED_ERROR;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] emporium_core::EmailError),

    /// Username is empty.
    #[error("username is blank")]
    BlankUsername,

    /// The two password fields differ.
    #[error("passwords do not match")]
    PasswordMismatch,

    /// Password too weak or invalid.
    #[error("password validation failed: {0}")]
    WeakPassword(String),

    /// User already exists.
    #[error("user already exists")]
    UserAlreadyExists,

    /// Token unknown, expired, already used or of the wrong kind.
    #[error("invalid token")]
    InvalidToken,

    /// Account was verified before.
    #[error("account already verified")]
    AlreadyVerified,

    /// Invalid credentials (wrong password or user not found).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Account has not been verified yet.
    #[error("account not verified")]
    NotVerified,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,

    /// Outgoing mail failed.
    #[error("email error: {0}")]
    Email(#[from] EmailError),
}

impl AuthError {
    /// Messages reported to the caller.
    ///
    /// Server-side failures are logged and captured to Sentry here, and
    /// replaced by a generic message.
    #[must_use]
    pub fn into_messages(self) -> Vec<String> {
        let message = match self {
            Self::InvalidEmail(_) => "Enter a valid email address.",
            Self::BlankUsername => "Username cannot be blank.",
            Self::PasswordMismatch => "The two password fields didn't match.",
            Self::WeakPassword(message) => return vec![message],
            Self::UserAlreadyExists => "A user with that email already exists.",
            Self::InvalidToken => "Invalid token.",
            Self::AlreadyVerified => "Account already verified.",
            Self::InvalidCredentials => "Please, enter valid credentials.",
            Self::NotVerified => "Please verify your account.",
            Self::Repository(_) | Self::PasswordHash | Self::Email(_) => {
                let event_id = sentry::capture_error(&self);
                tracing::error!(
                    error = %self,
                    sentry_event_id = %event_id,
                    "Auth operation failed"
                );
                UNEXPECTED_ERROR
            }
        };
        vec![message.to_string()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            AuthError::InvalidCredentials.into_messages(),
            vec!["Please, enter valid credentials.".to_string()]
        );
        assert_eq!(
            AuthError::InvalidToken.into_messages(),
            vec!["Invalid token.".to_string()]
        );
        assert_eq!(
            AuthError::PasswordHash.into_messages(),
            vec![UNEXPECTED_ERROR.to_string()]
        );
    }
}
