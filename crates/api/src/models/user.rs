//! User domain types.

use chrono::{DateTime, Utc};

use emporium_core::{Email, UserId};

/// A shop user.
///
/// The password hash is deliberately not part of this type; it is only
/// loaded by the credential check in [`crate::db::UserRepository`].
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// User's email address (unique).
    pub email: Email,
    /// Display name chosen at registration.
    pub username: String,
    /// Whether the account has been activated via the emailed link.
    pub verified: bool,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}
