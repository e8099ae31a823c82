//! Status enums for various entities.

use core::time::Duration;

use serde::{Deserialize, Serialize};

/// Purpose of an issued auth token.
///
/// Every token row carries exactly one kind, and lookups always filter by it,
/// so a password reset token can never be redeemed as an access token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "shop.token_kind", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// Sent by email after registration; single use.
    VerifyAccount,
    /// Sent by email on request; single use.
    PasswordReset,
    /// Returned by `tokenAuth`.
    Access,
}

impl TokenKind {
    /// How long a freshly issued token of this kind stays valid.
    #[must_use]
    pub const fn lifetime(self) -> Duration {
        match self {
            Self::VerifyAccount => Duration::from_secs(7 * 24 * 60 * 60),
            Self::PasswordReset => Duration::from_secs(60 * 60),
            Self::Access => Duration::from_secs(24 * 60 * 60),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_lifetimes() {
        assert!(TokenKind::PasswordReset.lifetime() < TokenKind::Access.lifetime());
        assert!(TokenKind::Access.lifetime() < TokenKind::VerifyAccount.lifetime());
    }

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&TokenKind::VerifyAccount).unwrap();
        assert_eq!(json, "\"verify_account\"");
    }
}
