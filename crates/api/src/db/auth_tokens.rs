//! Auth token repository.
//!
//! Only the SHA-256 hash of a token is ever stored; the raw value leaves the
//! server once, by email or in the `tokenAuth` response.

use chrono::{DateTime, Utc};
use sqlx::{PgExecutor, PgPool};

use emporium_core::{AuthTokenId, TokenKind, UserId};

use super::RepositoryError;

const TOKEN_COLUMNS: &str = "id, user_id, kind, token_hash, expires_at, used_at, created_at";

/// A stored token row.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AuthToken {
    pub id: AuthTokenId,
    pub user_id: UserId,
    pub kind: TokenKind,
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
    pub used_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// A token about to be issued.
#[derive(Debug, Clone)]
pub struct NewToken {
    pub kind: TokenKind,
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
}

/// Repository for auth token database operations.
pub struct AuthTokenRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AuthTokenRepository<'a> {
    /// Create a new auth token repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Store a new token for a user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` on a hash collision.
    pub async fn create(
        &self,
        user_id: UserId,
        token: &NewToken,
    ) -> Result<AuthToken, RepositoryError> {
        insert(self.pool, user_id, token).await
    }

    /// Find an unexpired, unused token of the given kind by its hash.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_active(
        &self,
        kind: TokenKind,
        token_hash: &str,
    ) -> Result<Option<AuthToken>, RepositoryError> {
        let token = sqlx::query_as::<_, AuthToken>(&format!(
            r"
            SELECT {TOKEN_COLUMNS}
            FROM shop.auth_token
            WHERE kind = $1 AND token_hash = $2
              AND used_at IS NULL AND expires_at > NOW()
            "
        ))
        .bind(kind)
        .bind(token_hash)
        .fetch_optional(self.pool)
        .await?;

        Ok(token)
    }

    /// Remove expired and consumed tokens. Returns how many rows were deleted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn purge_expired(&self) -> Result<u64, RepositoryError> {
        let result = sqlx::query(
            "DELETE FROM shop.auth_token WHERE expires_at <= NOW() OR used_at IS NOT NULL",
        )
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}

/// Insert a token using any executor, so callers can join a transaction.
pub(crate) async fn insert<'e, E>(
    executor: E,
    user_id: UserId,
    token: &NewToken,
) -> Result<AuthToken, RepositoryError>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, AuthToken>(&format!(
        r"
        INSERT INTO shop.auth_token (user_id, kind, token_hash, expires_at)
        VALUES ($1, $2, $3, $4)
        RETURNING {TOKEN_COLUMNS}
        "
    ))
    .bind(user_id)
    .bind(token.kind)
    .bind(&token.token_hash)
    .bind(token.expires_at)
    .fetch_one(executor)
    .await
    .map_err(|e| RepositoryError::from_unique(e, "token"))
}

/// Consume a single-use token.
///
/// Returns `false` if it was already consumed by a concurrent request.
pub(crate) async fn consume<'e, E>(executor: E, id: AuthTokenId) -> Result<bool, RepositoryError>
where
    E: PgExecutor<'e>,
{
    let result = sqlx::query(
        "UPDATE shop.auth_token SET used_at = NOW() WHERE id = $1 AND used_at IS NULL",
    )
    .bind(id)
    .execute(executor)
    .await?;

    Ok(result.rows_affected() > 0)
}
