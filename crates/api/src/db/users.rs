//! User repository for database operations.

use sqlx::PgPool;

use emporium_core::{AuthTokenId, Email, UserId};

use super::auth_tokens::{self, NewToken};
use super::{RepositoryError, UserLookup};
use crate::models::User;

const USER_COLUMNS: &str = "id, email, username, verified, created_at, updated_at";

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a user by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM shop.user WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    /// Get a user by their email address.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM shop.user WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    /// List every user, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<User>, RepositoryError> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM shop.user ORDER BY id"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(users)
    }

    /// Create a user together with their account verification token.
    ///
    /// Both rows are written in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create_with_password(
        &self,
        email: &Email,
        username: &str,
        password_hash: &str,
        verification: &NewToken,
    ) -> Result<User, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let user = sqlx::query_as::<_, User>(&format!(
            r"
            INSERT INTO shop.user (email, username, password_hash)
            VALUES ($1, $2, $3)
            RETURNING {USER_COLUMNS}
            "
        ))
        .bind(email)
        .bind(username)
        .bind(password_hash)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| RepositoryError::from_unique(e, "email"))?;

        auth_tokens::insert(&mut *tx, user.id, verification).await?;

        tx.commit().await?;

        Ok(user)
    }

    /// Get a user and their password hash by email, for credential checks.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_password_hash(
        &self,
        email: &Email,
    ) -> Result<Option<(User, Option<String>)>, RepositoryError> {
        let Some(user) = self.get_by_email(email).await? else {
            return Ok(None);
        };

        let hash: Option<String> =
            sqlx::query_scalar("SELECT password_hash FROM shop.user WHERE id = $1")
                .bind(user.id)
                .fetch_one(self.pool)
                .await?;

        Ok(Some((user, hash)))
    }

    /// Consume a verification token and activate its user in one transaction.
    ///
    /// Returns `false`, changing nothing, if the token was already consumed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user doesn't exist; the token
    /// stays unused.
    pub async fn redeem_verification(
        &self,
        token: AuthTokenId,
        id: UserId,
    ) -> Result<bool, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        if !auth_tokens::consume(&mut *tx, token).await? {
            return Ok(false);
        }
        let result = sqlx::query("UPDATE shop.user SET verified = TRUE WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        tx.commit().await?;
        Ok(true)
    }

    /// Consume a reset token and replace its user's password hash in one
    /// transaction.
    ///
    /// Returns `false`, changing nothing, if the token was already consumed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user doesn't exist; the token
    /// stays unused.
    pub async fn redeem_password_reset(
        &self,
        token: AuthTokenId,
        id: UserId,
        password_hash: &str,
    ) -> Result<bool, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        if !auth_tokens::consume(&mut *tx, token).await? {
            return Ok(false);
        }
        let result = sqlx::query("UPDATE shop.user SET password_hash = $2 WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        tx.commit().await?;
        Ok(true)
    }
}

impl UserLookup for UserRepository<'_> {
    async fn find_user(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        self.get_by_id(id).await
    }

    async fn find_user_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        self.get_by_email(email).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{Duration, Utc};
    use emporium_core::TokenKind;
    use uuid::Uuid;

    use super::*;
    use crate::db::AuthTokenRepository;

    async fn pool() -> PgPool {
        let url = std::env::var("EMPORIUM_DATABASE_URL").unwrap();
        PgPool::connect(&url).await.unwrap()
    }

    fn reset_token() -> NewToken {
        NewToken {
            kind: TokenKind::PasswordReset,
            token_hash: Uuid::new_v4().simple().to_string(),
            expires_at: Utc::now() + Duration::hours(1),
        }
    }

    #[tokio::test]
    #[ignore = "Requires database"]
    async fn test_failed_password_reset_keeps_token_unused() {
        let pool = pool().await;
        let users = UserRepository::new(&pool);
        let tokens = AuthTokenRepository::new(&pool);

        let email = Email::parse(&format!("reset-{}@example.com", Uuid::new_v4())).unwrap();
        let verification = NewToken {
            kind: TokenKind::VerifyAccount,
            ..reset_token()
        };
        let user = users
            .create_with_password(&email, "reset", "old-hash", &verification)
            .await
            .unwrap();
        let reset = reset_token();
        let stored = tokens.create(user.id, &reset).await.unwrap();

        // No such user: the password update fails after the token is consumed.
        let err = users
            .redeem_password_reset(stored.id, UserId::new(-1), "new-hash")
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));

        let still_active = tokens
            .find_active(TokenKind::PasswordReset, &reset.token_hash)
            .await
            .unwrap();
        assert_eq!(still_active.map(|token| token.id), Some(stored.id));

        assert!(
            users
                .redeem_password_reset(stored.id, user.id, "new-hash")
                .await
                .unwrap()
        );
        assert!(
            !users
                .redeem_password_reset(stored.id, user.id, "newer-hash")
                .await
                .unwrap()
        );
        let (_, hash) = users.get_password_hash(&email).await.unwrap().unwrap();
        assert_eq!(hash.as_deref(), Some("new-hash"));
    }

    #[tokio::test]
    #[ignore = "Requires database"]
    async fn test_failed_verification_keeps_token_unused() {
        let pool = pool().await;
        let users = UserRepository::new(&pool);
        let tokens = AuthTokenRepository::new(&pool);

        let email = Email::parse(&format!("verify-{}@example.com", Uuid::new_v4())).unwrap();
        let verification = NewToken {
            kind: TokenKind::VerifyAccount,
            ..reset_token()
        };
        let user = users
            .create_with_password(&email, "verify", "hash", &verification)
            .await
            .unwrap();
        let stored = tokens
            .find_active(TokenKind::VerifyAccount, &verification.token_hash)
            .await
            .unwrap()
            .unwrap();

        assert!(
            users
                .redeem_verification(stored.id, UserId::new(-1))
                .await
                .is_err()
        );
        assert!(
            tokens
                .find_active(TokenKind::VerifyAccount, &verification.token_hash)
                .await
                .unwrap()
                .is_some()
        );

        assert!(users.redeem_verification(stored.id, user.id).await.unwrap());
        assert!(users.get_by_id(user.id).await.unwrap().unwrap().verified);
    }
}
