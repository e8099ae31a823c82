//! Authentication service.
//!
//! Password accounts with emailed activation, opaque access tokens and
//! emailed password reset. Every issued token is random, returned or mailed
//! once, and stored only as its SHA-256 hash.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::Utc;
use rand::RngCore;
use sha2::{Digest, Sha256};
use sqlx::PgPool;
use tracing::instrument;

use emporium_core::{Email, TokenKind};

use crate::db::users::UserRepository;
use crate::db::{AuthTokenRepository, NewToken, RepositoryError};
use crate::models::User;
use crate::services::email::Mailer;

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Random bytes per issued token.
const TOKEN_BYTES: usize = 32;

/// Authentication service.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
    tokens: AuthTokenRepository<'a>,
    mailer: &'a Mailer,
    base_url: &'a str,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool, mailer: &'a Mailer, base_url: &'a str) -> Self {
        Self {
            users: UserRepository::new(pool),
            tokens: AuthTokenRepository::new(pool),
            mailer,
            base_url,
        }
    }

    /// Register a new, unverified user and mail the activation link.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail`, `BlankUsername`, `PasswordMismatch` or
    /// `WeakPassword` for bad input, and `UserAlreadyExists` for a taken email.
    #[instrument(skip_all)]
    pub async fn register(
        &self,
        email: &str,
        username: &str,
        password1: &str,
        password2: &str,
    ) -> Result<User, AuthError> {
        let email = Email::parse(email)?;
        let username = username.trim();
        if username.is_empty() {
            return Err(AuthError::BlankUsername);
        }
        if password1 != password2 {
            return Err(AuthError::PasswordMismatch);
        }
        validate_password(password1)?;

        let password_hash = hash_password(password1)?;
        let (token, verification) = issue_token(TokenKind::VerifyAccount);

        let user = self
            .users
            .create_with_password(&email, username, &password_hash, &verification)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
                other => AuthError::Repository(other),
            })?;

        tracing::info!(user_id = %user.id, "User registered");

        // The account exists now; a delivery failure must not undo that.
        let link = format!("{}/activate/{token}", self.base_url);
        if let Err(e) = self
            .mailer
            .send_activation(user.email.as_str(), &user.username, &link)
            .await
        {
            tracing::warn!(user_id = %user.id, error = %e, "Activation email failed");
        }

        Ok(user)
    }

    /// Activate an account with the emailed token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidToken` for an unknown, expired or used token
    /// and `AuthError::AlreadyVerified` if the account is already active.
    #[instrument(skip_all)]
    pub async fn verify_account(&self, token: &str) -> Result<User, AuthError> {
        let stored = self
            .tokens
            .find_active(TokenKind::VerifyAccount, &hash_token(token))
            .await?
            .ok_or(AuthError::InvalidToken)?;

        let user = self
            .users
            .get_by_id(stored.user_id)
            .await?
            .ok_or(AuthError::InvalidToken)?;

        if user.verified {
            return Err(AuthError::AlreadyVerified);
        }

        if !self.users.redeem_verification(stored.id, user.id).await? {
            return Err(AuthError::InvalidToken);
        }

        tracing::info!(user_id = %user.id, "Account verified");
        Ok(User {
            verified: true,
            ..user
        })
    }

    /// Check credentials and issue an access token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the email/password is wrong.
    #[instrument(skip_all)]
    pub async fn token_auth(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(User, String), AuthError> {
        let email = Email::parse(email).map_err(|_| AuthError::InvalidCredentials)?;

        let (user, password_hash) = self
            .users
            .get_password_hash(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let password_hash = password_hash.ok_or(AuthError::InvalidCredentials)?;
        verify_password(password, &password_hash)?;

        let (token, access) = issue_token(TokenKind::Access);
        self.tokens.create(user.id, &access).await?;

        tracing::info!(user_id = %user.id, "Access token issued");
        Ok((user, token))
    }

    /// Mail a password reset link.
    ///
    /// Unknown addresses succeed silently so the response does not reveal
    /// which emails have accounts.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotVerified` for an account that was never activated.
    #[instrument(skip_all)]
    pub async fn send_password_reset_email(&self, email: &str) -> Result<(), AuthError> {
        let email = Email::parse(email)?;

        let Some(user) = self.users.get_by_email(&email).await? else {
            tracing::info!("Password reset requested for unknown email");
            return Ok(());
        };

        if !user.verified {
            return Err(AuthError::NotVerified);
        }

        let (token, reset) = issue_token(TokenKind::PasswordReset);
        self.tokens.create(user.id, &reset).await?;

        let link = format!("{}/password-reset/{token}", self.base_url);
        self.mailer
            .send_password_reset(user.email.as_str(), &user.username, &link)
            .await?;

        tracing::info!(user_id = %user.id, "Password reset email sent");
        Ok(())
    }

    /// Set a new password with an emailed reset token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidToken`, `PasswordMismatch` or `WeakPassword`.
    #[instrument(skip_all)]
    pub async fn password_reset(
        &self,
        token: &str,
        new_password1: &str,
        new_password2: &str,
    ) -> Result<(), AuthError> {
        if new_password1 != new_password2 {
            return Err(AuthError::PasswordMismatch);
        }
        validate_password(new_password1)?;

        let stored = self
            .tokens
            .find_active(TokenKind::PasswordReset, &hash_token(token))
            .await?
            .ok_or(AuthError::InvalidToken)?;

        let password_hash = hash_password(new_password1)?;
        let redeemed = self
            .users
            .redeem_password_reset(stored.id, stored.user_id, &password_hash)
            .await?;
        if !redeemed {
            return Err(AuthError::InvalidToken);
        }

        tracing::info!(user_id = %stored.user_id, "Password reset");
        Ok(())
    }
}

/// Generate a raw token and the row that stores its hash.
fn issue_token(kind: TokenKind) -> (String, NewToken) {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    let token = URL_SAFE_NO_PAD.encode(bytes);

    let lifetime = chrono::Duration::from_std(kind.lifetime()).unwrap_or(chrono::Duration::zero());
    let row = NewToken {
        kind,
        token_hash: hash_token(&token),
        expires_at: Utc::now() + lifetime,
    };

    (token, row)
}

/// SHA-256 of a raw token, hex encoded.
fn hash_token(token: &str) -> String {
    hex::encode(Sha256::digest(token.trim().as_bytes()))
}

/// Validate password meets requirements.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "This password is too short. It must contain at least {MIN_PASSWORD_LENGTH} characters."
        )));
    }

    Ok(())
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}
