//! Account mutations.
//!
//! Expected failures (bad input, wrong credentials, bad tokens) are reported
//! in the payload's `errors`, never as GraphQL errors.

use async_graphql::{Context, Object, Result, SimpleObject};

use super::user::UserObject;
use crate::services::{AuthError, AuthService};
use crate::state::AppState;

/// Response of `register`, `verifyAccount`, `sendPasswordResetEmail` and
/// `passwordReset`.
#[derive(Debug, Clone, PartialEq, Eq, SimpleObject)]
pub struct AuthPayload {
    pub success: bool,
    pub errors: Option<Vec<String>>,
}

impl<T> From<std::result::Result<T, AuthError>> for AuthPayload {
    fn from(result: std::result::Result<T, AuthError>) -> Self {
        match result {
            Ok(_) => Self {
                success: true,
                errors: None,
            },
            Err(err) => Self {
                success: false,
                errors: Some(err.into_messages()),
            },
        }
    }
}

/// Response of `tokenAuth`.
#[derive(SimpleObject)]
pub struct TokenAuthPayload {
    pub success: bool,
    pub errors: Option<Vec<String>>,
    /// Opaque access token, valid for 24 hours.
    pub token: Option<String>,
    pub user: Option<UserObject>,
}

fn auth_service(app: &AppState) -> AuthService<'_> {
    AuthService::new(app.pool(), app.mailer(), &app.config().base_url)
}

#[derive(Default)]
pub struct AuthMutation;

#[Object]
impl AuthMutation {
    /// Create an unverified account and mail its activation link.
    async fn register(
        &self,
        ctx: &Context<'_>,
        email: String,
        username: String,
        password1: String,
        password2: String,
    ) -> Result<AuthPayload> {
        let app = ctx.data::<AppState>()?;
        let result = auth_service(app)
            .register(&email, &username, &password1, &password2)
            .await;
        Ok(result.into())
    }

    async fn verify_account(&self, ctx: &Context<'_>, token: String) -> Result<AuthPayload> {
        let app = ctx.data::<AppState>()?;
        Ok(auth_service(app).verify_account(&token).await.into())
    }

    /// Exchange email and password for an access token.
    async fn token_auth(
        &self,
        ctx: &Context<'_>,
        email: String,
        password: String,
    ) -> Result<TokenAuthPayload> {
        let app = ctx.data::<AppState>()?;

        let payload = match auth_service(app).token_auth(&email, &password).await {
            Ok((user, token)) => TokenAuthPayload {
                success: true,
                errors: None,
                token: Some(token),
                user: Some(UserObject(user)),
            },
            Err(err) => TokenAuthPayload {
                success: false,
                errors: Some(err.into_messages()),
                token: None,
                user: None,
            },
        };
        Ok(payload)
    }

    async fn send_password_reset_email(
        &self,
        ctx: &Context<'_>,
        email: String,
    ) -> Result<AuthPayload> {
        let app = ctx.data::<AppState>()?;
        Ok(auth_service(app)
            .send_password_reset_email(&email)
            .await
            .into())
    }

    /// Set a new password using the token from the reset email.
    async fn password_reset(
        &self,
        ctx: &Context<'_>,
        token: String,
        new_password1: String,
        new_password2: String,
    ) -> Result<AuthPayload> {
        let app = ctx.data::<AppState>()?;
        let result = auth_service(app)
            .password_reset(&token, &new_password1, &new_password2)
            .await;
        Ok(result.into())
    }
}
