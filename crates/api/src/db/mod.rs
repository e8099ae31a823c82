//! Database operations for the shop `PostgreSQL` schema.
//!
//! ## Tables
//!
//! - `shop.user` - Accounts (email, username, Argon2 password hash)
//! - `shop.product` - Catalog entries referenced by carts and favorites
//! - `shop.address` - User shipping addresses
//! - `shop.cart_item` - User cart lines
//! - `shop.favorite` - User product bookmarks
//! - `shop.auth_token` - Hashed verification, reset and access tokens
//!
//! # Store traits
//!
//! The mutation pipeline and the query helpers only see the [`UserLookup`],
//! [`ProductLookup`] and [`OwnedStore`] traits. The `sqlx` repositories in this module implement them
//! for production; tests use an in-memory implementation.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/api/migrations/` and run via:
//! ```bash
//! cargo run -p emporium-cli -- migrate
//! ```

pub mod addresses;
pub mod auth_tokens;
pub mod cart_items;
pub mod favorites;
#[cfg(test)]
pub mod memory;
pub mod products;
pub mod users;

use std::future::Future;
use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use emporium_core::{Email, ProductId, UserId};

use crate::models::{Owned, Product, User};

pub use addresses::AddressRepository;
pub use auth_tokens::{AuthToken, AuthTokenRepository, NewToken};
pub use cart_items::CartItemRepository;
pub use favorites::FavoriteRepository;
pub use products::ProductRepository;
pub use users::UserRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

impl RepositoryError {
    /// Maps a unique violation to [`RepositoryError::Conflict`].
    pub(crate) fn from_unique(err: sqlx::Error, what: &str) -> Self {
        if let sqlx::Error::Database(ref db_err) = err
            && db_err.is_unique_violation()
        {
            return Self::Conflict(format!("{what} already exists"));
        }
        Self::Database(err)
    }
}

/// Read access to users.
pub trait UserLookup: Sync {
    fn find_user(
        &self,
        id: UserId,
    ) -> impl Future<Output = Result<Option<User>, RepositoryError>> + Send;

    fn find_user_by_email(
        &self,
        email: &Email,
    ) -> impl Future<Output = Result<Option<User>, RepositoryError>> + Send;
}

/// Resolves catalog products by id.
pub trait ProductLookup: Sync {
    fn find_product(
        &self,
        id: ProductId,
    ) -> impl Future<Output = Result<Option<Product>, RepositoryError>> + Send;
}

/// Persistence for one owned record type.
pub trait OwnedStore<R: Owned>: Sync {
    fn get(&self, id: R::Id) -> impl Future<Output = Result<Option<R>, RepositoryError>> + Send;

    /// Every record, ordered by id.
    fn list(&self) -> impl Future<Output = Result<Vec<R>, RepositoryError>> + Send;

    /// Records owned by `owner`, ordered by id. Empty when there are none.
    fn list_by_owner(
        &self,
        owner: UserId,
    ) -> impl Future<Output = Result<Vec<R>, RepositoryError>> + Send;

    fn insert(&self, draft: &R::Draft) -> impl Future<Output = Result<R, RepositoryError>> + Send;

    /// Overwrites the record's fields. `NotFound` if it vanished meanwhile.
    fn update(
        &self,
        id: R::Id,
        draft: &R::Draft,
    ) -> impl Future<Output = Result<R, RepositoryError>> + Send;

    /// Returns `true` if a row was deleted.
    fn delete(&self, id: R::Id) -> impl Future<Output = Result<bool, RepositoryError>> + Send;
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
