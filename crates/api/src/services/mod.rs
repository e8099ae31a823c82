//! Business logic services.
//!
//! - [`mutation`] - ownership-checked upsert/delete shared by all owned records
//! - [`query`] - lookups behind the read queries
//! - [`auth`] - registration, activation, access tokens and password reset
//! - [`email`] - transactional mail delivery

pub mod auth;
pub mod email;
pub mod mutation;
pub mod query;

pub use auth::{AuthError, AuthService};
pub use email::Mailer;
