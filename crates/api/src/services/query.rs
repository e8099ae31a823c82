//! Read-side lookups behind the GraphQL queries.
//!
//! An id or email that cannot name anything is answered as "no match"
//! without reaching the store.

use emporium_core::{Email, UserId};

use crate::db::{OwnedStore, RepositoryError, UserLookup};
use crate::models::{Owned, Ref, User};

/// Records owned by `owner`; empty for a malformed id or a user with none.
///
/// # Errors
///
/// Returns `RepositoryError` if the store fails.
pub async fn owned_by<R, S>(store: &S, owner: Ref<UserId>) -> Result<Vec<R>, RepositoryError>
where
    R: Owned,
    S: OwnedStore<R>,
{
    match owner {
        Ref::Id(owner) => store.list_by_owner(owner).await,
        Ref::Malformed => Ok(Vec::new()),
    }
}

/// The record named by `id`, or `None`.
///
/// # Errors
///
/// Returns `RepositoryError` if the store fails.
pub async fn record<R, S>(store: &S, id: Ref<R::Id>) -> Result<Option<R>, RepositoryError>
where
    R: Owned,
    S: OwnedStore<R>,
{
    match id {
        Ref::Id(id) => store.get(id).await,
        Ref::Malformed => Ok(None),
    }
}

/// # Errors
///
/// Returns `RepositoryError` if the store fails.
pub async fn user<U: UserLookup>(users: &U, id: Ref<UserId>) -> Result<Option<User>, RepositoryError> {
    match id {
        Ref::Id(id) => users.find_user(id).await,
        Ref::Malformed => Ok(None),
    }
}

/// Users whose email equals `raw` (at most one, emails are unique).
///
/// # Errors
///
/// Returns `RepositoryError` if the store fails.
pub async fn users_by_email<U: UserLookup>(
    users: &U,
    raw: &str,
) -> Result<Vec<User>, RepositoryError> {
    let Ok(email) = Email::parse(raw) else {
        return Ok(Vec::new());
    };
    Ok(users.find_user_by_email(&email).await?.into_iter().collect())
}
