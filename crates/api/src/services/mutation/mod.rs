//! Ownership-checked upsert and delete for user-owned records.
//!
//! One pipeline serves addresses, cart items and favorites:
//!
//! 1. resolve the acting user
//! 2. resolve the referenced product, if the record type has one
//! 3. resolve the target record and check that the acting user owns it
//! 4. validate the draft
//! 5. write exactly once
//!
//! Any failure before step 5 returns without touching the store. An id the
//! caller sent that does not parse fails at its own step, exactly as an id
//! with no matching row would.

mod error;

pub use error::{MutationError, UNEXPECTED_ERROR};

use tracing::instrument;
use validator::Validate;

use emporium_core::UserId;

use crate::db::{OwnedStore, ProductLookup, UserLookup};
use crate::models::{Owned, Ref, User, validation_messages};

pub const USER_NOT_FOUND: &str = "User does not exist.";
pub const PRODUCT_NOT_FOUND: &str = "Product does not exist.";

/// Create (no target) or update (target) request.
pub struct Upsert<R: Owned> {
    pub owner: Ref<UserId>,
    pub product: Ref<R::Product>,
    pub target: Option<Ref<R::Id>>,
    pub input: R::Input,
}

/// Delete request.
pub struct Delete<R: Owned> {
    pub owner: Ref<UserId>,
    pub target: Ref<R::Id>,
}

/// Outcome of a successful upsert.
#[derive(Debug)]
pub struct Saved<R> {
    pub record: R,
    pub message: String,
    pub created: bool,
}

/// Outcome of a successful delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deleted {
    pub message: String,
}

/// Message for a target id that does not resolve.
#[must_use]
fn record_not_found<R: Owned>() -> String {
    format!("{} does not exist.", R::LABEL)
}

fn forbidden<R: Owned>(action: &str) -> MutationError {
    MutationError::Forbidden(format!(
        "You do not have permission to {action} this {}.",
        R::NOUN
    ))
}

/// Create or update an owned record.
///
/// # Errors
///
/// - `NotFound` if the user, the product or the target record does not exist
/// - `Forbidden` if the target belongs to another user
/// - `Validation` with every failed rule
/// - `Repository` if the store fails
#[instrument(skip_all, fields(kind = R::NOUN, user_id = %request.owner))]
pub async fn upsert<R, U, P, S>(
    users: &U,
    products: &P,
    records: &S,
    request: Upsert<R>,
) -> Result<Saved<R>, MutationError>
where
    R: Owned,
    U: UserLookup,
    P: ProductLookup,
    S: OwnedStore<R>,
{
    let Upsert {
        owner,
        product,
        target,
        input,
    } = request;

    let owner = require_user(users, owner).await?;
    let product = require_product::<R, P>(products, product).await?;

    let (draft, existing) = match target {
        Some(target) => {
            let record = require_record(records, target).await?;
            if record.owner() != owner.id {
                tracing::warn!(
                    record_id = %record.id(),
                    owner_id = %record.owner(),
                    "Update refused"
                );
                return Err(forbidden::<R>("update"));
            }
            (record.revise(product, input), Some(record.id()))
        }
        None => (R::draft(owner.id, product, input), None),
    };

    draft
        .validate()
        .map_err(|errors| MutationError::Validation(validation_messages(&errors)))?;

    let saved = match existing {
        Some(id) => Saved {
            record: records.update(id, &draft).await?,
            message: format!("{} updated successfully.", R::LABEL),
            created: false,
        },
        None => Saved {
            record: records.insert(&draft).await?,
            message: format!("{} created successfully.", R::LABEL),
            created: true,
        },
    };

    tracing::info!(record_id = %saved.record.id(), created = saved.created, "Record saved");
    Ok(saved)
}

/// Delete an owned record.
///
/// # Errors
///
/// - `NotFound` if the user or the target record does not exist
/// - `Forbidden` if the target belongs to another user
/// - `Repository` if the store fails
#[instrument(skip_all, fields(kind = R::NOUN, user_id = %request.owner, record_id = %request.target))]
pub async fn delete<R, U, S>(
    users: &U,
    records: &S,
    request: Delete<R>,
) -> Result<Deleted, MutationError>
where
    R: Owned,
    U: UserLookup,
    S: OwnedStore<R>,
{
    let owner = require_user(users, request.owner).await?;
    let record = require_record(records, request.target).await?;

    if record.owner() != owner.id {
        tracing::warn!(owner_id = %record.owner(), "Delete refused");
        return Err(forbidden::<R>("delete"));
    }

    // A concurrent delete between lookup and write leaves nothing to remove.
    if !records.delete(record.id()).await? {
        return Err(MutationError::NotFound(record_not_found::<R>()));
    }

    tracing::info!("Record deleted");
    Ok(Deleted {
        message: format!("{} deleted successfully.", R::LABEL),
    })
}

async fn require_user<U: UserLookup>(users: &U, id: Ref<UserId>) -> Result<User, MutationError> {
    let missing = || MutationError::NotFound(USER_NOT_FOUND.to_string());
    let Ref::Id(id) = id else {
        return Err(missing());
    };
    users.find_user(id).await?.ok_or_else(missing)
}

async fn require_product<R, P>(
    products: &P,
    product: Ref<R::Product>,
) -> Result<R::Product, MutationError>
where
    R: Owned,
    P: ProductLookup,
{
    let missing = || MutationError::NotFound(PRODUCT_NOT_FOUND.to_string());
    let Ref::Id(product) = product else {
        return Err(missing());
    };
    if let Some(product_id) = R::product_id(product) {
        products.find_product(product_id).await?.ok_or_else(missing)?;
    }
    Ok(product)
}

async fn require_record<R, S>(records: &S, id: Ref<R::Id>) -> Result<R, MutationError>
where
    R: Owned,
    S: OwnedStore<R>,
{
    let missing = || MutationError::NotFound(record_not_found::<R>());
    let Ref::Id(id) = id else {
        return Err(missing());
    };
    records.get(id).await?.ok_or_else(missing)
}
