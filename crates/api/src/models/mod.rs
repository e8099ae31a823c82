//! Domain models for the shop.
//!
//! Each owned record type (address, cart item, favorite) comes in three shapes:
//!
//! - the stored row (`Address`), decoded straight from `shop.address`
//! - the caller's field set (`AddressInput`), as received from a mutation
//! - the draft (`AddressDraft`), the validated field set about to be written
//!
//! The [`Owned`] trait ties the three together so the mutation pipeline in
//! [`crate::services::mutation`] can run once for every record type.

pub mod address;
pub mod cart_item;
pub mod favorite;
pub mod product;
pub mod user;

use std::fmt::{self, Display};
use std::str::FromStr;

use validator::{Validate, ValidationError, ValidationErrors};

use emporium_core::{ProductId, UserId};

pub use address::{Address, AddressDraft, AddressInput};
pub use cart_item::{CartItem, CartItemDraft, CartItemInput};
pub use favorite::{Favorite, FavoriteDraft};
pub use product::Product;
pub use user::User;

/// An id as sent by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ref<T> {
    Id(T),
    /// Could not be parsed, so it names no record.
    Malformed,
}

impl<T: FromStr> Ref<T> {
    /// Parses `raw`; anything that is not a valid id becomes `Malformed`.
    pub fn parse(raw: &str) -> Self {
        raw.parse().map_or(Self::Malformed, Self::Id)
    }
}

impl<T> From<T> for Ref<T> {
    fn from(id: T) -> Self {
        Self::Id(id)
    }
}

impl<T: Display> Display for Ref<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => id.fmt(f),
            Self::Malformed => f.write_str("malformed"),
        }
    }
}

/// A record that belongs to exactly one user.
///
/// The owner is fixed at creation: [`Owned::revise`] builds the update draft
/// from the stored record, so the stored owner always survives an update.
pub trait Owned: Sized + Send + Sync {
    /// Typed primary key.
    type Id: Copy + Eq + Send + Sync + Display;
    /// Record the row points at besides its owner: a `ProductId`, or `()`.
    type Product: Copy + Send + Sync;
    /// Caller-supplied fields for create or update.
    type Input: Send + Sync;
    /// Field set validated before any write.
    type Draft: Validate + Send + Sync;

    /// Capitalized name used at the start of messages ("Cart item").
    const LABEL: &'static str;
    /// Lowercase name used inside messages ("cart item").
    const NOUN: &'static str;

    fn id(&self) -> Self::Id;

    fn owner(&self) -> UserId;

    /// Product that must exist before the record is written, if any.
    fn product_id(_product: Self::Product) -> Option<ProductId> {
        None
    }

    /// Draft for a new record owned by `owner`.
    fn draft(owner: UserId, product: Self::Product, input: Self::Input) -> Self::Draft;

    /// Draft for updating this record with `input`.
    fn revise(&self, product: Self::Product, input: Self::Input) -> Self::Draft;
}

/// Rejects strings that are empty or whitespace only.
///
/// # Errors
///
/// Returns a `blank` validation error; the field attribute supplies the message.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Flattens validation failures into user-facing messages.
///
/// Every failure is reported, ordered by field name so responses are stable.
#[must_use]
pub fn validation_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|(a, _), (b, _)| a.cmp(b));

    fields
        .into_iter()
        .flat_map(|(field, issues)| {
            issues.iter().map(move |issue| {
                issue
                    .message
                    .as_ref()
                    .map_or_else(|| format!("{field} is invalid."), ToString::to_string)
            })
        })
        .collect()
}
