//! Shipping addresses.

use chrono::{DateTime, Utc};
use validator::Validate;

use emporium_core::{AddressId, UserId};

use super::{Owned, not_blank};

/// A stored address.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Address {
    pub id: AddressId,
    pub user_id: UserId,
    pub address_line1: String,
    pub address_line2: Option<String>,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Address fields supplied by `upsertAddress`.
#[derive(Debug, Clone, Default)]
pub struct AddressInput {
    pub address_line1: String,
    pub address_line2: Option<String>,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
}

/// Validated field set written to `shop.address`.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct AddressDraft {
    pub user_id: UserId,
    #[validate(
        custom(function = "not_blank", message = "Address line 1 cannot be blank."),
        length(max = 255, message = "Address line 1 must be at most 255 characters.")
    )]
    pub address_line1: String,
    #[validate(length(max = 255, message = "Address line 2 must be at most 255 characters."))]
    pub address_line2: Option<String>,
    #[validate(
        custom(function = "not_blank", message = "City cannot be blank."),
        length(max = 100, message = "City must be at most 100 characters.")
    )]
    pub city: String,
    #[validate(
        custom(function = "not_blank", message = "State cannot be blank."),
        length(max = 100, message = "State must be at most 100 characters.")
    )]
    pub state: String,
    #[validate(
        custom(function = "not_blank", message = "Postal code cannot be blank."),
        length(max = 20, message = "Postal code must be at most 20 characters.")
    )]
    pub postal_code: String,
    #[validate(
        custom(function = "not_blank", message = "Country cannot be blank."),
        length(max = 100, message = "Country must be at most 100 characters.")
    )]
    pub country: String,
}

impl AddressDraft {
    fn from_input(user_id: UserId, input: AddressInput) -> Self {
        Self {
            user_id,
            address_line1: input.address_line1,
            // An empty second line is stored as absent.
            address_line2: input.address_line2.filter(|line| !line.trim().is_empty()),
            city: input.city,
            state: input.state,
            postal_code: input.postal_code,
            country: input.country,
        }
    }
}

impl Owned for Address {
    type Id = AddressId;
    type Product = ();
    type Input = AddressInput;
    type Draft = AddressDraft;

    const LABEL: &'static str = "Address";
    const NOUN: &'static str = "address";

    fn id(&self) -> AddressId {
        self.id
    }

    fn owner(&self) -> UserId {
        self.user_id
    }

    fn draft(owner: UserId, _product: (), input: AddressInput) -> AddressDraft {
        AddressDraft::from_input(owner, input)
    }

    fn revise(&self, _product: (), input: AddressInput) -> AddressDraft {
        AddressDraft::from_input(self.user_id, input)
    }
}
