//! Address type, queries and mutations.

use async_graphql::{Context, ID, Object, Result, SimpleObject};
use chrono::{DateTime, Utc};

use super::payload::{DeletePayload, Outcome};
use super::user::UserObject;
use crate::db::{AddressRepository, OwnedStore, ProductRepository, UserRepository};
use crate::error::ResolverResultExt;
use crate::models::{Address, AddressInput, Ref};
use crate::services::mutation::{self, Delete, Upsert};
use crate::services::query;
use crate::state::AppState;

pub struct AddressObject(pub Address);

#[Object(name = "Address")]
impl AddressObject {
    async fn id(&self) -> ID {
        ID::from(self.0.id.to_string())
    }

    async fn address_line1(&self) -> &str {
        &self.0.address_line1
    }

    async fn address_line2(&self) -> Option<&str> {
        self.0.address_line2.as_deref()
    }

    async fn city(&self) -> &str {
        &self.0.city
    }

    async fn state(&self) -> &str {
        &self.0.state
    }

    async fn postal_code(&self) -> &str {
        &self.0.postal_code
    }

    async fn country(&self) -> &str {
        &self.0.country
    }

    async fn created_at(&self) -> DateTime<Utc> {
        self.0.created_at
    }

    async fn updated_at(&self) -> DateTime<Utc> {
        self.0.updated_at
    }

    /// The owning user.
    async fn user(&self, ctx: &Context<'_>) -> Result<Option<UserObject>> {
        let state = ctx.data::<AppState>()?;
        let user = UserRepository::new(state.pool())
            .get_by_id(self.0.user_id)
            .await
            .or_internal()?;
        Ok(user.map(UserObject))
    }
}

/// Response of `upsertAddress`.
#[derive(SimpleObject)]
pub struct UpsertAddressPayload {
    pub address: Option<AddressObject>,
    pub success: bool,
    pub message: Option<String>,
    pub errors: Option<Vec<String>>,
}

impl From<Outcome<AddressObject>> for UpsertAddressPayload {
    fn from(outcome: Outcome<AddressObject>) -> Self {
        Self {
            address: outcome.entity,
            success: outcome.success,
            message: outcome.message,
            errors: Some(outcome.errors),
        }
    }
}

#[derive(Default)]
pub struct AddressQuery;

#[Object]
impl AddressQuery {
    async fn get_all_addresses(&self, ctx: &Context<'_>) -> Result<Vec<AddressObject>> {
        let state = ctx.data::<AppState>()?;
        let addresses = AddressRepository::new(state.pool())
            .list()
            .await
            .or_internal()?;
        Ok(addresses.into_iter().map(AddressObject).collect())
    }

    async fn get_addresses_by_user_id(
        &self,
        ctx: &Context<'_>,
        user_id: ID,
    ) -> Result<Vec<AddressObject>> {
        let state = ctx.data::<AppState>()?;
        let store = AddressRepository::new(state.pool());
        let addresses: Vec<Address> = query::owned_by(&store, Ref::parse(&user_id))
            .await
            .or_internal()?;
        Ok(addresses.into_iter().map(AddressObject).collect())
    }

    /// The address with this id, or null.
    async fn get_address_by_id(&self, ctx: &Context<'_>, id: ID) -> Result<Option<AddressObject>> {
        let state = ctx.data::<AppState>()?;
        let store = AddressRepository::new(state.pool());
        let address: Option<Address> = query::record(&store, Ref::parse(&id))
            .await
            .or_internal()?;
        Ok(address.map(AddressObject))
    }
}

#[derive(Default)]
pub struct AddressMutation;

#[Object]
impl AddressMutation {
    /// Create an address, or update the one named by `id`.
    #[allow(clippy::too_many_arguments)]
    async fn upsert_address(
        &self,
        ctx: &Context<'_>,
        id: Option<ID>,
        user_id: ID,
        address_line1: String,
        address_line2: Option<String>,
        city: String,
        state: String,
        postal_code: String,
        country: String,
    ) -> Result<UpsertAddressPayload> {
        let app = ctx.data::<AppState>()?;
        let request = Upsert::<Address> {
            owner: Ref::parse(&user_id),
            product: Ref::Id(()),
            target: id.map(|id| Ref::parse(&id)),
            input: AddressInput {
                address_line1,
                address_line2,
                city,
                state,
                postal_code,
                country,
            },
        };

        let result = mutation::upsert(
            &UserRepository::new(app.pool()),
            &ProductRepository::new(app.pool()),
            &AddressRepository::new(app.pool()),
            request,
        )
        .await;

        Ok(Outcome::from_saved(result, AddressObject).into())
    }

    async fn delete_address(
        &self,
        ctx: &Context<'_>,
        id: ID,
        user_id: ID,
    ) -> Result<DeletePayload> {
        let app = ctx.data::<AppState>()?;
        let result = mutation::delete(
            &UserRepository::new(app.pool()),
            &AddressRepository::new(app.pool()),
            Delete::<Address> {
                owner: Ref::parse(&user_id),
                target: Ref::parse(&id),
            },
        )
        .await;

        Ok(result.into())
    }
}
