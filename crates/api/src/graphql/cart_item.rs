//! Cart item type, queries and mutations.

use async_graphql::{Context, ID, Object, Result, SimpleObject};
use chrono::{DateTime, Utc};

use super::payload::{DeletePayload, Outcome};
use super::product::ProductObject;
use super::user::UserObject;
use crate::db::{CartItemRepository, OwnedStore, ProductRepository, UserRepository};
use crate::error::ResolverResultExt;
use crate::models::{CartItem, CartItemInput, Ref};
use crate::services::mutation::{self, Delete, Upsert};
use crate::services::query;
use crate::state::AppState;

pub struct CartItemObject(pub CartItem);

#[Object(name = "CartItem")]
impl CartItemObject {
    async fn id(&self) -> ID {
        ID::from(self.0.id.to_string())
    }

    async fn quantity(&self) -> i32 {
        self.0.quantity
    }

    async fn created_at(&self) -> DateTime<Utc> {
        self.0.created_at
    }

    async fn updated_at(&self) -> DateTime<Utc> {
        self.0.updated_at
    }

    async fn user(&self, ctx: &Context<'_>) -> Result<Option<UserObject>> {
        let state = ctx.data::<AppState>()?;
        let user = UserRepository::new(state.pool())
            .get_by_id(self.0.user_id)
            .await
            .or_internal()?;
        Ok(user.map(UserObject))
    }

    async fn product(&self, ctx: &Context<'_>) -> Result<Option<ProductObject>> {
        let state = ctx.data::<AppState>()?;
        let product = ProductRepository::new(state.pool())
            .get_by_id(self.0.product_id)
            .await
            .or_internal()?;
        Ok(product.map(ProductObject))
    }
}

/// Response of `upsertCartItem`.
#[derive(SimpleObject)]
pub struct UpsertCartItemPayload {
    pub cart_item: Option<CartItemObject>,
    pub success: bool,
    pub message: Option<String>,
    pub errors: Option<Vec<String>>,
}

impl From<Outcome<CartItemObject>> for UpsertCartItemPayload {
    fn from(outcome: Outcome<CartItemObject>) -> Self {
        Self {
            cart_item: outcome.entity,
            success: outcome.success,
            message: outcome.message,
            errors: Some(outcome.errors),
        }
    }
}

#[derive(Default)]
pub struct CartItemQuery;

#[Object]
impl CartItemQuery {
    async fn get_all_cart_items(&self, ctx: &Context<'_>) -> Result<Vec<CartItemObject>> {
        let state = ctx.data::<AppState>()?;
        let items = CartItemRepository::new(state.pool())
            .list()
            .await
            .or_internal()?;
        Ok(items.into_iter().map(CartItemObject).collect())
    }

    async fn get_cart_items_by_user_id(
        &self,
        ctx: &Context<'_>,
        user_id: ID,
    ) -> Result<Vec<CartItemObject>> {
        let state = ctx.data::<AppState>()?;
        let store = CartItemRepository::new(state.pool());
        let items: Vec<CartItem> = query::owned_by(&store, Ref::parse(&user_id))
            .await
            .or_internal()?;
        Ok(items.into_iter().map(CartItemObject).collect())
    }

    async fn get_cart_item_by_id(
        &self,
        ctx: &Context<'_>,
        id: ID,
    ) -> Result<Option<CartItemObject>> {
        let state = ctx.data::<AppState>()?;
        let store = CartItemRepository::new(state.pool());
        let item: Option<CartItem> = query::record(&store, Ref::parse(&id))
            .await
            .or_internal()?;
        Ok(item.map(CartItemObject))
    }
}

#[derive(Default)]
pub struct CartItemMutation;

#[Object]
impl CartItemMutation {
    /// Add a product to the user's cart, or change the quantity of the line named by `id`.
    async fn upsert_cart_item(
        &self,
        ctx: &Context<'_>,
        id: Option<ID>,
        user_id: ID,
        product_id: ID,
        quantity: i32,
    ) -> Result<UpsertCartItemPayload> {
        let app = ctx.data::<AppState>()?;
        let request = Upsert::<CartItem> {
            owner: Ref::parse(&user_id),
            product: Ref::parse(&product_id),
            target: id.map(|id| Ref::parse(&id)),
            input: CartItemInput { quantity },
        };

        let result = mutation::upsert(
            &UserRepository::new(app.pool()),
            &ProductRepository::new(app.pool()),
            &CartItemRepository::new(app.pool()),
            request,
        )
        .await;

        Ok(Outcome::from_saved(result, CartItemObject).into())
    }

    async fn delete_cart_item(
        &self,
        ctx: &Context<'_>,
        id: ID,
        user_id: ID,
    ) -> Result<DeletePayload> {
        let app = ctx.data::<AppState>()?;
        let result = mutation::delete(
            &UserRepository::new(app.pool()),
            &CartItemRepository::new(app.pool()),
            Delete::<CartItem> {
                owner: Ref::parse(&user_id),
                target: Ref::parse(&id),
            },
        )
        .await;

        Ok(result.into())
    }
}
