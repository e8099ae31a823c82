//! Favorite type, queries and mutations.

use async_graphql::{Context, ID, Object, Result, SimpleObject};
use chrono::{DateTime, Utc};

use super::payload::{DeletePayload, Outcome};
use super::product::ProductObject;
use super::user::UserObject;
use crate::db::{FavoriteRepository, OwnedStore, ProductRepository, UserRepository};
use crate::error::ResolverResultExt;
use crate::models::{Favorite, Ref};
use crate::services::mutation::{self, Delete, Upsert};
use crate::services::query;
use crate::state::AppState;

pub struct FavoriteObject(pub Favorite);

#[Object(name = "Favorite")]
impl FavoriteObject {
    async fn id(&self) -> ID {
        ID::from(self.0.id.to_string())
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

#[derive(SimpleObject)]
pub struct UpsertFavoritePayload {
    pub favorite: Option<FavoriteObject>,
    pub success: bool,
    pub message: Option<String>,
    pub errors: Option<Vec<String>>,
}

impl From<Outcome<FavoriteObject>> for UpsertFavoritePayload {
    fn from(outcome: Outcome<FavoriteObject>) -> Self {
        Self {
            favorite: outcome.entity,
            success: outcome.success,
            message: outcome.message,
            errors: Some(outcome.errors),
        }
    }
}

#[derive(Default)]
pub struct FavoriteQuery;

#[Object]
impl FavoriteQuery {
    async fn get_all_favorites(&self, ctx: &Context<'_>) -> Result<Vec<FavoriteObject>> {
        let state = ctx.data::<AppState>()?;
        let favorites = FavoriteRepository::new(state.pool())
            .list()
            .await
            .or_internal()?;
        Ok(favorites.into_iter().map(FavoriteObject).collect())
    }

    async fn get_favorites_by_user_id(
        &self,
        ctx: &Context<'_>,
        user_id: ID,
    ) -> Result<Vec<FavoriteObject>> {
        let state = ctx.data::<AppState>()?;
        let store = FavoriteRepository::new(state.pool());
        let favorites: Vec<Favorite> = query::owned_by(&store, Ref::parse(&user_id))
            .await
            .or_internal()?;
        Ok(favorites.into_iter().map(FavoriteObject).collect())
    }

    async fn get_favorite_by_id(
        &self,
        ctx: &Context<'_>,
        id: ID,
    ) -> Result<Option<FavoriteObject>> {
        let state = ctx.data::<AppState>()?;
        let store = FavoriteRepository::new(state.pool());
        let favorite: Option<Favorite> = query::record(&store, Ref::parse(&id))
            .await
            .or_internal()?;
        Ok(favorite.map(FavoriteObject))
    }
}

#[derive(Default)]
pub struct FavoriteMutation;

#[Object]
impl FavoriteMutation {
    async fn upsert_favorite(
        &self,
        ctx: &Context<'_>,
        id: Option<ID>,
        user_id: ID,
        product_id: ID,
    ) -> Result<UpsertFavoritePayload> {
        let app = ctx.data::<AppState>()?;
        let result = mutation::upsert(
            &UserRepository::new(app.pool()),
            &ProductRepository::new(app.pool()),
            &FavoriteRepository::new(app.pool()),
            Upsert::<Favorite> {
                owner: Ref::parse(&user_id),
                product: Ref::parse(&product_id),
                target: id.map(|id| Ref::parse(&id)),
                input: (),
            },
        )
        .await;

        Ok(Outcome::from_saved(result, FavoriteObject).into())
    }

    async fn delete_favorite(
        &self,
        ctx: &Context<'_>,
        id: ID,
        user_id: ID,
    ) -> Result<DeletePayload> {
        let app = ctx.data::<AppState>()?;
        let result = mutation::delete(
            &UserRepository::new(app.pool()),
            &FavoriteRepository::new(app.pool()),
            Delete::<Favorite> {
                owner: Ref::parse(&user_id),
                target: Ref::parse(&id),
            },
        )
        .await;

        Ok(result.into())
    }
}
