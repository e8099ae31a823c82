//! User type and user queries.

use async_graphql::{Context, ID, Object, Result, SimpleObject};
use chrono::{DateTime, Utc};

use super::address::AddressObject;
use super::cart_item::CartItemObject;
use super::favorite::FavoriteObject;
use crate::db::{
    AddressRepository, CartItemRepository, FavoriteRepository, OwnedStore, UserRepository,
};
use crate::error::ResolverResultExt;
use crate::models::{Ref, User};
use crate::services::query;
use crate::state::AppState;

/// A shop user.
pub struct UserObject(pub User);

#[Object(name = "User")]
impl UserObject {
    async fn id(&self) -> ID {
        ID::from(self.0.id.to_string())
    }

    async fn email(&self) -> &str {
        self.0.email.as_str()
    }

    async fn username(&self) -> &str {
        &self.0.username
    }

    /// Whether the account was activated through the emailed link.
    async fn verified(&self) -> bool {
        self.0.verified
    }

    async fn created_at(&self) -> DateTime<Utc> {
        self.0.created_at
    }

    async fn updated_at(&self) -> DateTime<Utc> {
        self.0.updated_at
    }

    async fn addresses(&self, ctx: &Context<'_>) -> Result<Vec<AddressObject>> {
        let state = ctx.data::<AppState>()?;
        let addresses = AddressRepository::new(state.pool())
            .list_by_owner(self.0.id)
            .await
            .or_internal()?;
        Ok(addresses.into_iter().map(AddressObject).collect())
    }

    async fn cart_items(&self, ctx: &Context<'_>) -> Result<Vec<CartItemObject>> {
        let state = ctx.data::<AppState>()?;
        let items = CartItemRepository::new(state.pool())
            .list_by_owner(self.0.id)
            .await
            .or_internal()?;
        Ok(items.into_iter().map(CartItemObject).collect())
    }

    async fn favorites(&self, ctx: &Context<'_>) -> Result<Vec<FavoriteObject>> {
        let state = ctx.data::<AppState>()?;
        let favorites = FavoriteRepository::new(state.pool())
            .list_by_owner(self.0.id)
            .await
            .or_internal()?;
        Ok(favorites.into_iter().map(FavoriteObject).collect())
    }
}

/// Result of `allUser` and `getUserByEmail`.
#[derive(SimpleObject)]
pub struct UserListResult {
    pub users: Vec<UserObject>,
    pub status: bool,
    pub message: String,
}

/// Result of `userById`.
#[derive(SimpleObject)]
pub struct UserResult {
    pub user: Option<UserObject>,
    pub status: bool,
    pub message: String,
}

impl UserListResult {
    fn everyone(users: Vec<User>) -> Self {
        Self {
            users: users.into_iter().map(UserObject).collect(),
            status: true,
            message: "All users fetched successfully.".to_string(),
        }
    }

    fn from_matches(users: Vec<User>) -> Self {
        if users.is_empty() {
            return Self {
                users: Vec::new(),
                status: false,
                message: "No users found with the specified email.".to_string(),
            };
        }
        Self {
            users: users.into_iter().map(UserObject).collect(),
            status: true,
            message: "Users with the specified email fetched successfully.".to_string(),
        }
    }
}

impl UserResult {
    fn from_lookup(user: Option<User>) -> Self {
        match user {
            Some(user) => Self {
                user: Some(UserObject(user)),
                status: true,
                message: "User found successfully.".to_string(),
            },
            None => Self {
                user: None,
                status: false,
                message: "User not found.".to_string(),
            },
        }
    }
}

#[derive(Default)]
pub struct UserQuery;

#[Object]
impl UserQuery {
    /// Every user.
    async fn all_user(&self, ctx: &Context<'_>) -> Result<UserListResult> {
        let state = ctx.data::<AppState>()?;
        let users = UserRepository::new(state.pool()).list().await.or_internal()?;
        Ok(UserListResult::everyone(users))
    }

    /// Users whose email matches exactly.
    async fn get_user_by_email(&self, ctx: &Context<'_>, email: String) -> Result<UserListResult> {
        let state = ctx.data::<AppState>()?;
        let users = query::users_by_email(&UserRepository::new(state.pool()), &email)
            .await
            .or_internal()?;
        Ok(UserListResult::from_matches(users))
    }

    async fn user_by_id(&self, ctx: &Context<'_>, id: ID) -> Result<UserResult> {
        let state = ctx.data::<AppState>()?;
        let user = query::user(&UserRepository::new(state.pool()), Ref::parse(&id))
            .await
            .or_internal()?;
        Ok(UserResult::from_lookup(user))
    }
}
