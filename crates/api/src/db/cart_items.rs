//! Cart item repository.

use sqlx::PgPool;

use emporium_core::{CartItemId, UserId};

use super::{OwnedStore, RepositoryError};
use crate::models::{CartItem, CartItemDraft};

const CART_ITEM_COLUMNS: &str = "id, user_id, product_id, quantity, created_at, updated_at";

/// Repository for `shop.cart_item`.
pub struct CartItemRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CartItemRepository<'a> {
    /// Create a new cart item repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }
}

impl OwnedStore<CartItem> for CartItemRepository<'_> {
    async fn get(&self, id: CartItemId) -> Result<Option<CartItem>, RepositoryError> {
        let item = sqlx::query_as::<_, CartItem>(&format!(
            "SELECT {CART_ITEM_COLUMNS} FROM shop.cart_item WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(item)
    }

    async fn list(&self) -> Result<Vec<CartItem>, RepositoryError> {
        let items = sqlx::query_as::<_, CartItem>(&format!(
            "SELECT {CART_ITEM_COLUMNS} FROM shop.cart_item ORDER BY id"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(items)
    }

    async fn list_by_owner(&self, owner: UserId) -> Result<Vec<CartItem>, RepositoryError> {
        let items = sqlx::query_as::<_, CartItem>(&format!(
            "SELECT {CART_ITEM_COLUMNS} FROM shop.cart_item WHERE user_id = $1 ORDER BY id"
        ))
        .bind(owner)
        .fetch_all(self.pool)
        .await?;

        Ok(items)
    }

    async fn insert(&self, draft: &CartItemDraft) -> Result<CartItem, RepositoryError> {
        let item = sqlx::query_as::<_, CartItem>(&format!(
            r"
            INSERT INTO shop.cart_item (user_id, product_id, quantity)
            VALUES ($1, $2, $3)
            RETURNING {CART_ITEM_COLUMNS}
            "
        ))
        .bind(draft.user_id)
        .bind(draft.product_id)
        .bind(draft.quantity)
        .fetch_one(self.pool)
        .await?;

        Ok(item)
    }

    async fn update(
        &self,
        id: CartItemId,
        draft: &CartItemDraft,
    ) -> Result<CartItem, RepositoryError> {
        sqlx::query_as::<_, CartItem>(&format!(
            r"
            UPDATE shop.cart_item
            SET product_id = $2, quantity = $3
            WHERE id = $1
            RETURNING {CART_ITEM_COLUMNS}
            "
        ))
        .bind(id)
        .bind(draft.product_id)
        .bind(draft.quantity)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)
    }

    async fn delete(&self, id: CartItemId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM shop.cart_item WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
