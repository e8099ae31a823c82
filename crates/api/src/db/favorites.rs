//! Favorite repository.

use sqlx::PgPool;

use emporium_core::{FavoriteId, UserId};

use super::{OwnedStore, RepositoryError};
use crate::models::{Favorite, FavoriteDraft};

const FAVORITE_COLUMNS: &str = "id, user_id, product_id, created_at, updated_at";

/// Repository for `shop.favorite`.
pub struct FavoriteRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> FavoriteRepository<'a> {
    /// Create a new favorite repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }
}

impl OwnedStore<Favorite> for FavoriteRepository<'_> {
    async fn get(&self, id: FavoriteId) -> Result<Option<Favorite>, RepositoryError> {
        let favorite = sqlx::query_as::<_, Favorite>(&format!(
            "SELECT {FAVORITE_COLUMNS} FROM shop.favorite WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(favorite)
    }

    async fn list(&self) -> Result<Vec<Favorite>, RepositoryError> {
        let favorites = sqlx::query_as::<_, Favorite>(&format!(
            "SELECT {FAVORITE_COLUMNS} FROM shop.favorite ORDER BY id"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(favorites)
    }

    async fn list_by_owner(&self, owner: UserId) -> Result<Vec<Favorite>, RepositoryError> {
        let favorites = sqlx::query_as::<_, Favorite>(&format!(
            "SELECT {FAVORITE_COLUMNS} FROM shop.favorite WHERE user_id = $1 ORDER BY id"
        ))
        .bind(owner)
        .fetch_all(self.pool)
        .await?;

        Ok(favorites)
    }

    async fn insert(&self, draft: &FavoriteDraft) -> Result<Favorite, RepositoryError> {
        let favorite = sqlx::query_as::<_, Favorite>(&format!(
            r"
            INSERT INTO shop.favorite (user_id, product_id)
            VALUES ($1, $2)
            RETURNING {FAVORITE_COLUMNS}
            "
        ))
        .bind(draft.user_id)
        .bind(draft.product_id)
        .fetch_one(self.pool)
        .await?;

        Ok(favorite)
    }

    async fn update(
        &self,
        id: FavoriteId,
        draft: &FavoriteDraft,
    ) -> Result<Favorite, RepositoryError> {
        sqlx::query_as::<_, Favorite>(&format!(
            r"
            UPDATE shop.favorite
            SET product_id = $2
            WHERE id = $1
            RETURNING {FAVORITE_COLUMNS}
            "
        ))
        .bind(id)
        .bind(draft.product_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)
    }

    async fn delete(&self, id: FavoriteId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM shop.favorite WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
