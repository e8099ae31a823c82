//! Address repository.

use sqlx::PgPool;

use emporium_core::{AddressId, UserId};

use super::{OwnedStore, RepositoryError};
use crate::models::{Address, AddressDraft};

const ADDRESS_COLUMNS: &str = "id, user_id, address_line1, address_line2, city, state, \
                               postal_code, country, created_at, updated_at";

/// Repository for `shop.address`.
pub struct AddressRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AddressRepository<'a> {
    /// Create a new address repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }
}

impl OwnedStore<Address> for AddressRepository<'_> {
    async fn get(&self, id: AddressId) -> Result<Option<Address>, RepositoryError> {
        let address = sqlx::query_as::<_, Address>(&format!(
            "SELECT {ADDRESS_COLUMNS} FROM shop.address WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(address)
    }

    async fn list(&self) -> Result<Vec<Address>, RepositoryError> {
        let addresses = sqlx::query_as::<_, Address>(&format!(
            "SELECT {ADDRESS_COLUMNS} FROM shop.address ORDER BY id"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(addresses)
    }

    async fn list_by_owner(&self, owner: UserId) -> Result<Vec<Address>, RepositoryError> {
        let addresses = sqlx::query_as::<_, Address>(&format!(
            "SELECT {ADDRESS_COLUMNS} FROM shop.address WHERE user_id = $1 ORDER BY id"
        ))
        .bind(owner)
        .fetch_all(self.pool)
        .await?;

        Ok(addresses)
    }

    async fn insert(&self, draft: &AddressDraft) -> Result<Address, RepositoryError> {
        let address = sqlx::query_as::<_, Address>(&format!(
            r"
            INSERT INTO shop.address
                (user_id, address_line1, address_line2, city, state, postal_code, country)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {ADDRESS_COLUMNS}
            "
        ))
        .bind(draft.user_id)
        .bind(&draft.address_line1)
        .bind(draft.address_line2.as_deref())
        .bind(&draft.city)
        .bind(&draft.state)
        .bind(&draft.postal_code)
        .bind(&draft.country)
        .fetch_one(self.pool)
        .await?;

        Ok(address)
    }

    async fn update(
        &self,
        id: AddressId,
        draft: &AddressDraft,
    ) -> Result<Address, RepositoryError> {
        // The owner column is never part of the SET list.
        sqlx::query_as::<_, Address>(&format!(
            r"
            UPDATE shop.address
            SET address_line1 = $2, address_line2 = $3, city = $4,
                state = $5, postal_code = $6, country = $7
            WHERE id = $1
            RETURNING {ADDRESS_COLUMNS}
            "
        ))
        .bind(id)
        .bind(&draft.address_line1)
        .bind(draft.address_line2.as_deref())
        .bind(&draft.city)
        .bind(&draft.state)
        .bind(&draft.postal_code)
        .bind(&draft.country)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)
    }

    async fn delete(&self, id: AddressId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM shop.address WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
