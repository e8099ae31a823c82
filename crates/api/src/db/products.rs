//! Product repository.

use rust_decimal::Decimal;
use sqlx::PgPool;

use emporium_core::ProductId;

use super::{ProductLookup, RepositoryError};
use crate::models::Product;

const PRODUCT_COLUMNS: &str = "id, name, description, price, currency_code, created_at";

/// Repository for catalog products.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a product by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM shop.product WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(product)
    }

    /// Insert a catalog product. Used by the CLI seeder.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        name: &str,
        description: Option<&str>,
        price: Decimal,
        currency_code: &str,
    ) -> Result<Product, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            r"
            INSERT INTO shop.product (name, description, price, currency_code)
            VALUES ($1, $2, $3, $4)
            RETURNING {PRODUCT_COLUMNS}
            "
        ))
        .bind(name)
        .bind(description)
        .bind(price)
        .bind(currency_code)
        .fetch_one(self.pool)
        .await?;

        Ok(product)
    }
}

impl ProductLookup for ProductRepository<'_> {
    async fn find_product(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        self.get_by_id(id).await
    }
}
