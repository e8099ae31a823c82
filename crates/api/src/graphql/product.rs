//! Catalog product type, reachable from cart items and favorites.

use async_graphql::{ID, Object};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::models::Product;

/// A catalog product referenced by cart items and favorites.
pub struct ProductObject(pub Product);

#[Object(name = "Product")]
impl ProductObject {
    async fn id(&self) -> ID {
        ID::from(self.0.id.to_string())
    }

    async fn name(&self) -> &str {
        &self.0.name
    }

    async fn description(&self) -> Option<&str> {
        self.0.description.as_deref()
    }

    async fn price(&self) -> Decimal {
        self.0.price
    }

    async fn currency_code(&self) -> &str {
        &self.0.currency_code
    }

    /// Price formatted with its currency symbol, e.g. `$19.99`.
    async fn display_price(&self) -> String {
        self.0.price().to_string()
    }

    async fn created_at(&self) -> DateTime<Utc> {
        self.0.created_at
    }
}
