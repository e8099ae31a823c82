//! Catalog products.
//!
//! Products are referenced by cart items and favorites but never written by
//! the API; `emporium seed products` loads them for development.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use emporium_core::{CurrencyCode, Price, ProductId};

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub currency_code: String,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Price with its currency, falling back to USD for unknown codes.
    #[must_use]
    pub fn price(&self) -> Price {
        let currency = self.currency_code.parse().unwrap_or(CurrencyCode::USD);
        Price::new(self.price, currency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(currency_code: &str) -> Product {
        Product {
            id: ProductId::new(1),
            name: "Trail Mix".to_string(),
            description: None,
            price: Decimal::new(450, 2),
            currency_code: currency_code.to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_price_uses_stored_currency() {
        assert_eq!(product("EUR").price().to_string(), "€4.50");
    }

    #[test]
    fn test_price_unknown_currency_defaults() {
        assert_eq!(product("???").price().currency_code, CurrencyCode::USD);
    }
}
