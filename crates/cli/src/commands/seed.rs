//! Seed catalog products from a YAML file.
//!
//! ```yaml
//! products:
//!   - name: Trail Mix
//!     description: Salted nuts and dried fruit
//!     price: "4.50"
//!     currency: USD
//!   - name: Water Bottle
//!     price: "12.00"
//! ```
//!
//! `currency` defaults to USD. The whole file is validated before the
//! database is touched.

use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{error, info};

use emporium_api::db::ProductRepository;
use emporium_core::CurrencyCode;

use super::{CliError, connect};

#[derive(Debug, Deserialize)]
pub struct ProductSeedFile {
    pub products: Vec<ProductSeed>,
}

#[derive(Debug, Deserialize)]
pub struct ProductSeed {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    CurrencyCode::USD.code().to_string()
}

/// Problems with the seed entries, one message per problem.
pub fn validate(file: &ProductSeedFile) -> Vec<String> {
    let mut problems = Vec::new();

    for (index, product) in file.products.iter().enumerate() {
        let entry = index + 1;
        if product.name.trim().is_empty() {
            problems.push(format!("entry {entry}: name is blank"));
        }
        if product.price.is_sign_negative() {
            problems.push(format!("entry {entry}: price {} is negative", product.price));
        }
        if let Err(e) = product.currency.parse::<CurrencyCode>() {
            problems.push(format!("entry {entry}: {e}"));
        }
    }

    problems
}

/// Insert every product in `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, any entry is
/// invalid, or an insert fails.
pub async fn products(path: &Path, dry_run: bool) -> Result<(), CliError> {
    info!(path = %path.display(), "Loading products");

    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CliError::Io {
            path: path.display().to_string(),
            source,
        })?;
    let file: ProductSeedFile = serde_yaml::from_str(&content)?;

    let problems = validate(&file);
    if !problems.is_empty() {
        error!("Product file validation failed:");
        for problem in &problems {
            error!("  - {problem}");
        }
        return Err(CliError::InvalidSeed(problems.len()));
    }

    info!(count = file.products.len(), "Product file validated");
    if dry_run {
        return Ok(());
    }

    let pool = connect().await?;
    let repo = ProductRepository::new(&pool);

    for product in &file.products {
        // Validated above.
        let currency = product
            .currency
            .parse::<CurrencyCode>()
            .unwrap_or(CurrencyCode::USD);

        let created = repo
            .create(
                product.name.trim(),
                product.description.as_deref(),
                product.price,
                currency.code(),
            )
            .await?;
        info!(product_id = %created.id, name = %created.name, "Product inserted");
    }

    info!("Seeding complete!");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_defaults() {
        let file: ProductSeedFile = serde_yaml::from_str(
            r#"
products:
  - name: Trail Mix
    price: "4.50"
  - name: Espresso Beans
    description: Dark roast
    price: "18.00"
    currency: eur
"#,
        )
        .unwrap();

        assert_eq!(file.products.len(), 2);
        assert_eq!(file.products[0].currency, "USD");
        assert_eq!(file.products[0].price, Decimal::new(450, 2));
        assert_eq!(file.products[0].description, None);
        assert_eq!(file.products[1].description.as_deref(), Some("Dark roast"));
        assert!(validate(&file).is_empty());
    }

    #[test]
    fn test_validate_reports_each_problem() {
        let file = ProductSeedFile {
            products: vec![
                ProductSeed {
                    name: "  ".to_string(),
                    description: None,
                    price: Decimal::new(-1, 0),
                    currency: "XYZ".to_string(),
                },
                ProductSeed {
                    name: "Mug".to_string(),
                    description: None,
                    price: Decimal::new(900, 2),
                    currency: "GBP".to_string(),
                },
            ],
        };

        let problems = validate(&file);
        assert_eq!(problems.len(), 3);
        assert!(problems.iter().all(|p| p.starts_with("entry 1:")));
    }
}
