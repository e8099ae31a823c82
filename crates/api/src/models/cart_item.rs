//! Cart line items.

use chrono::{DateTime, Utc};
use validator::Validate;

use emporium_core::{CartItemId, ProductId, UserId};

use super::Owned;

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct CartItem {
    pub id: CartItemId,
    pub user_id: UserId,
    pub product_id: ProductId,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy)]
pub struct CartItemInput {
    pub quantity: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Validate)]
pub struct CartItemDraft {
    pub user_id: UserId,
    pub product_id: ProductId,
    #[validate(range(min = 1, message = "Quantity must be at least 1."))]
    pub quantity: i32,
}

impl Owned for CartItem {
    type Id = CartItemId;
    type Product = ProductId;
    type Input = CartItemInput;
    type Draft = CartItemDraft;

    const LABEL: &'static str = "Cart item";
    const NOUN: &'static str = "cart item";

    fn id(&self) -> CartItemId {
        self.id
    }

    fn owner(&self) -> UserId {
        self.user_id
    }

    fn product_id(product: ProductId) -> Option<ProductId> {
        Some(product)
    }

    fn draft(owner: UserId, product: ProductId, input: CartItemInput) -> CartItemDraft {
        CartItemDraft {
            user_id: owner,
            product_id: product,
            quantity: input.quantity,
        }
    }

    fn revise(&self, product: ProductId, input: CartItemInput) -> CartItemDraft {
        Self::draft(self.user_id, product, input)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::models::validation_messages;

    #[test]
    fn test_quantity_must_be_positive() {
        let input = CartItemInput { quantity: 0 };
        let draft = CartItem::draft(UserId::new(1), ProductId::new(3), input);

        assert_eq!(
            validation_messages(&draft.validate().unwrap_err()),
            vec!["Quantity must be at least 1.".to_string()]
        );
    }

    #[test]
    fn test_product_is_referenced() {
        let product = ProductId::new(3);
        assert_eq!(CartItem::product_id(product), Some(product));

        let draft = CartItem::draft(UserId::new(1), product, CartItemInput { quantity: 2 });
        assert!(draft.validate().is_ok());
        assert_eq!(draft.product_id, product);
    }
}
