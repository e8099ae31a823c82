//! Product bookmarks.

use chrono::{DateTime, Utc};
use validator::Validate;

use emporium_core::{FavoriteId, ProductId, UserId};

use super::Owned;

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Favorite {
    pub id: FavoriteId,
    pub user_id: UserId,
    pub product_id: ProductId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A favorite has no free-form fields, so the draft always validates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Validate)]
pub struct FavoriteDraft {
    pub user_id: UserId,
    pub product_id: ProductId,
}

impl Owned for Favorite {
    type Id = FavoriteId;
    type Product = ProductId;
    type Input = ();
    type Draft = FavoriteDraft;

    const LABEL: &'static str = "Favorite";
    const NOUN: &'static str = "favorite";

    fn id(&self) -> FavoriteId {
        self.id
    }

    fn owner(&self) -> UserId {
        self.user_id
    }

    fn product_id(product: ProductId) -> Option<ProductId> {
        Some(product)
    }

    fn draft(owner: UserId, product: ProductId, _input: ()) -> FavoriteDraft {
        FavoriteDraft {
            user_id: owner,
            product_id: product,
        }
    }

    fn revise(&self, product: ProductId, _input: ()) -> FavoriteDraft {
        Self::draft(self.user_id, product, ())
    }
}
