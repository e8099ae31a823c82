//! In-memory store used by unit tests.
//!
//! Implements the same store traits as the `sqlx` repositories and counts
//! writes, so tests can assert that a rejected mutation touched nothing.

use std::sync::Mutex;

use chrono::Utc;
use rust_decimal::Decimal;

use emporium_core::{AddressId, CartItemId, Email, FavoriteId, ProductId, UserId};

use super::{OwnedStore, ProductLookup, RepositoryError, UserLookup};
use crate::models::{
    Address, AddressDraft, CartItem, CartItemDraft, Favorite, FavoriteDraft, Owned, Product,
    User,
};

#[derive(Default)]
pub struct Tables {
    users: Vec<User>,
    products: Vec<Product>,
    addresses: Vec<Address>,
    cart_items: Vec<CartItem>,
    favorites: Vec<Favorite>,
    next_id: i32,
    writes: usize,
}

impl Tables {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

#[allow(clippy::unwrap_used)]
impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a verified user with the given id.
    pub fn with_user(self, id: i32) -> Self {
        let now = Utc::now();
        self.tables.lock().unwrap().users.push(User {
            id: UserId::new(id),
            email: Email::parse(&format!("user{id}@example.com")).unwrap(),
            username: format!("user{id}"),
            verified: true,
            created_at: now,
            updated_at: now,
        });
        self
    }

    pub fn with_product(self, id: i32) -> Self {
        self.tables.lock().unwrap().products.push(Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            description: None,
            price: Decimal::new(999, 2),
            currency_code: "USD".to_string(),
            created_at: Utc::now(),
        });
        self
    }

    /// Seeds a record directly, bypassing the write counter.
    pub fn with<R: MemoryRecord>(self, record: R) -> Self {
        {
            let mut tables = self.tables.lock().unwrap();
            let id = record.raw_id();
            tables.next_id = tables.next_id.max(id);
            R::table(&mut tables).push(record);
        }
        self
    }

    /// Number of inserts, updates and deletes performed through the traits.
    pub fn writes(&self) -> usize {
        self.tables.lock().unwrap().writes
    }

    pub fn all<R: MemoryRecord>(&self) -> Vec<R> {
        R::table(&mut self.tables.lock().unwrap()).clone()
    }
}

/// Glue between an owned record type and its in-memory table.
pub trait MemoryRecord: Owned + Clone + Send {
    fn table(tables: &mut Tables) -> &mut Vec<Self>;

    fn raw_id(&self) -> i32;

    fn build(id: i32, draft: &Self::Draft) -> Self;

    fn apply(&mut self, draft: &Self::Draft);
}

impl MemoryRecord for Address {
    fn table(tables: &mut Tables) -> &mut Vec<Self> {
        &mut tables.addresses
    }

    fn raw_id(&self) -> i32 {
        self.id.as_i32()
    }

    fn build(id: i32, draft: &AddressDraft) -> Self {
        let now = Utc::now();
        let mut address = Self {
            id: AddressId::new(id),
            user_id: draft.user_id,
            address_line1: String::new(),
            address_line2: None,
            city: String::new(),
            state: String::new(),
            postal_code: String::new(),
            country: String::new(),
            created_at: now,
            updated_at: now,
        };
        address.apply(draft);
        address
    }

    fn apply(&mut self, draft: &AddressDraft) {
        self.address_line1.clone_from(&draft.address_line1);
        self.address_line2.clone_from(&draft.address_line2);
        self.city.clone_from(&draft.city);
        self.state.clone_from(&draft.state);
        self.postal_code.clone_from(&draft.postal_code);
        self.country.clone_from(&draft.country);
        self.updated_at = Utc::now();
    }
}

impl MemoryRecord for CartItem {
    fn table(tables: &mut Tables) -> &mut Vec<Self> {
        &mut tables.cart_items
    }

    fn raw_id(&self) -> i32 {
        self.id.as_i32()
    }

    fn build(id: i32, draft: &CartItemDraft) -> Self {
        let now = Utc::now();
        Self {
            id: CartItemId::new(id),
            user_id: draft.user_id,
            product_id: draft.product_id,
            quantity: draft.quantity,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, draft: &CartItemDraft) {
        self.product_id = draft.product_id;
        self.quantity = draft.quantity;
        self.updated_at = Utc::now();
    }
}

impl MemoryRecord for Favorite {
    fn table(tables: &mut Tables) -> &mut Vec<Self> {
        &mut tables.favorites
    }

    fn raw_id(&self) -> i32 {
        self.id.as_i32()
    }

    fn build(id: i32, draft: &FavoriteDraft) -> Self {
        let now = Utc::now();
        Self {
            id: FavoriteId::new(id),
            user_id: draft.user_id,
            product_id: draft.product_id,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, draft: &FavoriteDraft) {
        self.product_id = draft.product_id;
        self.updated_at = Utc::now();
    }
}

#[allow(clippy::unwrap_used)]
impl UserLookup for MemoryStore {
    async fn find_user(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_user_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.users.iter().find(|u| &u.email == email).cloned())
    }
}

#[allow(clippy::unwrap_used)]
impl ProductLookup for MemoryStore {
    async fn find_product(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.products.iter().find(|p| p.id == id).cloned())
    }
}

#[allow(clippy::unwrap_used)]
impl<R: MemoryRecord> OwnedStore<R> for MemoryStore {
    async fn get(&self, id: R::Id) -> Result<Option<R>, RepositoryError> {
        let mut tables = self.tables.lock().unwrap();
        Ok(R::table(&mut tables).iter().find(|r| r.id() == id).cloned())
    }

    async fn list(&self) -> Result<Vec<R>, RepositoryError> {
        let mut tables = self.tables.lock().unwrap();
        let mut records = R::table(&mut tables).clone();
        records.sort_by_key(R::raw_id);
        Ok(records)
    }

    async fn list_by_owner(&self, owner: UserId) -> Result<Vec<R>, RepositoryError> {
        let records: Vec<R> = OwnedStore::<R>::list(self).await?;
        Ok(records.into_iter().filter(|r| r.owner() == owner).collect())
    }

    async fn insert(&self, draft: &R::Draft) -> Result<R, RepositoryError> {
        let mut tables = self.tables.lock().unwrap();
        let id = tables.next_id();
        let record = R::build(id, draft);
        R::table(&mut tables).push(record.clone());
        tables.writes += 1;
        Ok(record)
    }

    async fn update(&self, id: R::Id, draft: &R::Draft) -> Result<R, RepositoryError> {
        let mut tables = self.tables.lock().unwrap();
        let record = R::table(&mut tables)
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or(RepositoryError::NotFound)?;
        record.apply(draft);
        let updated = record.clone();
        tables.writes += 1;
        Ok(updated)
    }

    async fn delete(&self, id: R::Id) -> Result<bool, RepositoryError> {
        let mut tables = self.tables.lock().unwrap();
        let table = R::table(&mut tables);
        let before = table.len();
        table.retain(|r| r.id() != id);
        let deleted = table.len() < before;
        if deleted {
            tables.writes += 1;
        }
        Ok(deleted)
    }
}
