//! Emporium Core - Shared types library.
//!
//! This crate provides common types used across all Emporium components:
//! - `api` - GraphQL API server for users, addresses, carts and favorites
//! - `cli` - Command-line tools for migrations, seeding and schema export
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no database access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, and token kinds

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
