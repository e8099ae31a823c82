//! Emporium API library.
//!
//! GraphQL over users, addresses, cart items and favorites, with
//! ownership-checked mutations and password accounts. The binary in
//! `main.rs` wires this library to a listener; the CLI reuses the schema
//! and repositories.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod graphql;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
