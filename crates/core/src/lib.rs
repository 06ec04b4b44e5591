//! RentMyFit Core - Shared domain types.
//!
//! This crate provides the types used by every RentMyFit component:
//! - `api` - The REST service (accounts, cart, wishlist, catalog, orders)
//! - `cli` - Operator tools for migrations and catalog seeding
//!
//! # Architecture
//!
//! The core crate contains only types and pure domain logic - no I/O, no
//! database access, no HTTP. The cart and wishlist rules live here so the
//! service layer can apply them inside a single locked transaction and so
//! they can be tested without a database.
//!
//! # Modules
//!
//! - [`types`] - Typed IDs, emails, roles, cart and wishlist collections, order status

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
