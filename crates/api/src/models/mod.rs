//! Domain models for the API.
//!
//! These are validated domain objects, separate from database row types.
//! Stored documents serialise their id as `_id`; field names are camelCase.

pub mod order;
pub mod product;
pub mod user;

pub use order::{NewOrder, Order, OrderUpdate, PopulatedOrder};
pub use product::{NewProduct, Product, ProductUpdate};
pub use user::{AccountSummary, LoginProfile, ProfileUpdate, User};
