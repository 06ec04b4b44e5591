//! Core types for RentMyFit.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod email;
pub mod id;
pub mod role;
pub mod status;
pub mod wishlist;

pub use cart::{Cart, CartError, CartLine};
pub use email::{Email, EmailError};
pub use id::*;
pub use role::{BOOTSTRAP_ADMIN_EMAIL, Role, RoleError};
pub use status::{OrderStatus, OrderStatusError};
pub use wishlist::Wishlist;
