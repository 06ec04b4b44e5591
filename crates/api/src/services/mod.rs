//! Business logic services.

pub mod auth;
pub mod shopping;

pub use auth::{AuthError, AuthService, TokenService};
pub use shopping::{ShoppingError, ShoppingService};
