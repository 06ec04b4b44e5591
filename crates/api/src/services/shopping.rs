//! Cart and wishlist manager.
//!
//! Every mutation runs as a locked read-modify-write on the owner's row, with
//! the merge rules themselves living in [`rentmyfit_core::Cart`] and
//! [`rentmyfit_core::Wishlist`]. Product references are not checked on the
//! way in; reads resolve them and cope with products that have since gone.

use std::collections::HashMap;

use serde::Serialize;
use sqlx::PgPool;
use thiserror::Error;

use rentmyfit_core::{Cart, CartError, ProductId, UserId, Wishlist};

use crate::db::products::ProductRepository;
use crate::db::users::UserRepository;
use crate::db::RepositoryError;
use crate::models::product::Product;

/// Errors from cart and wishlist operations.
#[derive(Debug, Error)]
pub enum ShoppingError {
    /// The owning account no longer exists.
    #[error("user not found")]
    UserNotFound,

    /// A cart line failed validation.
    #[error("invalid cart line: {0}")]
    InvalidLine(#[from] CartError),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// A cart line with its product resolved.
///
/// `product` is `None` when the referenced product has been deleted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartEntry {
    pub product: Option<Product>,
    pub quantity: u32,
    pub selected_size: String,
}

/// Cart and wishlist service for one request.
pub struct ShoppingService<'a> {
    users: UserRepository<'a>,
    products: ProductRepository<'a>,
}

impl<'a> ShoppingService<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            users: UserRepository::new(pool),
            products: ProductRepository::new(pool),
        }
    }

    // =========================================================================
    // Wishlist
    // =========================================================================

    /// Add a product to the wishlist. Adding a product already present is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `ShoppingError::UserNotFound` if the account is gone.
    pub async fn add_to_wishlist(
        &self,
        user: UserId,
        product: ProductId,
    ) -> Result<Wishlist, ShoppingError> {
        self.users
            .update_wishlist(user, |wishlist| wishlist.add(product))
            .await?
            .ok_or(ShoppingError::UserNotFound)
    }

    /// Remove a product from the wishlist. Removing an absent product is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `ShoppingError::UserNotFound` if the account is gone.
    pub async fn remove_from_wishlist(
        &self,
        user: UserId,
        product: ProductId,
    ) -> Result<Wishlist, ShoppingError> {
        self.users
            .update_wishlist(user, |wishlist| wishlist.remove(product))
            .await?
            .ok_or(ShoppingError::UserNotFound)
    }

    /// The wishlist as stored, without resolving products.
    ///
    /// # Errors
    ///
    /// Returns `ShoppingError::UserNotFound` if the account is gone.
    pub async fn stored_wishlist(&self, user: UserId) -> Result<Wishlist, ShoppingError> {
        self.users
            .get_by_id(user)
            .await?
            .map(|user| user.wishlist)
            .ok_or(ShoppingError::UserNotFound)
    }

    /// The wishlist's products in wishlist order, skipping deleted products.
    ///
    /// # Errors
    ///
    /// Returns `ShoppingError::UserNotFound` if the account is gone.
    pub async fn wishlist(&self, user: UserId) -> Result<Vec<Product>, ShoppingError> {
        let user = self
            .users
            .get_by_id(user)
            .await?
            .ok_or(ShoppingError::UserNotFound)?;

        let mut found = self.resolve(user.wishlist.ids()).await?;
        Ok(user
            .wishlist
            .ids()
            .iter()
            .filter_map(|id| found.remove(id))
            .collect())
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Add `quantity` of `product` in `size`, merging with an existing line.
    ///
    /// # Errors
    ///
    /// Returns `ShoppingError::InvalidLine` for a blank size or zero quantity.
    /// Returns `ShoppingError::UserNotFound` if the account is gone.
    pub async fn add_to_cart(
        &self,
        user: UserId,
        product: ProductId,
        size: &str,
        quantity: u32,
    ) -> Result<Cart, ShoppingError> {
        self.users
            .update_cart(user, |cart| {
                cart.add(product, size, quantity)?;
                Ok::<_, ShoppingError>(true)
            })
            .await?
            .ok_or(ShoppingError::UserNotFound)
    }

    /// Remove the line for `(product, size)`; a missing line is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `ShoppingError::UserNotFound` if the account is gone.
    pub async fn remove_from_cart(
        &self,
        user: UserId,
        product: ProductId,
        size: &str,
    ) -> Result<Cart, ShoppingError> {
        self.users
            .update_cart(user, |cart| Ok::<_, ShoppingError>(cart.remove(product, size)))
            .await?
            .ok_or(ShoppingError::UserNotFound)
    }

    /// Set the quantity of an existing line; a missing line is left absent.
    ///
    /// # Errors
    ///
    /// Returns `ShoppingError::InvalidLine` for a zero quantity.
    /// Returns `ShoppingError::UserNotFound` if the account is gone.
    pub async fn update_cart_quantity(
        &self,
        user: UserId,
        product: ProductId,
        size: &str,
        quantity: u32,
    ) -> Result<Cart, ShoppingError> {
        self.users
            .update_cart(user, |cart| {
                Ok::<_, ShoppingError>(cart.set_quantity(product, size, quantity)?)
            })
            .await?
            .ok_or(ShoppingError::UserNotFound)
    }

    /// Replace the whole cart.
    ///
    /// # Errors
    ///
    /// Returns `ShoppingError::UserNotFound` if the account is gone.
    pub async fn overwrite_cart(&self, user: UserId, cart: Cart) -> Result<Cart, ShoppingError> {
        self.users
            .replace_cart(user, &cart)
            .await?
            .ok_or(ShoppingError::UserNotFound)
    }

    /// The cart as stored, without resolving products.
    ///
    /// # Errors
    ///
    /// Returns `ShoppingError::UserNotFound` if the account is gone.
    pub async fn stored_cart(&self, user: UserId) -> Result<Cart, ShoppingError> {
        self.users
            .get_by_id(user)
            .await?
            .map(|user| user.cart)
            .ok_or(ShoppingError::UserNotFound)
    }

    /// The cart with each line's product resolved.
    ///
    /// # Errors
    ///
    /// Returns `ShoppingError::UserNotFound` if the account is gone.
    pub async fn cart(&self, user: UserId) -> Result<Vec<CartEntry>, ShoppingError> {
        let user = self
            .users
            .get_by_id(user)
            .await?
            .ok_or(ShoppingError::UserNotFound)?;

        let ids: Vec<ProductId> = user.cart.lines().iter().map(|line| line.product).collect();
        let found = self.resolve(&ids).await?;

        Ok(user
            .cart
            .into_lines()
            .into_iter()
            .map(|line| CartEntry {
                product: found.get(&line.product).cloned(),
                quantity: line.quantity,
                selected_size: line.selected_size,
            })
            .collect())
    }

    async fn resolve(&self, ids: &[ProductId]) -> Result<HashMap<ProductId, Product>, ShoppingError> {
        Ok(self
            .products
            .get_many(ids)
            .await?
            .into_iter()
            .map(|product| (product.id, product))
            .collect())
    }
}
