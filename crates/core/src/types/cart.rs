//! Cart line items and the rules for mutating them.
//!
//! A cart holds at most one line per `(product, selected_size)` pair. Adding an
//! existing pair bumps its quantity; removing or re-quantifying a pair that is
//! not in the cart leaves the cart untouched.

use serde::{Deserialize, Serialize};

use crate::ProductId;

/// Errors raised by cart mutations.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartError {
    /// The selected size was empty or whitespace.
    #[error("selected size is required")]
    EmptySize,
    /// Quantities must be at least 1.
    #[error("quantity must be a positive integer")]
    ZeroQuantity,
}

/// One `(product, size, quantity)` entry in a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product: ProductId,
    pub quantity: u32,
    pub selected_size: String,
}

impl CartLine {
    fn matches(&self, product: ProductId, size: &str) -> bool {
        self.product == product && self.selected_size == size
    }
}

/// A user's cart, stored inline on the user record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart(Vec<CartLine>);

impl Cart {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Build a cart from client-supplied lines, replacing whatever was there.
    ///
    /// Lines sharing a `(product, selected_size)` key are merged by summing
    /// their quantities, in first-seen order.
    ///
    /// # Errors
    ///
    /// Returns `CartError` if any line has an empty size or a zero quantity.
    pub fn from_lines(lines: impl IntoIterator<Item = CartLine>) -> Result<Self, CartError> {
        let mut cart = Self::new();
        for line in lines {
            cart.add(line.product, &line.selected_size, line.quantity)?;
        }
        Ok(cart)
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.0
    }

    #[must_use]
    pub fn into_lines(self) -> Vec<CartLine> {
        self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Look up the line for a `(product, size)` key.
    #[must_use]
    pub fn find(&self, product: ProductId, size: &str) -> Option<&CartLine> {
        self.0.iter().find(|line| line.matches(product, size))
    }

    /// Add `quantity` units of `product` in `size`.
    ///
    /// # Errors
    ///
    /// Returns `CartError::EmptySize` or `CartError::ZeroQuantity` on invalid input;
    /// the cart is unchanged in that case.
    pub fn add(&mut self, product: ProductId, size: &str, quantity: u32) -> Result<(), CartError> {
        let size = size.trim();
        if size.is_empty() {
            return Err(CartError::EmptySize);
        }
        if quantity == 0 {
            return Err(CartError::ZeroQuantity);
        }

        match self.0.iter_mut().find(|line| line.matches(product, size)) {
            Some(line) => line.quantity = line.quantity.saturating_add(quantity),
            None => self.0.push(CartLine {
                product,
                quantity,
                selected_size: size.to_owned(),
            }),
        }
        Ok(())
    }

    /// Remove the line for `(product, size)`. Returns whether a line was removed.
    pub fn remove(&mut self, product: ProductId, size: &str) -> bool {
        let size = size.trim();
        let before = self.0.len();
        self.0.retain(|line| !line.matches(product, size));
        self.0.len() != before
    }

    /// Overwrite the quantity of an existing line.
    ///
    /// This is not an upsert: a missing key leaves the cart as it was and
    /// returns `Ok(false)`.
    ///
    /// # Errors
    ///
    /// Returns `CartError::ZeroQuantity` if `quantity` is 0.
    pub fn set_quantity(
        &mut self,
        product: ProductId,
        size: &str,
        quantity: u32,
    ) -> Result<bool, CartError> {
        if quantity == 0 {
            return Err(CartError::ZeroQuantity);
        }
        let size = size.trim();
        Ok(self
            .0
            .iter_mut()
            .find(|line| line.matches(product, size))
            .map(|line| line.quantity = quantity)
            .is_some())
    }
}
