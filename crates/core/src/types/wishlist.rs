//! Wishlist of product references.

use serde::{Deserialize, Serialize};

use crate::ProductId;

/// An ordered, duplicate-free list of product references.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Wishlist(Vec<ProductId>);

impl Wishlist {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Build from stored references, dropping any repeats after the first.
    #[must_use]
    pub fn from_ids(ids: impl IntoIterator<Item = ProductId>) -> Self {
        let mut wishlist = Self::new();
        for id in ids {
            wishlist.add(id);
        }
        wishlist
    }

    #[must_use]
    pub fn ids(&self) -> &[ProductId] {
        &self.0
    }

    #[must_use]
    pub fn contains(&self, product: ProductId) -> bool {
        self.0.contains(&product)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Append `product` unless it is already present. Returns whether it was added.
    pub fn add(&mut self, product: ProductId) -> bool {
        if self.contains(product) {
            return false;
        }
        self.0.push(product);
        true
    }

    /// Drop every occurrence of `product`. Returns whether anything was removed.
    pub fn remove(&mut self, product: ProductId) -> bool {
        let before = self.0.len();
        self.0.retain(|id| *id != product);
        self.0.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const P1: ProductId = ProductId::new(1);
    const P2: ProductId = ProductId::new(2);
    const P3: ProductId = ProductId::new(3);

    #[test]
    fn test_add_is_idempotent() {
        let mut wishlist = Wishlist::new();
        assert!(wishlist.add(P1));
        assert!(!wishlist.add(P1));
        assert_eq!(wishlist.ids(), &[P1]);
    }

    #[test]
    fn test_insertion_order_is_kept() {
        let mut wishlist = Wishlist::new();
        wishlist.add(P3);
        wishlist.add(P1);
        wishlist.add(P2);
        wishlist.add(P1);
        assert_eq!(wishlist.ids(), &[P3, P1, P2]);
    }

    #[test]
    fn test_remove_one_keeps_others() {
        let mut wishlist = Wishlist::from_ids([P1, P2]);
        assert!(wishlist.remove(P1));
        assert!(!wishlist.contains(P1));
        assert!(wishlist.contains(P2));
    }

    #[test]
    fn test_remove_miss_is_noop() {
        let mut wishlist = Wishlist::from_ids([P1]);
        assert!(!wishlist.remove(P2));
        assert_eq!(wishlist.ids(), &[P1]);

        let mut empty = Wishlist::new();
        assert!(!empty.remove(P1));
        assert!(empty.is_empty());
    }

    #[test]
    fn test_from_ids_drops_duplicates() {
        let wishlist = Wishlist::from_ids([P2, P1, P2, P1]);
        assert_eq!(wishlist.ids(), &[P2, P1]);
    }
}
