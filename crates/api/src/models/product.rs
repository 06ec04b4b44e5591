//! Catalog product types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use rentmyfit_core::ProductId;

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub sizes: Vec<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub image: String,
    pub availability: bool,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated fields for a new product.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub category: String,
    pub sizes: Vec<String>,
    pub price: Decimal,
    pub image: String,
    pub availability: bool,
    pub description: String,
}

/// Partial product update. `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub category: Option<String>,
    pub sizes: Option<Vec<String>>,
    pub price: Option<Decimal>,
    pub image: Option<String>,
    pub availability: Option<bool>,
    pub description: Option<String>,
}
