//! Rental order types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use rentmyfit_core::{Email, OrderId, OrderStatus, ProductId, UserId};

/// A rental order as stored.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: OrderId,
    pub user_id: UserId,
    pub product_id: ProductId,
    pub size: String,
    pub quantity: i32,
    pub rental_date: NaiveDate,
    pub return_date: NaiveDate,
    #[sqlx(try_from = "String")]
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated fields for a new order.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub user_id: UserId,
    pub product_id: ProductId,
    pub size: String,
    pub quantity: i32,
    pub rental_date: NaiveDate,
    pub return_date: NaiveDate,
    pub status: OrderStatus,
}

/// Partial order update. `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct OrderUpdate {
    pub size: Option<String>,
    pub quantity: Option<i32>,
    pub rental_date: Option<NaiveDate>,
    pub return_date: Option<NaiveDate>,
    pub status: Option<OrderStatus>,
}

/// The customer side of a populated order.
#[derive(Debug, Clone, Serialize)]
pub struct OrderCustomer {
    #[serde(rename = "_id")]
    pub id: UserId,
    pub name: String,
    pub email: Email,
}

/// The product side of a populated order.
#[derive(Debug, Clone, Serialize)]
pub struct OrderProduct {
    #[serde(rename = "_id")]
    pub id: ProductId,
    pub name: String,
    pub image: String,
}

/// An order with its user and product references expanded.
///
/// A reference whose target has since been deleted is rendered as `null`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PopulatedOrder {
    #[serde(rename = "_id")]
    pub id: OrderId,
    pub user_id: Option<OrderCustomer>,
    pub product_id: Option<OrderProduct>,
    pub size: String,
    pub quantity: i32,
    pub rental_date: NaiveDate,
    pub return_date: NaiveDate,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
