//! Order repository.
//!
//! Listing expands each order's user and product references through left
//! joins, so an order whose user or product was deleted still lists.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;

use rentmyfit_core::{Email, OrderId, OrderStatus, ProductId, UserId};

use super::RepositoryError;
use crate::models::order::{
    NewOrder, Order, OrderCustomer, OrderProduct, OrderUpdate, PopulatedOrder,
};

/// Message for a row that would end before it starts.
pub const RETURN_BEFORE_RENTAL: &str = "Return date cannot be before rental date";

macro_rules! order_columns {
    () => {
        "id, user_id, product_id, size, quantity, rental_date, return_date, status, \
         created_at, updated_at"
    };
}

macro_rules! populated_select {
    () => {
        "SELECT o.id, o.user_id, o.product_id, o.size, o.quantity, \
                o.rental_date, o.return_date, o.status, o.created_at, o.updated_at, \
                u.name AS customer_name, u.email AS customer_email, \
                p.name AS product_name, p.image AS product_image \
         FROM orders o \
         LEFT JOIN users u ON u.id = o.user_id \
         LEFT JOIN products p ON p.id = o.product_id"
    };
}

#[derive(sqlx::FromRow)]
struct PopulatedOrderRow {
    id: OrderId,
    user_id: UserId,
    product_id: ProductId,
    size: String,
    quantity: i32,
    rental_date: NaiveDate,
    return_date: NaiveDate,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    customer_name: Option<String>,
    customer_email: Option<String>,
    product_name: Option<String>,
    product_image: Option<String>,
}

impl TryFrom<PopulatedOrderRow> for PopulatedOrder {
    type Error = RepositoryError;

    fn try_from(row: PopulatedOrderRow) -> Result<Self, Self::Error> {
        let status = OrderStatus::parse(&row.status).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid order status in database: {e}"))
        })?;

        let customer = match (row.customer_name, row.customer_email) {
            (Some(name), Some(email)) => Some(OrderCustomer {
                id: row.user_id,
                name,
                email: Email::parse(&email).map_err(|e| {
                    RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
                })?,
            }),
            _ => None,
        };

        let product = match (row.product_name, row.product_image) {
            (Some(name), Some(image)) => Some(OrderProduct {
                id: row.product_id,
                name,
                image,
            }),
            _ => None,
        };

        Ok(Self {
            id: row.id,
            user_id: customer,
            product_id: product,
            size: row.size,
            quantity: row.quantity,
            rental_date: row.rental_date,
            return_date: row.return_date,
            status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List every order with user and product populated, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored row is invalid.
    pub async fn list_populated(&self) -> Result<Vec<PopulatedOrder>, RepositoryError> {
        let rows = sqlx::query_as::<_, PopulatedOrderRow>(concat!(
            populated_select!(),
            " ORDER BY o.created_at DESC, o.id DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(PopulatedOrder::try_from).collect()
    }

    /// Get one order with user and product populated.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored row is invalid.
    pub async fn get_populated(
        &self,
        id: OrderId,
    ) -> Result<Option<PopulatedOrder>, RepositoryError> {
        sqlx::query_as::<_, PopulatedOrderRow>(concat!(populated_select!(), " WHERE o.id = $1"))
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .map(PopulatedOrder::try_from)
            .transpose()
    }

    /// Insert an order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, order: &NewOrder) -> Result<Order, RepositoryError> {
        let created = sqlx::query_as::<_, Order>(concat!(
            r"
            INSERT INTO orders (user_id, product_id, size, quantity, rental_date, return_date, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING ",
            order_columns!()
        ))
        .bind(order.user_id)
        .bind(order.product_id)
        .bind(&order.size)
        .bind(order.quantity)
        .bind(order.rental_date)
        .bind(order.return_date)
        .bind(order.status.as_str())
        .fetch_one(self.pool)
        .await?;

        Ok(created)
    }

    /// Apply a partial update. Returns `None` if the order does not exist.
    ///
    /// The date pair is checked against the merged row, so a lone
    /// `return_date` earlier than the stored `rental_date` is refused.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Invalid` if the merged dates are out of order.
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn update(
        &self,
        id: OrderId,
        update: &OrderUpdate,
    ) -> Result<Option<Order>, RepositoryError> {
        let updated = sqlx::query_as::<_, Order>(concat!(
            r"
            UPDATE orders SET
                size = COALESCE($2, size),
                quantity = COALESCE($3, quantity),
                rental_date = COALESCE($4, rental_date),
                return_date = COALESCE($5, return_date),
                status = COALESCE($6, status),
                updated_at = NOW()
            WHERE id = $1
            RETURNING ",
            order_columns!()
        ))
        .bind(id)
        .bind(update.size.as_deref())
        .bind(update.quantity)
        .bind(update.rental_date)
        .bind(update.return_date)
        .bind(update.status.as_ref().map(OrderStatus::as_str))
        .fetch_optional(self.pool)
        .await
        .map_err(|e| RepositoryError::from_check(e, RETURN_BEFORE_RENTAL))?;

        Ok(updated)
    }

    /// Delete an order. Returns whether a row was removed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: OrderId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
