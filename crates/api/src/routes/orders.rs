//! Order routes.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;

use rentmyfit_core::{OrderId, OrderStatus, ProductId, UserId};

use crate::db::OrderRepository;
use crate::db::orders::RETURN_BEFORE_RENTAL;
use crate::error::{AppError, Result};
use crate::extract::ApiJson;
use crate::models::order::{NewOrder, Order, OrderUpdate, PopulatedOrder};
use crate::routes::{MessageResponse, path_id, reference};
use crate::state::AppState;

const INVALID_ID: &str = "Invalid order ID";
const NOT_FOUND: &str = "Order not found";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub user_id: Option<Value>,
    pub product_id: Option<Value>,
    pub size: Option<String>,
    pub quantity: Option<i64>,
    pub rental_date: Option<NaiveDate>,
    pub return_date: Option<NaiveDate>,
    pub status: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderRequest {
    pub size: Option<String>,
    pub quantity: Option<i64>,
    pub rental_date: Option<NaiveDate>,
    pub return_date: Option<NaiveDate>,
    pub status: Option<String>,
}

fn order_quantity(quantity: i64) -> Result<i32> {
    i32::try_from(quantity)
        .ok()
        .filter(|q| *q > 0)
        .ok_or_else(|| AppError::BadRequest("Quantity must be a positive integer".to_owned()))
}

fn order_status(status: &str) -> Result<OrderStatus> {
    OrderStatus::parse(status).map_err(|_| AppError::BadRequest("Status cannot be empty".to_owned()))
}

fn check_dates(rental: NaiveDate, return_date: NaiveDate) -> Result<()> {
    if return_date < rental {
        return Err(AppError::BadRequest(RETURN_BEFORE_RENTAL.to_owned()));
    }
    Ok(())
}

impl CreateOrderRequest {
    fn into_new(self) -> Result<NewOrder> {
        let user_id: Option<UserId> = reference(self.user_id.as_ref(), "Invalid user ID")?;
        let product_id: Option<ProductId> =
            reference(self.product_id.as_ref(), "Invalid product ID")?;
        let size = self
            .size
            .map(|s| s.trim().to_owned())
            .filter(|s| !s.is_empty());

        let (
            Some(user_id),
            Some(product_id),
            Some(size),
            Some(quantity),
            Some(rental_date),
            Some(return_date),
        ) = (
            user_id,
            product_id,
            size,
            self.quantity,
            self.rental_date,
            self.return_date,
        )
        else {
            return Err(AppError::BadRequest(
                "userId, productId, size, quantity, rentalDate and returnDate are required"
                    .to_owned(),
            ));
        };
        check_dates(rental_date, return_date)?;

        Ok(NewOrder {
            user_id,
            product_id,
            size,
            quantity: order_quantity(quantity)?,
            rental_date,
            return_date,
            status: self
                .status
                .as_deref()
                .map(order_status)
                .transpose()?
                .unwrap_or_default(),
        })
    }
}

impl UpdateOrderRequest {
    /// Dates sent together are checked here; a single date is checked
    /// against the stored row when the update is written.
    fn into_update(self) -> Result<OrderUpdate> {
        if let (Some(rental), Some(return_date)) = (self.rental_date, self.return_date) {
            check_dates(rental, return_date)?;
        }

        Ok(OrderUpdate {
            size: self
                .size
                .map(|s| s.trim().to_owned())
                .filter(|s| !s.is_empty()),
            quantity: self.quantity.map(order_quantity).transpose()?,
            rental_date: self.rental_date,
            return_date: self.return_date,
            status: self.status.as_deref().map(order_status).transpose()?,
        })
    }
}

/// GET /api/orders
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<PopulatedOrder>>> {
    let orders = OrderRepository::new(state.pool()).list_populated().await?;
    Ok(Json(orders))
}

/// GET /api/orders/{id}
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PopulatedOrder>> {
    let id: OrderId = path_id(&id, INVALID_ID)?;

    OrderRepository::new(state.pool())
        .get_populated(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_owned()))
}

/// POST /api/orders
pub async fn create(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateOrderRequest>,
) -> Result<(StatusCode, Json<Order>)> {
    let order = OrderRepository::new(state.pool())
        .create(&request.into_new()?)
        .await?;

    tracing::info!(order_id = %order.id, user_id = %order.user_id, "Order created");
    Ok((StatusCode::CREATED, Json(order)))
}

/// PUT /api/orders/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<UpdateOrderRequest>,
) -> Result<Json<Order>> {
    let id: OrderId = path_id(&id, INVALID_ID)?;

    OrderRepository::new(state.pool())
        .update(id, &request.into_update()?)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_owned()))
}

/// DELETE /api/orders/{id}
///
/// Deleting an order that does not exist still succeeds.
pub async fn destroy(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    let id: OrderId = path_id(&id, INVALID_ID)?;
    OrderRepository::new(state.pool()).delete(id).await?;

    Ok(Json(MessageResponse {
        message: "Order deleted",
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create_request(value: Value) -> CreateOrderRequest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_new_order_defaults_to_pending() {
        let order = create_request(json!({
            "userId": "3",
            "productId": 8,
            "size": "M",
            "quantity": 1,
            "rentalDate": "2025-08-01",
            "returnDate": "2025-08-04"
        }))
        .into_new()
        .unwrap();

        assert_eq!(order.user_id, UserId::new(3));
        assert_eq!(order.product_id, ProductId::new(8));
        assert_eq!(order.status.as_str(), "Pending");
    }

    #[test]
    fn test_new_order_missing_fields() {
        let missing = create_request(json!({"userId": 3, "productId": 8, "size": "M"}));
        assert!(matches!(missing.into_new(), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_new_order_date_order() {
        let backwards = create_request(json!({
            "userId": 3,
            "productId": 8,
            "size": "M",
            "quantity": 1,
            "rentalDate": "2025-08-04",
            "returnDate": "2025-08-01"
        }));
        assert!(matches!(
            backwards.into_new(),
            Err(AppError::BadRequest(msg)) if msg == "Return date cannot be before rental date"
        ));
    }

    #[test]
    fn test_update_status_is_free_form_but_not_blank() {
        let update = UpdateOrderRequest {
            status: Some("Shipped".to_owned()),
            ..UpdateOrderRequest::default()
        }
        .into_update()
        .unwrap();
        assert_eq!(update.status.unwrap().as_str(), "Shipped");

        let blank = UpdateOrderRequest {
            status: Some("   ".to_owned()),
            ..UpdateOrderRequest::default()
        };
        assert!(blank.into_update().is_err());
    }

    #[test]
    fn test_update_rejects_zero_quantity() {
        let zero = UpdateOrderRequest {
            quantity: Some(0),
            ..UpdateOrderRequest::default()
        };
        assert!(zero.into_update().is_err());
    }
}
