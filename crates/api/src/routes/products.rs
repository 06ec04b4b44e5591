//! Catalog routes.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::Deserialize;

use rentmyfit_core::ProductId;

use crate::db::ProductRepository;
use crate::error::{AppError, Result};
use crate::extract::ApiJson;
use crate::models::product::{NewProduct, Product, ProductUpdate};
use crate::routes::{MessageResponse, path_id};
use crate::state::AppState;

const INVALID_ID: &str = "Invalid product ID";
const NOT_FOUND: &str = "Product not found";

#[derive(Debug, Default, Deserialize)]
pub struct ProductRequest {
    pub name: Option<String>,
    pub category: Option<String>,
    pub sizes: Option<Vec<String>>,
    pub price: Option<Decimal>,
    pub image: Option<String>,
    pub availability: Option<bool>,
    pub description: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_owned()).filter(|v| !v.is_empty())
}

fn check_price(price: Option<Decimal>) -> Result<Option<Decimal>> {
    match price {
        Some(price) if price.is_sign_negative() => {
            Err(AppError::BadRequest("Price cannot be negative".to_owned()))
        }
        other => Ok(other),
    }
}

impl ProductRequest {
    fn into_new(self) -> Result<NewProduct> {
        let price = check_price(self.price)?;
        let (Some(name), Some(category), Some(price), Some(image)) = (
            non_empty(self.name),
            non_empty(self.category),
            price,
            non_empty(self.image),
        ) else {
            return Err(AppError::BadRequest(
                "Name, category, price and image are required".to_owned(),
            ));
        };

        Ok(NewProduct {
            name,
            category,
            sizes: self.sizes.unwrap_or_default(),
            price,
            image,
            availability: self.availability.unwrap_or(true),
            description: self.description.unwrap_or_default(),
        })
    }

    fn into_update(self) -> Result<ProductUpdate> {
        Ok(ProductUpdate {
            price: check_price(self.price)?,
            name: non_empty(self.name),
            category: non_empty(self.category),
            sizes: self.sizes,
            image: non_empty(self.image),
            availability: self.availability,
            description: self.description,
        })
    }
}

/// GET /api/products
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    let products = ProductRepository::new(state.pool()).list().await?;
    Ok(Json(products))
}

/// GET /api/products/{id}
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>> {
    let id: ProductId = path_id(&id, INVALID_ID)?;

    ProductRepository::new(state.pool())
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_owned()))
}

/// POST /api/products
pub async fn create(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<ProductRequest>,
) -> Result<(StatusCode, Json<Product>)> {
    let product = ProductRepository::new(state.pool())
        .create(&request.into_new()?)
        .await?;

    tracing::info!(product_id = %product.id, "Product created");
    Ok((StatusCode::CREATED, Json(product)))
}

/// PUT /api/products/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<ProductRequest>,
) -> Result<Json<Product>> {
    let id: ProductId = path_id(&id, INVALID_ID)?;

    ProductRepository::new(state.pool())
        .update(id, &request.into_update()?)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_owned()))
}

/// DELETE /api/products/{id}
pub async fn destroy(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    let id: ProductId = path_id(&id, INVALID_ID)?;

    if !ProductRepository::new(state.pool()).delete(id).await? {
        return Err(AppError::NotFound(NOT_FOUND.to_owned()));
    }

    tracing::info!(product_id = %id, "Product deleted");
    Ok(Json(MessageResponse {
        message: "Deleted successfully",
    }))
}
