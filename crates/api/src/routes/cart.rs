//! Cart routes.
//!
//! Lines are keyed by `(product, selectedSize)`. Adding merges into an
//! existing line; removing or updating a line that is not there succeeds
//! and leaves the cart unchanged.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use rentmyfit_core::{Cart, CartLine, ProductId};

use crate::error::{AppError, Result};
use crate::extract::ApiJson;
use crate::middleware::RequireAuth;
use crate::routes::{Lookup, lookup, reference};
use crate::services::ShoppingService;
use crate::services::shopping::CartEntry;
use crate::state::AppState;

const INVALID_PRODUCT: &str = "Invalid product ID";
const INVALID_QUANTITY: &str = "Quantity must be a positive integer";

/// A cart line as submitted. `quantity` is ignored by remove.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineRequest {
    pub product: Option<Value>,
    pub selected_size: Option<String>,
    pub quantity: Option<i64>,
}

impl LineRequest {
    fn size(&self) -> Option<&str> {
        self.selected_size
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// The `(product, size)` key of a line to store, or `None` if either
    /// half is missing.
    fn key(&self) -> Result<Option<(ProductId, &str)>> {
        let product = reference(self.product.as_ref(), INVALID_PRODUCT)?;
        Ok(product.zip(self.size()))
    }

    /// The key of a line to find. A product that is not an id finds nothing.
    fn lookup_key(&self) -> Option<(Lookup<ProductId>, &str)> {
        lookup(self.product.as_ref()).zip(self.size())
    }
}

#[derive(Debug, Deserialize)]
pub struct OverwriteRequest {
    pub cart: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct CartResponse {
    pub message: &'static str,
    pub cart: Cart,
}

#[derive(Debug, Serialize)]
pub struct CartContents {
    pub cart: Vec<CartEntry>,
}

/// Convert a submitted quantity to a positive count.
fn positive_quantity(quantity: i64) -> Result<u32> {
    u32::try_from(quantity)
        .ok()
        .filter(|q| *q > 0)
        .ok_or_else(|| AppError::BadRequest(INVALID_QUANTITY.to_owned()))
}

/// Validate an overwrite payload into cart lines.
fn overwrite_lines(cart: Option<Value>) -> Result<Vec<CartLine>> {
    let Some(Value::Array(entries)) = cart else {
        return Err(AppError::BadRequest("Cart must be an array".to_owned()));
    };

    entries
        .into_iter()
        .map(|entry| {
            let line: LineRequest = serde_json::from_value(entry).map_err(|_| {
                AppError::BadRequest(
                    "Each cart item needs a product, selectedSize and quantity".to_owned(),
                )
            })?;
            let (product, size) = line.key()?.ok_or_else(|| {
                AppError::BadRequest("Each cart item needs a product and selectedSize".to_owned())
            })?;
            Ok(CartLine {
                product,
                quantity: positive_quantity(line.quantity.unwrap_or(1))?,
                selected_size: size.to_owned(),
            })
        })
        .collect()
}

/// POST /api/auth/cart
pub async fn add(
    State(state): State<AppState>,
    RequireAuth(current): RequireAuth,
    ApiJson(request): ApiJson<LineRequest>,
) -> Result<Json<CartResponse>> {
    let (product, size) = request.key()?.ok_or_else(|| {
        AppError::BadRequest("Product ID and selected size are required".to_owned())
    })?;
    let quantity = positive_quantity(request.quantity.unwrap_or(1))?;

    let cart = ShoppingService::new(state.pool())
        .add_to_cart(current.id, product, size, quantity)
        .await?;

    Ok(Json(CartResponse {
        message: "Added to cart",
        cart,
    }))
}

/// DELETE /api/auth/cart
pub async fn remove(
    State(state): State<AppState>,
    RequireAuth(current): RequireAuth,
    ApiJson(request): ApiJson<LineRequest>,
) -> Result<Json<CartResponse>> {
    let (product, size) = request.lookup_key().ok_or_else(|| {
        AppError::BadRequest("Product ID and selected size are required".to_owned())
    })?;

    let service = ShoppingService::new(state.pool());
    let cart = match product {
        Lookup::Id(product) => service.remove_from_cart(current.id, product, size).await?,
        Lookup::NoMatch => service.stored_cart(current.id).await?,
    };

    Ok(Json(CartResponse {
        message: "Removed from cart",
        cart,
    }))
}

/// PUT /api/auth/cart/update
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(current): RequireAuth,
    ApiJson(request): ApiJson<LineRequest>,
) -> Result<Json<CartResponse>> {
    let (Some((product, size)), Some(quantity)) = (request.lookup_key(), request.quantity) else {
        return Err(AppError::BadRequest(
            "Product ID, selected size and quantity are required".to_owned(),
        ));
    };
    let quantity = positive_quantity(quantity)?;

    let service = ShoppingService::new(state.pool());
    let cart = match product {
        Lookup::Id(product) => {
            service
                .update_cart_quantity(current.id, product, size, quantity)
                .await?
        }
        Lookup::NoMatch => service.stored_cart(current.id).await?,
    };

    Ok(Json(CartResponse {
        message: "Cart updated",
        cart,
    }))
}

/// PUT /api/auth/cart/overwrite
pub async fn overwrite(
    State(state): State<AppState>,
    RequireAuth(current): RequireAuth,
    ApiJson(request): ApiJson<OverwriteRequest>,
) -> Result<Json<CartResponse>> {
    let cart = Cart::from_lines(overwrite_lines(request.cart)?)
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let cart = ShoppingService::new(state.pool())
        .overwrite_cart(current.id, cart)
        .await?;

    Ok(Json(CartResponse {
        message: "Cart overwritten",
        cart,
    }))
}

/// GET /api/auth/cart
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(current): RequireAuth,
) -> Result<Json<CartContents>> {
    let cart = ShoppingService::new(state.pool()).cart(current.id).await?;
    Ok(Json(CartContents { cart }))
}
