//! Wishlist routes.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use rentmyfit_core::{ProductId, Wishlist};

use crate::error::{AppError, Result};
use crate::extract::ApiJson;
use crate::middleware::RequireAuth;
use crate::models::product::Product;
use crate::routes::reference;
use crate::services::ShoppingService;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddRequest {
    pub product_id: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct WishlistResponse {
    pub message: &'static str,
    pub wishlist: Wishlist,
}

#[derive(Debug, Serialize)]
pub struct WishlistProducts {
    pub wishlist: Vec<Product>,
}

/// POST /api/auth/wishlist/add
pub async fn add(
    State(state): State<AppState>,
    RequireAuth(current): RequireAuth,
    ApiJson(request): ApiJson<AddRequest>,
) -> Result<Json<WishlistResponse>> {
    let product: ProductId = reference(request.product_id.as_ref(), "Invalid product ID")?
        .ok_or_else(|| AppError::BadRequest("Product ID is required".to_owned()))?;

    let wishlist = ShoppingService::new(state.pool())
        .add_to_wishlist(current.id, product)
        .await?;

    Ok(Json(WishlistResponse {
        message: "Added to wishlist",
        wishlist,
    }))
}

/// DELETE /api/auth/wishlist/{product_id}
///
/// A segment that is not a product id matches nothing and leaves the
/// wishlist as it is.
pub async fn remove(
    State(state): State<AppState>,
    RequireAuth(current): RequireAuth,
    Path(product_id): Path<String>,
) -> Result<Json<WishlistResponse>> {
    let service = ShoppingService::new(state.pool());
    let wishlist = match product_id.parse::<ProductId>() {
        Ok(product) => service.remove_from_wishlist(current.id, product).await?,
        Err(_) => service.stored_wishlist(current.id).await?,
    };

    Ok(Json(WishlistResponse {
        message: "Removed from wishlist",
        wishlist,
    }))
}

/// GET /api/auth/wishlist
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(current): RequireAuth,
) -> Result<Json<WishlistProducts>> {
    let wishlist = ShoppingService::new(state.pool())
        .wishlist(current.id)
        .await?;

    Ok(Json(WishlistProducts { wishlist }))
}
