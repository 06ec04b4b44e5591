//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                       - Liveness
//! GET    /health/ready                 - Readiness (database reachable)
//!
//! # Accounts
//! POST   /api/auth/register            - Register
//! POST   /api/auth/login               - Login, returns bearer token
//! GET    /api/auth/profile             - Own profile (auth)
//! PUT    /api/auth/profile             - Update own profile (auth)
//! DELETE /api/auth/account             - Delete own account (auth)
//!
//! # Wishlist (auth)
//! GET    /api/auth/wishlist            - Wishlist with products resolved
//! POST   /api/auth/wishlist/add        - Add product
//! DELETE /api/auth/wishlist/{id}       - Remove product
//!
//! # Cart (auth)
//! GET    /api/auth/cart                - Cart with products resolved
//! POST   /api/auth/cart                - Add line / merge quantity
//! DELETE /api/auth/cart                - Remove line
//! PUT    /api/auth/cart/update         - Set line quantity
//! PUT    /api/auth/cart/overwrite      - Replace whole cart
//!
//! # Catalog
//! GET    /api/products                 - List products
//! POST   /api/products                 - Create product
//! GET    /api/products/{id}            - Show product
//! PUT    /api/products/{id}            - Update product
//! DELETE /api/products/{id}            - Delete product
//!
//! # Orders
//! GET    /api/orders                   - List orders (populated)
//! POST   /api/orders                   - Create order
//! GET    /api/orders/{id}              - Show order (populated)
//! PUT    /api/orders/{id}              - Update order
//! DELETE /api/orders/{id}              - Delete order
//! ```

pub mod auth;
pub mod cart;
pub mod health;
pub mod orders;
pub mod products;
pub mod wishlist;

use std::str::FromStr;

use axum::{
    Router,
    extract::{DefaultBodyLimit, Request},
    http::{HeaderValue, Method, header},
    middleware,
    routing::{delete, get, post, put},
};
use serde::Serialize;
use serde_json::Value;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::error::AppError;
use crate::middleware::request_id_middleware;
use crate::state::AppState;

/// Body of responses that only carry a message.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// A reference used to find something already stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Lookup<T> {
    Id(T),
    /// Not an id, so no stored entry can match it.
    NoMatch,
}

/// Read a reference as clients send it: a number or a numeric string.
///
/// Absent, `null` and blank values are `None`.
pub(crate) fn lookup<T: FromStr>(value: Option<&Value>) -> Option<Lookup<T>> {
    let parsed = match value {
        None | Some(Value::Null) => return None,
        Some(Value::String(s)) if s.trim().is_empty() => return None,
        Some(Value::String(s)) => s.parse().ok(),
        Some(Value::Number(n)) => n.to_string().parse().ok(),
        Some(_) => None,
    };
    Some(parsed.map_or(Lookup::NoMatch, Lookup::Id))
}

/// Like [`lookup`], for references that are about to be stored: anything
/// present that is not an id is a 400 carrying `invalid`.
pub(crate) fn reference<T: FromStr>(
    value: Option<&Value>,
    invalid: &str,
) -> Result<Option<T>, AppError> {
    match lookup(value) {
        None => Ok(None),
        Some(Lookup::Id(id)) => Ok(Some(id)),
        Some(Lookup::NoMatch) => Err(AppError::BadRequest(invalid.to_owned())),
    }
}

/// Parse an id from a path segment.
pub(crate) fn path_id<T: FromStr>(raw: &str, invalid: &str) -> Result<T, AppError> {
    raw.parse()
        .map_err(|_| AppError::BadRequest(invalid.to_owned()))
}

/// Account, wishlist and cart routes, nested under `/api/auth`.
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/profile", get(auth::profile).put(auth::update_profile))
        .route("/account", delete(auth::delete_account))
        .route("/wishlist", get(wishlist::show))
        .route("/wishlist/add", post(wishlist::add))
        .route("/wishlist/{product_id}", delete(wishlist::remove))
        .route(
            "/cart",
            get(cart::show).post(cart::add).delete(cart::remove),
        )
        .route("/cart/update", put(cart::update))
        .route("/cart/overwrite", put(cart::overwrite))
}

/// Catalog routes, nested under `/api/products`.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index).post(products::create))
        .route(
            "/{id}",
            get(products::show)
                .put(products::update)
                .delete(products::destroy),
        )
}

/// Order routes, nested under `/api/orders`.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::index).post(orders::create))
        .route(
            "/{id}",
            get(orders::show).put(orders::update).delete(orders::destroy),
        )
}

/// CORS for the single browser origin, with credentials.
fn cors_layer(origin: &str) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true);

    match HeaderValue::from_str(origin) {
        Ok(origin) => layer.allow_origin(origin),
        Err(_) => {
            tracing::warn!(origin, "CORS origin is not a valid header value, refusing cross-origin");
            layer
        }
    }
}

/// The complete application with its middleware stack, minus Sentry.
pub fn app(state: AppState) -> Router {
    let body_limit = state.config().body_limit;
    let cors = cors_layer(&state.config().cors_origin);

    Router::new()
        .merge(health::routes())
        .nest("/api/auth", account_routes())
        .nest("/api/products", product_routes())
        .nest("/api/orders", order_routes())
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = tracing::field::Empty,
                )
            }),
        )
        .with_state(state)
}
