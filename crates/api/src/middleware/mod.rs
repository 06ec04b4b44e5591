//! HTTP middleware and extractors.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layers (hub per request, capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//! 4. CORS and body limit
//!
//! Authentication is not a layer: protected handlers take a [`RequireAuth`]
//! argument, so a route cannot be reached without passing the gateway.

pub mod auth;
pub mod request_id;

pub use auth::{CurrentUser, RequireAuth};
pub use request_id::request_id_middleware;
