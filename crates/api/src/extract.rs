//! Request extractors.

use axum::extract::FromRequest;

use crate::error::AppError;

/// JSON body extractor whose rejections are rendered as [`AppError`].
///
/// Use instead of `axum::Json` in handlers so a malformed or mistyped body
/// gets the same `{"message": ...}` response as every other client error.
#[derive(Debug, Clone, Default, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);
