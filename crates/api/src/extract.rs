//! # Extractors
//!
//! Drop-in replacements for axum's `Path`, `Query` and `Json` whose
//! rejections go through [`AppError`], so malformed path segments, query
//! strings and bodies get the same `{"error": ...}` body as domain errors.

use axum::extract::{FromRequest, FromRequestParts};

use crate::middleware::error_handling::AppError;

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct Path<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct Query<T>(pub T);

/// Request body. Responses keep using `axum::Json`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);
