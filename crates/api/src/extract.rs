//! Extractor wrappers whose rejections are [`AppError`]s.
//!
//! Axum's stock `Json`, `Query` and `Path` reject with plain-text bodies and,
//! for JSON data errors, a 422. These wrappers route every rejection through
//! [`AppError::BadRequest`] so malformed input gets the usual JSON error body
//! and a 400.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// JSON request body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Query string.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);

/// Path parameters.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);
