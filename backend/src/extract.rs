//! Request extractors whose rejections render like every other API error.
//!
//! Axum's stock `Json` and `Path` answer malformed input with plain-text
//! bodies (and `422` for JSON that parses but does not fit the type). These
//! wrappers turn those rejections into [`ApiError::BadRequest`], so clients
//! always get `400` with a `{"message": ...}` body.

use axum::extract::{FromRequest, FromRequestParts};

use crate::errors::ApiError;

#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);
