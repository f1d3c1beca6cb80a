//! Request extractors whose rejections use the gateway's error body

use axum::extract::FromRequestParts;

use crate::error::GatewayError;

/// Path parameters; a segment that fails to parse becomes a 400
/// [`GatewayError::InvalidRequest`] instead of axum's plain-text rejection.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(GatewayError))]
pub struct ApiPath<T>(pub T);
