//! The uniform response envelope shared by every endpoint.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

/// The envelope wrapping every API response.
///
/// Exactly one of `data` and `errors` is populated: successful requests
/// carry their payload in `data` with `errors` null, rejected requests carry
/// a flat message string in `errors` with `data` null. The constructors are
/// the only way to build one, which keeps the either-or shape intact.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ApiResponse<T> {
    /// The success payload, if any.
    pub data: Option<T>,
    /// The error message, if any.
    pub errors: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Wrap a success payload.
    pub fn data(data: T) -> Self {
        Self {
            data: Some(data),
            errors: None,
        }
    }
}

impl ApiResponse<()> {
    /// Wrap an error message.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            data: None,
            errors: Some(message.into()),
        }
    }
}

/// Serialize `body` as the JSON response for `status_code`.
#[inline]
pub fn render<T: Serialize>(status_code: StatusCode, body: ApiResponse<T>) -> Response {
    (status_code, Json(body)).into_response()
}
