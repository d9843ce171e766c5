//! Response envelopes.
//!
//! Every successful response is `{"success":true,"data":...}`; every error
//! is `{"success":false,"error":{"code","message","type"}}` with `type`
//! drawn from a closed set. The liquidity/payment/price-moved types are
//! reserved for trading functionality and never emitted today.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorType {
    Unauthorized,
    ValidationError,
    NotFound,
    InsufficientLiquidity,
    PaymentFailed,
    PriceMoved,
    SystemError,
}

#[derive(Debug, Error)]
#[error("{code}: {message}")]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
    pub error_type: ErrorType,
}

impl ApiError {
    pub fn new(
        status: StatusCode,
        code: &'static str,
        message: impl Into<String>,
        error_type: ErrorType,
    ) -> Self {
        Self {
            status,
            code,
            message: message.into(),
            error_type,
        }
    }

    pub fn unauthorized() -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            "UNAUTHORIZED",
            "Not authenticated",
            ErrorType::Unauthorized,
        )
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            "VALIDATION_ERROR",
            message,
            ErrorType::ValidationError,
        )
    }

    pub fn not_found(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, code, message, ErrorType::NotFound)
    }

    pub fn system(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            code,
            message,
            ErrorType::SystemError,
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = json!({
            "success": false,
            "error": {
                "code": self.code,
                "message": self.message,
                "type": self.error_type,
            },
        });
        (self.status, Json(body)).into_response()
    }
}

/// Wrap payload data in the success envelope.
pub fn api_success<T: Serialize>(data: T) -> Json<serde_json::Value> {
    Json(json!({ "success": true, "data": data }))
}
