use crate::domain::error::PaymentError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub status: u16,
    pub error: &'static str,
    pub message: String,
}

impl IntoResponse for PaymentError {
    fn into_response(self) -> Response {
        let (status, error) = match &self {
            PaymentError::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "Validation Error"),
            PaymentError::Processing(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "Payment Processing Error")
            }
            PaymentError::PaymentNotFound(_) => (StatusCode::NOT_FOUND, "Payment Not Found"),
            PaymentError::WebhookNotFound(_) => (StatusCode::NOT_FOUND, "Webhook Not Found"),
            PaymentError::Crypto(_) | PaymentError::Internal(_) => {
                tracing::error!("internal error: {self:#}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
        };

        let message = match &self {
            // never leak internals to the caller
            PaymentError::Crypto(_) | PaymentError::Internal(_) => {
                "An unexpected error occurred".to_string()
            }
            other => other.to_string(),
        };

        let body = ErrorResponse {
            status: status.as_u16(),
            error,
            message,
        };
        (status, Json(body)).into_response()
    }
}
