use crate::domain::error::ReconError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Newtype over the domain error so the HTTP mapping lives in the adapter
/// layer, not in the domain.
pub struct ApiError(pub ReconError);

impl From<ReconError> for ApiError {
    fn from(err: ReconError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match &self.0 {
            ReconError::Validation(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation_error",
                msg.clone(),
            ),
            ReconError::InvalidOrder(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "invalid_order",
                msg.clone(),
            ),
            ReconError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            ReconError::InvalidStatusTransition(msg) => (
                StatusCode::CONFLICT,
                "invalid_status_transition",
                msg.clone(),
            ),
            ReconError::AlreadyDecided(id) => (
                StatusCode::CONFLICT,
                "already_decided",
                format!("exchange request {id} is already decided"),
            ),
            ReconError::DuplicateRequest(id) => (
                StatusCode::CONFLICT,
                "duplicate_request",
                format!("order {id} already has an exchange request"),
            ),
            ReconError::NotEligible(msg) => {
                (StatusCode::CONFLICT, "not_eligible", msg.clone())
            }
            ReconError::PaymentVerification(msg) => (
                StatusCode::BAD_REQUEST,
                "payment_verification_failed",
                msg.clone(),
            ),
            ReconError::GatewayUnavailable(msg) => {
                tracing::error!("gateway unavailable: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "gateway_unavailable",
                    "payment gateway unavailable, retry checkout".to_string(),
                )
            }
            ReconError::WebhookSignature(_) => (
                StatusCode::BAD_REQUEST,
                "webhook_error",
                "invalid webhook signature".to_string(),
            ),
            ReconError::Unauthorized(msg) => {
                (StatusCode::UNAUTHORIZED, "unauthorized", msg.clone())
            }
            // Internal failures stay opaque; on the webhook path the 500 is
            // what makes the gateway redeliver.
            ReconError::Database(err) => {
                tracing::error!("database error: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "internal error".to_string(),
                )
            }
            ReconError::Serialization(err) => {
                tracing::error!("serialization error: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "internal error".to_string(),
                )
            }
        };

        let body = serde_json::json!({
            "error_code": error_code,
            "message": message,
        });

        (status, Json(body)).into_response()
    }
}
