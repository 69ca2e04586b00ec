//! Handler error type.
//!
//! Every failed handler returns a status code plus a JSON body with a
//! client-safe message, which the frontend shows in a toast.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use contracts::error::ErrorBody;

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn payment_required(message: impl Into<String>) -> Self {
        Self::new(StatusCode::PAYMENT_REQUIRED, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_GATEWAY, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody::new(self.message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn error_responses_carry_a_json_detail_body() {
        let response = ApiError::bad_gateway("Meshy API error 500").into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: ErrorBody = serde_json::from_slice(&bytes).unwrap();
        assert!(!body.success);
        assert_eq!(body.error, "Meshy API error 500");
    }

    #[tokio::test]
    async fn constructors_map_to_their_status_codes() {
        assert_eq!(
            ApiError::bad_request("x").into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::unauthorized("x").into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::payment_required("x").into_response().status(),
            StatusCode::PAYMENT_REQUIRED
        );
        assert_eq!(
            ApiError::internal("x").into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
