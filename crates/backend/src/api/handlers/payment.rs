use axum::extract::Json;
use contracts::payment::{
    CheckoutSessionRequest, CheckoutSessionResponse, PaymentIntentRequest, PaymentIntentResponse,
};

use crate::api::error::ApiError;
use crate::domain::payment::service;

/// Create a hosted Checkout session for a print order or credit purchase
pub async fn create_checkout_session(
    Json(request): Json<CheckoutSessionRequest>,
) -> Result<Json<CheckoutSessionResponse>, ApiError> {
    if let Err(e) = request.validate() {
        tracing::warn!("Checkout request rejected: {}", e);
        return Err(ApiError::bad_request(e));
    }

    let response = service::create_checkout_session(&request)
        .await
        .map_err(|e| {
            tracing::error!("Checkout session failed: {}", e);
            ApiError::bad_gateway(e.to_string())
        })?;

    Ok(Json(response))
}

/// Create a card PaymentIntent
pub async fn create_payment_intent(
    Json(request): Json<PaymentIntentRequest>,
) -> Result<Json<PaymentIntentResponse>, ApiError> {
    if let Err(e) = request.validate() {
        tracing::warn!("PaymentIntent request rejected: {}", e);
        return Err(ApiError::bad_request(e));
    }

    let response = service::create_payment_intent(&request).await.map_err(|e| {
        tracing::error!("PaymentIntent failed: {}", e);
        ApiError::bad_gateway(e.to_string())
    })?;

    Ok(Json(response))
}
