use axum::extract::Json;
use contracts::printing::{EstimateRequest, EstimateResponse, OrderRequest, OrderResponse};

use crate::api::error::ApiError;
use crate::domain::printing::service;

/// Slice a model file and return the print cost
pub async fn estimate(
    Json(request): Json<EstimateRequest>,
) -> Result<Json<EstimateResponse>, ApiError> {
    if request.file_url.trim().is_empty() {
        return Err(ApiError::bad_request("file_url is required"));
    }

    let response = service::estimate(&request).await.map_err(|e| {
        tracing::error!("Cost estimate failed: {}", e);
        ApiError::bad_gateway(e.to_string())
    })?;

    Ok(Json(response))
}

/// Place a print order
pub async fn create_order(
    Json(request): Json<OrderRequest>,
) -> Result<Json<OrderResponse>, ApiError> {
    if let Err(e) = request.validate() {
        tracing::warn!("Order request rejected: {}", e);
        return Err(ApiError::bad_request(e));
    }

    let response = service::create_order(&request).await.map_err(|e| {
        tracing::error!("Order placement failed: {}", e);
        ApiError::bad_gateway(e.to_string())
    })?;

    Ok(Json(response))
}
