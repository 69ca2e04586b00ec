use contracts::printing::{EstimateRequest, EstimateResponse, OrderRequest, OrderResponse};

use crate::shared::api_utils::post_json;

/// Get a print cost estimate for a model file
pub async fn estimate(file_url: String) -> Result<EstimateResponse, String> {
    post_json("/api/slant3d/estimate", &EstimateRequest { file_url }).await
}

/// Place a print order after payment
pub async fn create_order(request: &OrderRequest) -> Result<OrderResponse, String> {
    post_json("/api/slant3d/order", request).await
}
