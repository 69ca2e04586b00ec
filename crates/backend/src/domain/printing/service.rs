use anyhow::Result;
use contracts::printing::{EstimateRequest, EstimateResponse, OrderRequest, OrderResponse};

use crate::shared::vendors::slant3d::Slant3dClient;

/// Slice the referenced model file and return the print cost
pub async fn estimate(req: &EstimateRequest) -> Result<EstimateResponse> {
    if req.file_url.trim().is_empty() {
        return Err(anyhow::anyhow!("file_url is required"));
    }

    let client = Slant3dClient::from_config();
    let estimate = client.estimate(&req.file_url).await?;

    tracing::info!(
        file_url = %req.file_url,
        total_price = ?estimate.total_price,
        "Print cost estimated"
    );

    Ok(EstimateResponse {
        success: true,
        estimate,
    })
}

/// Place a print order with the fulfillment vendor
pub async fn create_order(req: &OrderRequest) -> Result<OrderResponse> {
    req.validate().map_err(|e| anyhow::anyhow!(e))?;

    let client = Slant3dClient::from_config();
    let order = client.create_order(req).await?;

    tracing::info!(order_number = %req.order_number, "Print order placed");

    Ok(OrderResponse {
        success: true,
        order,
    })
}
