//! Client for the Slant3D slicing and print-order API.

use super::{api_error, VendorError};
use crate::shared::config;
use contracts::printing::{CostEstimate, OrderRequest};
use serde_json::json;
use std::time::Duration;

const VENDOR: &str = "Slant3D";

/// Order payload in the vendor's flattened shape. Quantity is sent as a
/// string because that is what the order endpoint expects.
pub fn order_payload(req: &OrderRequest) -> serde_json::Value {
    json!({
        "email": req.email,
        "phone": req.phone,
        "name": req.name,
        "orderNumber": req.order_number,
        "filename": req.filename,
        "fileURL": req.file_url,
        "bill_to_street_1": req.bill_to_street_1,
        "bill_to_street_2": req.bill_to_street_2,
        "bill_to_street_3": "",
        "bill_to_city": req.bill_to_city,
        "bill_to_state": req.bill_to_state,
        "bill_to_zip": req.bill_to_zip,
        "bill_to_country_as_iso": req.bill_to_country_as_iso,
        "bill_to_is_US_residential": "true",
        "ship_to_name": req.ship_to_name,
        "ship_to_street_1": req.ship_to_street_1,
        "ship_to_street_2": req.ship_to_street_2,
        "ship_to_street_3": "",
        "ship_to_city": req.ship_to_city,
        "ship_to_state": req.ship_to_state,
        "ship_to_zip": req.ship_to_zip,
        "ship_to_country_as_iso": req.ship_to_country_as_iso,
        "ship_to_is_US_residential": "true",
        "order_item_name": req.filename,
        "order_quantity": req.order_quantity.to_string(),
        "order_image_url": "",
        "order_sku": req.order_sku,
        "order_item_color": req.order_item_color,
    })
}

pub struct Slant3dClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl Slant3dClient {
    pub fn new(base_url: String, api_key: String) -> Self {
        // Slicing a large mesh can take a while, so a longer timeout than
        // the other vendor clients.
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .expect("failed to build HTTP client");
        Self {
            http,
            base_url,
            api_key,
        }
    }

    pub fn from_config() -> Self {
        Self::new(
            config::get().slant3d.base_url.clone(),
            config::env::slant3d_api_key(),
        )
    }

    /// Run the slicer against a model file and return its cost estimate.
    pub async fn estimate(&self, file_url: &str) -> Result<CostEstimate, VendorError> {
        let response = self
            .http
            .post(format!("{}/slicer", self.base_url))
            .header("api-key", &self.api_key)
            .json(&json!({ "fileURL": file_url }))
            .send()
            .await
            .map_err(|e| VendorError::network(VENDOR, e))?;

        if !response.status().is_success() {
            return Err(api_error(VENDOR, response).await);
        }

        response
            .json()
            .await
            .map_err(|e| VendorError::network(VENDOR, e))
    }

    /// Place a print order.
    pub async fn create_order(
        &self,
        req: &OrderRequest,
    ) -> Result<serde_json::Value, VendorError> {
        let response = self
            .http
            .post(format!("{}/order", self.base_url))
            .header("api-key", &self.api_key)
            .json(&order_payload(req))
            .send()
            .await
            .map_err(|e| VendorError::network(VENDOR, e))?;

        if !response.status().is_success() {
            return Err(api_error(VENDOR, response).await);
        }

        response
            .json()
            .await
            .map_err(|e| VendorError::network(VENDOR, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order() -> OrderRequest {
        serde_json::from_str(
            r#"{
            "email": "buyer@example.com",
            "name": "Buyer",
            "filename": "dragon.glb",
            "file_url": "https://assets.meshy.ai/x/dragon.glb",
            "order_number": "DF-1001",
            "order_sku": "DF-GLB",
            "order_quantity": 2,
            "order_item_color": "grey",
            "bill_to_street_1": "1 Main St",
            "bill_to_city": "Austin",
            "bill_to_state": "TX",
            "bill_to_zip": "78701",
            "ship_to_name": "Buyer",
            "ship_to_street_1": "1 Main St",
            "ship_to_city": "Austin",
            "ship_to_state": "TX",
            "ship_to_zip": "78701"
        }"#,
        )
        .unwrap()
    }

    #[test]
    fn order_payload_uses_vendor_field_names() {
        let payload = order_payload(&order());
        assert_eq!(payload["fileURL"], "https://assets.meshy.ai/x/dragon.glb");
        assert_eq!(payload["orderNumber"], "DF-1001");
        // Quantity is stringified for the vendor
        assert_eq!(payload["order_quantity"], "2");
        // Country defaults applied by serde
        assert_eq!(payload["ship_to_country_as_iso"], "US");
        assert_eq!(payload["order_item_name"], "dragon.glb");
    }
}
