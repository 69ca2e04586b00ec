//! Print cost estimation and order placement types (Slant3D backend).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimateRequest {
    pub file_url: String,
}

/// Slicer output: what it would cost to print the referenced file.
///
/// The vendor payload is passed through; unknown fields are preserved so the
/// frontend can keep the raw response alongside the model metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostEstimate {
    #[serde(rename = "totalPrice", default)]
    pub total_price: Option<f64>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(flatten)]
    pub extra: std::collections::BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimateResponse {
    pub success: bool,
    pub estimate: CostEstimate,
}

fn default_country() -> String {
    "US".to_string()
}

/// Full order payload for the print vendor. Billing and shipping addresses
/// are flattened the way the vendor's order endpoint expects them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRequest {
    pub email: String,
    pub name: String,
    pub filename: String,
    pub file_url: String,
    pub order_number: String,
    pub order_sku: String,
    pub order_quantity: u32,
    pub order_item_color: String,
    pub bill_to_street_1: String,
    pub bill_to_city: String,
    pub bill_to_state: String,
    pub bill_to_zip: String,
    pub ship_to_name: String,
    pub ship_to_street_1: String,
    pub ship_to_city: String,
    pub ship_to_state: String,
    pub ship_to_zip: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub bill_to_street_2: String,
    #[serde(default = "default_country")]
    pub bill_to_country_as_iso: String,
    #[serde(default)]
    pub ship_to_street_2: String,
    #[serde(default = "default_country")]
    pub ship_to_country_as_iso: String,
}

impl OrderRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.order_quantity < 1 {
            return Err("order_quantity must be at least 1".into());
        }
        if self.email.trim().is_empty() {
            return Err("email is required".into());
        }
        if self.file_url.trim().is_empty() {
            return Err("file_url is required".into());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderResponse {
    pub success: bool,
    pub order: serde_json::Value,
}
