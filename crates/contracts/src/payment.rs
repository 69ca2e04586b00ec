//! Checkout types for the payment provider (Stripe).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Stripe rejects card charges below 50 cents.
pub const MIN_CHARGE_CENTS: i64 = 50;

fn default_currency() -> String {
    "usd".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutSessionRequest {
    /// Charge amount in the currency's smallest unit (cents for USD).
    pub amount: i64,
    pub description: String,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub success_url: Option<String>,
    #[serde(default)]
    pub cancel_url: Option<String>,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

impl CheckoutSessionRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.amount < MIN_CHARGE_CENTS {
            return Err(format!("amount must be at least {} cents", MIN_CHARGE_CENTS));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutSessionResponse {
    pub success: bool,
    #[serde(rename = "sessionId")]
    pub session_id: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentIntentRequest {
    pub amount: i64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

impl PaymentIntentRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.amount < MIN_CHARGE_CENTS {
            return Err(format!("amount must be at least {} cents", MIN_CHARGE_CENTS));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentIntentResponse {
    pub success: bool,
    #[serde(rename = "clientSecret")]
    pub client_secret: String,
    #[serde(rename = "paymentIntentId")]
    pub payment_intent_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_sub_minimum_amounts() {
        let req: CheckoutSessionRequest =
            serde_json::from_str(r#"{"amount":49,"description":"3D Print Order"}"#).unwrap();
        assert!(req.validate().is_err());
        assert_eq!(req.currency, "usd");
    }
}
