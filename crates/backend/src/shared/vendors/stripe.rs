//! Client for Stripe Checkout and PaymentIntents.
//!
//! Stripe's REST API takes form-encoded bodies with bracketed key paths, so
//! request parameters are built as flat key/value lists.

use super::{api_error, VendorError};
use crate::shared::config;
use contracts::payment::{CheckoutSessionRequest, PaymentIntentRequest};
use serde::Deserialize;
use std::time::Duration;

const VENDOR: &str = "Stripe";
const API_BASE: &str = "https://api.stripe.com/v1";

/// Form parameters for a Checkout session with a single ad-hoc line item.
pub fn checkout_session_params(
    req: &CheckoutSessionRequest,
    frontend_url: &str,
) -> Vec<(String, String)> {
    let success_url = req.success_url.clone().unwrap_or_else(|| {
        format!(
            "{}/success?session_id={{CHECKOUT_SESSION_ID}}",
            frontend_url
        )
    });
    let cancel_url = req
        .cancel_url
        .clone()
        .unwrap_or_else(|| format!("{}/?canceled=true", frontend_url));

    let product_name = if req.description.is_empty() {
        "3D Print Order".to_string()
    } else {
        req.description.clone()
    };

    let mut params = vec![
        ("mode".to_string(), "payment".to_string()),
        (
            "payment_method_types[0]".to_string(),
            "card".to_string(),
        ),
        (
            "line_items[0][price_data][currency]".to_string(),
            req.currency.clone(),
        ),
        (
            "line_items[0][price_data][product_data][name]".to_string(),
            product_name,
        ),
        (
            "line_items[0][price_data][unit_amount]".to_string(),
            req.amount.to_string(),
        ),
        ("line_items[0][quantity]".to_string(), "1".to_string()),
        ("success_url".to_string(), success_url),
        ("cancel_url".to_string(), cancel_url),
    ];
    for (key, value) in &req.metadata {
        params.push((format!("metadata[{}]", key), value.clone()));
    }
    params
}

/// Form parameters for a card PaymentIntent.
pub fn payment_intent_params(req: &PaymentIntentRequest) -> Vec<(String, String)> {
    let mut params = vec![
        ("amount".to_string(), req.amount.to_string()),
        ("currency".to_string(), req.currency.clone()),
        (
            "payment_method_types[0]".to_string(),
            "card".to_string(),
        ),
    ];
    for (key, value) in &req.metadata {
        params.push((format!("metadata[{}]", key), value.clone()));
    }
    params
}

#[derive(Debug, Deserialize)]
pub struct CheckoutSession {
    pub id: String,
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct PaymentIntent {
    pub id: String,
    pub client_secret: String,
}

pub struct StripeClient {
    http: reqwest::Client,
    base_url: String,
    secret_key: String,
}

impl StripeClient {
    pub fn new(base_url: String, secret_key: String) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("failed to build HTTP client");
        Self {
            http,
            base_url,
            secret_key,
        }
    }

    pub fn from_config() -> Self {
        Self::new(API_BASE.to_string(), config::env::stripe_secret_key())
    }

    async fn post_form<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        params: &[(String, String)],
    ) -> Result<T, VendorError> {
        let response = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .bearer_auth(&self.secret_key)
            .form(params)
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

    pub async fn create_checkout_session(
        &self,
        req: &CheckoutSessionRequest,
        frontend_url: &str,
    ) -> Result<CheckoutSession, VendorError> {
        self.post_form(
            "/checkout/sessions",
            &checkout_session_params(req, frontend_url),
        )
        .await
    }

    pub async fn create_payment_intent(
        &self,
        req: &PaymentIntentRequest,
    ) -> Result<PaymentIntent, VendorError> {
        self.post_form("/payment_intents", &payment_intent_params(req))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn checkout_req() -> CheckoutSessionRequest {
        let mut metadata = BTreeMap::new();
        metadata.insert("task_id".to_string(), "t-1".to_string());
        CheckoutSessionRequest {
            amount: 1250,
            description: "Dragon print".to_string(),
            currency: "usd".to_string(),
            success_url: None,
            cancel_url: None,
            metadata,
        }
    }

    fn find<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
        params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn checkout_params_default_redirect_urls() {
        let params = checkout_session_params(&checkout_req(), "http://localhost:3000");
        assert_eq!(find(&params, "mode"), Some("payment"));
        assert_eq!(
            find(&params, "success_url"),
            Some("http://localhost:3000/success?session_id={CHECKOUT_SESSION_ID}")
        );
        assert_eq!(
            find(&params, "cancel_url"),
            Some("http://localhost:3000/?canceled=true")
        );
        assert_eq!(
            find(&params, "line_items[0][price_data][unit_amount]"),
            Some("1250")
        );
        assert_eq!(find(&params, "metadata[task_id]"), Some("t-1"));
    }

    #[test]
    fn checkout_params_respect_explicit_urls() {
        let mut req = checkout_req();
        req.success_url = Some("https://df.example/thanks".to_string());
        let params = checkout_session_params(&req, "http://localhost:3000");
        assert_eq!(find(&params, "success_url"), Some("https://df.example/thanks"));
    }

    #[test]
    fn blank_description_falls_back_to_default_product_name() {
        let mut req = checkout_req();
        req.description = String::new();
        let params = checkout_session_params(&req, "http://localhost:3000");
        assert_eq!(
            find(&params, "line_items[0][price_data][product_data][name]"),
            Some("3D Print Order")
        );
    }

    #[test]
    fn payment_intent_params_shape() {
        let req = PaymentIntentRequest {
            amount: 500,
            currency: "usd".to_string(),
            metadata: BTreeMap::new(),
        };
        let params = payment_intent_params(&req);
        assert_eq!(find(&params, "amount"), Some("500"));
        assert_eq!(find(&params, "payment_method_types[0]"), Some("card"));
    }
}
