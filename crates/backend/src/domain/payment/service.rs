use anyhow::Result;
use contracts::payment::{
    CheckoutSessionRequest, CheckoutSessionResponse, PaymentIntentRequest, PaymentIntentResponse,
};

use crate::shared::config;
use crate::shared::vendors::stripe::StripeClient;

/// Create a hosted Checkout session and hand its redirect URL back
pub async fn create_checkout_session(
    req: &CheckoutSessionRequest,
) -> Result<CheckoutSessionResponse> {
    req.validate().map_err(|e| anyhow::anyhow!(e))?;

    let client = StripeClient::from_config();
    let session = client
        .create_checkout_session(req, &config::env::frontend_url())
        .await?;

    tracing::info!(session_id = %session.id, amount = req.amount, "Checkout session created");

    Ok(CheckoutSessionResponse {
        success: true,
        session_id: session.id,
        url: session.url,
    })
}

/// Create a card PaymentIntent for in-page payment flows
pub async fn create_payment_intent(
    req: &PaymentIntentRequest,
) -> Result<PaymentIntentResponse> {
    req.validate().map_err(|e| anyhow::anyhow!(e))?;

    let client = StripeClient::from_config();
    let intent = client.create_payment_intent(req).await?;

    tracing::info!(intent_id = %intent.id, amount = req.amount, "PaymentIntent created");

    Ok(PaymentIntentResponse {
        success: true,
        client_secret: intent.client_secret,
        payment_intent_id: intent.id,
    })
}
