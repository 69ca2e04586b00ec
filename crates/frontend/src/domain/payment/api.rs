use contracts::payment::{CheckoutSessionRequest, CheckoutSessionResponse};

use crate::shared::api_utils::post_json;

/// Create a hosted Checkout session; the caller redirects to the returned URL
pub async fn create_checkout_session(
    request: &CheckoutSessionRequest,
) -> Result<CheckoutSessionResponse, String> {
    post_json("/api/stripe/create-checkout-session", request).await
}
