use std::collections::BTreeMap;

use contracts::payment::CheckoutSessionRequest;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;

use crate::domain::generation::context::use_model;
use crate::domain::payment::api;
use crate::shared::toast::use_toasts;

const CREDIT_PACK_TOKENS: i64 = 200;
const CREDIT_PACK_PRICE_CENTS: i64 = 500;

fn origin() -> String {
    web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_default()
}

fn redirect_to(url: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.location().set_href(url);
    }
}

/// Checkout page: pay for a print of the current model, or top up credits.
#[component]
pub fn PaymentPage() -> impl IntoView {
    let model = use_model();
    let toasts = use_toasts();

    let (is_redirecting, set_is_redirecting) = create_signal(false);

    let print_price_cents = move || {
        model
            .cost_estimate
            .get()
            .and_then(|e| e.total_price)
            .map(|price| (price * 100.0).round() as i64)
    };

    let checkout = move |request: CheckoutSessionRequest| {
        set_is_redirecting.set(true);
        spawn_local(async move {
            match api::create_checkout_session(&request).await {
                Ok(response) => redirect_to(&response.url),
                Err(e) => {
                    toasts.error(format!("Checkout failed: {}", e));
                    set_is_redirecting.set(false);
                }
            }
        });
    };

    let pay_for_print = move |_| {
        let amount = match print_price_cents() {
            Some(cents) if cents >= 50 => cents,
            _ => {
                toasts.error("No print estimate available");
                return;
            }
        };
        let prompt = model.prompt.get_untracked();
        let description = if prompt.is_empty() {
            "3D Print Order".to_string()
        } else {
            format!("3D print: {}", prompt)
        };

        let mut metadata = BTreeMap::new();
        metadata.insert("order_type".to_string(), "print".to_string());
        if let Some(task_id) = model.preview_task_id.get_untracked() {
            metadata.insert("task_id".to_string(), task_id);
        }

        checkout(CheckoutSessionRequest {
            amount,
            description,
            currency: "usd".to_string(),
            success_url: None,
            cancel_url: None,
            metadata,
        });
    };

    let buy_credits = move |_| {
        let mut metadata = BTreeMap::new();
        metadata.insert("order_type".to_string(), "token_purchase".to_string());

        checkout(CheckoutSessionRequest {
            amount: CREDIT_PACK_PRICE_CENTS,
            description: format!("{} DreamForge credits", CREDIT_PACK_TOKENS),
            currency: "usd".to_string(),
            success_url: Some(format!(
                "{}/success?token_purchase=true&session_id={{CHECKOUT_SESSION_ID}}",
                origin()
            )),
            cancel_url: Some(format!("{}/payment?canceled=true", origin())),
            metadata,
        });
    };

    view! {
        <div class="payment-page">
            <h2>"Checkout"</h2>

            <div class="payment-card">
                <h3>"Print your model"</h3>
                {move || match print_price_cents() {
                    Some(cents) => view! {
                        <p class="price-line">{format!("${:.2}", cents as f64 / 100.0)}</p>
                        <button
                            class="btn-primary"
                            on:click=pay_for_print
                            disabled=move || is_redirecting.get()
                        >
                            "Pay and order print"
                        </button>
                    }
                    .into_any(),
                    None => view! {
                        <p>"Get a print estimate from the preview page first."</p>
                        <A href="/preview" attr:class="btn-secondary">"Back to preview"</A>
                    }
                    .into_any(),
                }}
            </div>

            <div class="payment-card">
                <h3>"Buy credits"</h3>
                <p class="price-line">
                    {format!(
                        "{} credits for ${:.2}",
                        CREDIT_PACK_TOKENS,
                        CREDIT_PACK_PRICE_CENTS as f64 / 100.0
                    )}
                </p>
                <button
                    class="btn-secondary"
                    on:click=buy_credits
                    disabled=move || is_redirecting.get()
                >
                    "Buy credit pack"
                </button>
            </div>
        </div>
    }
}
