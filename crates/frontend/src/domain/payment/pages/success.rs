use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use leptos_router::hooks::use_query_map;

use crate::shared::toast::use_toasts;
use crate::system::auth::{api as auth_api, context::use_auth, storage};

const CREDIT_PACK_TOKENS: i64 = 200;

/// Landing page after a completed Checkout. Credit purchases are applied
/// to the signed-in account here.
#[component]
pub fn SuccessPage() -> impl IntoView {
    let query = use_query_map();
    let toasts = use_toasts();
    let (auth_state, set_auth_state) = use_auth();

    let token_purchase = query
        .get_untracked()
        .get("token_purchase")
        .map(|v| v == "true")
        .unwrap_or(false);

    let (credited, set_credited) = create_signal(false);

    create_effect(move |_| {
        if !token_purchase || credited.get_untracked() {
            return;
        }
        // Read the token directly: the restore effect in AuthProvider may
        // not have run yet when we land here from the Stripe redirect
        let token = match storage::get_access_token() {
            Some(t) => t,
            None => return,
        };

        set_credited.set(true);
        spawn_local(async move {
            match auth_api::add_credits(CREDIT_PACK_TOKENS, &token).await {
                Ok(user_info) => {
                    toasts.info(format!(
                        "{} credits added. New balance: {}",
                        CREDIT_PACK_TOKENS, user_info.credits
                    ));
                    set_auth_state.update(|state| state.user_info = Some(user_info));
                }
                Err(e) => toasts.error(format!("Could not apply credits: {}", e)),
            }
        });
    });

    view! {
        <div class="success-page">
            <h2>"Thank you!"</h2>

            {if token_purchase {
                view! {
                    <p>
                        "Your credit purchase is complete."
                        {move || {
                            auth_state
                                .get()
                                .user_info
                                .map(|u| format!(" Current balance: {} credits.", u.credits))
                                .unwrap_or_default()
                        }}
                    </p>
                }
                .into_any()
            } else {
                view! {
                    <p>
                        "Your order has been received. We'll start printing your model "
                        "and send updates to your email."
                    </p>
                }
                .into_any()
            }}

            <div class="success-actions">
                <A href="/generate" attr:class="btn-primary">"Create another model"</A>
                <A href="/" attr:class="btn-secondary">"Back home"</A>
            </div>
        </div>
    }
}
