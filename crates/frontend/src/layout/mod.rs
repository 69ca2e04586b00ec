use leptos::prelude::*;
use leptos_router::components::A;

use crate::system::auth::context::{do_logout, use_auth};

/// Top navigation bar, shown on every page.
#[component]
pub fn NavBar() -> impl IntoView {
    let (auth_state, set_auth_state) = use_auth();

    view! {
        <nav class="navbar">
            <A href="/" attr:class="navbar-brand">"DreamForge"</A>
            <div class="navbar-links">
                <A href="/generate">"Create"</A>
                <A href="/my-models">"My models"</A>
            </div>
            <div class="navbar-auth">
                {move || match auth_state.get().user_info {
                    Some(user) => view! {
                        <span class="navbar-credits">
                            {format!("{} credits", user.credits)}
                        </span>
                        <span class="navbar-email">{user.email.clone()}</span>
                        <button
                            class="btn-link"
                            on:click=move |_| do_logout(set_auth_state)
                        >
                            "Sign out"
                        </button>
                    }
                    .into_any(),
                    None => view! {
                        <A href="/login" attr:class="btn-secondary">"Sign in"</A>
                    }
                    .into_any(),
                }}
            </div>
        </nav>
    }
}
