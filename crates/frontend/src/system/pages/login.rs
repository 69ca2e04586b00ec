use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

use crate::system::auth::context::{do_login, do_signup, use_auth};

#[component]
pub fn LoginPage() -> impl IntoView {
    let (email, set_email) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (error_message, set_error_message) = create_signal(Option::<String>::None);
    let (is_loading, set_is_loading) = create_signal(false);
    // Toggles between the sign-in and create-account forms
    let (signup_mode, set_signup_mode) = create_signal(false);

    let (_, set_auth_state) = use_auth();
    let navigate = use_navigate();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        let email_val = email.get();
        let password_val = password.get();
        let is_signup = signup_mode.get();
        let navigate = navigate.clone();

        set_is_loading.set(true);
        set_error_message.set(None);

        spawn_local(async move {
            let result = if is_signup {
                do_signup(set_auth_state, email_val, password_val).await
            } else {
                do_login(set_auth_state, email_val, password_val).await
            };

            set_is_loading.set(false);
            match result {
                Ok(()) => navigate("/generate", Default::default()),
                Err(e) => set_error_message.set(Some(e)),
            }
        });
    };

    view! {
        <div class="login-container">
            <div class="login-box">
                <h1>"DreamForge"</h1>
                <h2>{move || if signup_mode.get() { "Create account" } else { "Sign in" }}</h2>

                <Show when=move || error_message.get().is_some()>
                    <div class="error-message">
                        {move || error_message.get().unwrap_or_default()}
                    </div>
                </Show>

                <form on:submit=on_submit>
                    <div class="form-group">
                        <label for="email">"Email"</label>
                        <input
                            type="email"
                            id="email"
                            placeholder="you@example.com"
                            value=move || email.get()
                            on:input=move |ev| set_email.set(event_target_value(&ev))
                            required
                            disabled=move || is_loading.get()
                        />
                    </div>

                    <div class="form-group">
                        <label for="password">"Password"</label>
                        <input
                            type="password"
                            id="password"
                            value=move || password.get()
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                            required
                            disabled=move || is_loading.get()
                        />
                    </div>

                    <button type="submit" class="btn-primary" disabled=move || is_loading.get()>
                        {move || {
                            if is_loading.get() {
                                "Please wait..."
                            } else if signup_mode.get() {
                                "Create account"
                            } else {
                                "Sign in"
                            }
                        }}
                    </button>
                </form>

                <div class="login-info">
                    <Show
                        when=move || signup_mode.get()
                        fallback=move || view! {
                            <p>
                                "New here? "
                                <a href="#" on:click=move |ev| {
                                    ev.prevent_default();
                                    set_signup_mode.set(true);
                                }>"Create an account"</a>
                                " and get 20 free credits."
                            </p>
                        }
                    >
                        <p>
                            "Already have an account? "
                            <a href="#" on:click=move |ev| {
                                ev.prevent_default();
                                set_signup_mode.set(false);
                            }>"Sign in"</a>
                        </p>
                    </Show>
                </div>
            </div>
        </div>
    }
}
