use contracts::auth::UserInfo;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{api, storage};

#[derive(Clone, Debug, Default)]
pub struct AuthState {
    pub access_token: Option<String>,
    pub user_info: Option<UserInfo>,
}

/// Auth context provider component
#[component]
pub fn AuthProvider(children: ChildrenFn) -> impl IntoView {
    let (auth_state, set_auth_state) = create_signal(AuthState::default());

    // Try to restore the session from localStorage on mount
    create_effect(move |_| {
        spawn_local(async move {
            if let Some(access_token) = storage::get_access_token() {
                match api::get_current_user(&access_token).await {
                    Ok(user_info) => {
                        set_auth_state.set(AuthState {
                            access_token: Some(access_token),
                            user_info: Some(user_info),
                        });
                    }
                    Err(_) => {
                        // Token expired or invalid
                        storage::clear_tokens();
                    }
                }
            }
        });
    });

    provide_context(auth_state);
    provide_context(set_auth_state);

    children()
}

/// Hook to access auth state
pub fn use_auth() -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
    let auth_state =
        use_context::<ReadSignal<AuthState>>().expect("AuthProvider not found in component tree");
    let set_auth_state =
        use_context::<WriteSignal<AuthState>>().expect("AuthProvider not found in component tree");

    (auth_state, set_auth_state)
}

fn apply_auth_response(
    set_auth_state: WriteSignal<AuthState>,
    response: contracts::auth::AuthResponse,
) {
    storage::save_access_token(&response.access_token);
    set_auth_state.set(AuthState {
        access_token: Some(response.access_token),
        user_info: Some(response.user),
    });
}

/// Helper: perform login and update the store
pub async fn do_login(
    set_auth_state: WriteSignal<AuthState>,
    email: String,
    password: String,
) -> Result<(), String> {
    let response = api::login(email, password).await?;
    apply_auth_response(set_auth_state, response);
    Ok(())
}

/// Helper: create an account and sign in with it
pub async fn do_signup(
    set_auth_state: WriteSignal<AuthState>,
    email: String,
    password: String,
) -> Result<(), String> {
    let response = api::signup(email, password).await?;
    apply_auth_response(set_auth_state, response);
    Ok(())
}

/// Helper: perform logout
pub fn do_logout(set_auth_state: WriteSignal<AuthState>) {
    storage::clear_tokens();
    set_auth_state.set(AuthState::default());
}

/// Helper: refresh the cached user info (for example after a credit change)
pub async fn refresh_user(
    auth_state: ReadSignal<AuthState>,
    set_auth_state: WriteSignal<AuthState>,
) {
    let token = match auth_state.get_untracked().access_token {
        Some(t) => t,
        None => return,
    };
    if let Ok(user_info) = api::get_current_user(&token).await {
        set_auth_state.update(|state| state.user_info = Some(user_info));
    }
}
