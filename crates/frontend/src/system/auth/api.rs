use contracts::auth::{
    AuthResponse, CreditChangeRequest, LoginRequest, SignupRequest, UserInfo,
};

use crate::shared::api_utils::{get_json_auth, post_json, post_json_auth};

/// Create an account. New accounts start with free generation credits.
pub async fn signup(email: String, password: String) -> Result<AuthResponse, String> {
    post_json("/api/auth/signup", &SignupRequest { email, password }).await
}

/// Login with email and password
pub async fn login(email: String, password: String) -> Result<AuthResponse, String> {
    post_json("/api/auth/login", &LoginRequest { email, password }).await
}

/// Get current user info
pub async fn get_current_user(access_token: &str) -> Result<UserInfo, String> {
    get_json_auth("/api/auth/me", access_token).await
}

/// Deduct generation credits from the balance
pub async fn spend_credits(amount: i64, access_token: &str) -> Result<UserInfo, String> {
    post_json_auth(
        "/api/auth/credits/spend",
        &CreditChangeRequest { amount },
        access_token,
    )
    .await
}

/// Add purchased credits to the balance
pub async fn add_credits(amount: i64, access_token: &str) -> Result<UserInfo, String> {
    post_json_auth(
        "/api/auth/credits/add",
        &CreditChangeRequest { amount },
        access_token,
    )
    .await
}
