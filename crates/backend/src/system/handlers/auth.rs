use axum::extract::Json;
use contracts::auth::{
    AuthResponse, CreditChangeRequest, LoginRequest, SignupRequest, UserInfo,
};

use crate::api::error::ApiError;
use crate::system::auth::extractor::CurrentUser;
use crate::system::{auth::jwt, users::service as user_service};

fn to_user_info(user: crate::system::users::repository::User) -> UserInfo {
    UserInfo {
        id: user.id,
        email: user.email,
        credits: user.credits,
    }
}

/// Signup handler. New accounts start with the signup credit grant.
pub async fn signup(Json(request): Json<SignupRequest>) -> Result<Json<AuthResponse>, ApiError> {
    let user = user_service::signup(&request.email, &request.password)
        .await
        .map_err(|e| {
            tracing::warn!("Signup rejected: {}", e);
            ApiError::bad_request(e.to_string())
        })?;

    let access_token = jwt::generate_access_token(&user.id, &user.email)
        .await
        .map_err(|e| {
            tracing::error!("Failed to issue token: {}", e);
            ApiError::internal("Failed to issue token")
        })?;

    Ok(Json(AuthResponse {
        access_token,
        user: to_user_info(user),
    }))
}

/// Login handler
pub async fn login(Json(request): Json<LoginRequest>) -> Result<Json<AuthResponse>, ApiError> {
    let user = user_service::verify_credentials(&request.email, &request.password)
        .await
        .map_err(|e| {
            tracing::error!("Login failed: {}", e);
            ApiError::internal("Login failed")
        })?
        .ok_or_else(|| ApiError::unauthorized("Invalid email or password"))?;

    let access_token = jwt::generate_access_token(&user.id, &user.email)
        .await
        .map_err(|e| {
            tracing::error!("Failed to issue token: {}", e);
            ApiError::internal("Failed to issue token")
        })?;

    Ok(Json(AuthResponse {
        access_token,
        user: to_user_info(user),
    }))
}

/// Get current user handler (protected by middleware)
pub async fn current_user(CurrentUser(claims): CurrentUser) -> Result<Json<UserInfo>, ApiError> {
    let user = user_service::get_by_id(&claims.sub)
        .await
        .map_err(|e| {
            tracing::error!("User lookup failed: {}", e);
            ApiError::internal("User lookup failed")
        })?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(Json(to_user_info(user)))
}

/// Spend generation credits from the current user's balance
pub async fn spend_credits(
    CurrentUser(claims): CurrentUser,
    Json(request): Json<CreditChangeRequest>,
) -> Result<Json<UserInfo>, ApiError> {
    request.validate().map_err(ApiError::bad_request)?;

    user_service::spend_credits(&claims.sub, request.amount)
        .await
        .map_err(|e| {
            tracing::warn!(user_id = %claims.sub, "Credit spend refused: {}", e);
            ApiError::payment_required(e.to_string())
        })?;

    let user = user_service::get_by_id(&claims.sub)
        .await
        .map_err(|e| {
            tracing::error!("User lookup failed: {}", e);
            ApiError::internal("User lookup failed")
        })?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(Json(to_user_info(user)))
}

/// Credit the current user's balance after a purchase
pub async fn add_credits(
    CurrentUser(claims): CurrentUser,
    Json(request): Json<CreditChangeRequest>,
) -> Result<Json<UserInfo>, ApiError> {
    request.validate().map_err(ApiError::bad_request)?;

    user_service::add_credits(&claims.sub, request.amount)
        .await
        .map_err(|e| {
            tracing::error!(user_id = %claims.sub, "Credit top-up failed: {}", e);
            ApiError::internal(e.to_string())
        })?;

    let user = user_service::get_by_id(&claims.sub)
        .await
        .map_err(|e| {
            tracing::error!("User lookup failed: {}", e);
            ApiError::internal("User lookup failed")
        })?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(Json(to_user_info(user)))
}
