use anyhow::Result;
use chrono::Utc;
use contracts::auth::SIGNUP_CREDITS;

use super::repository::{self, User};
use crate::system::auth::password;

/// Create a new account with the signup credit grant
pub async fn signup(email: &str, plain_password: &str) -> Result<User> {
    let email = email.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') {
        return Err(anyhow::anyhow!("Invalid email format"));
    }

    if repository::get_by_email(&email).await?.is_some() {
        return Err(anyhow::anyhow!("Email already registered"));
    }

    password::validate_password_strength(plain_password)?;
    let password_hash = password::hash_password(plain_password)?;

    let user = User {
        id: uuid::Uuid::new_v4().to_string(),
        email,
        credits: SIGNUP_CREDITS,
        credits_used: 0,
        created_at: Utc::now().to_rfc3339(),
    };

    repository::create_with_password(&user, &password_hash).await?;

    Ok(user)
}

/// Verify user credentials (for login)
pub async fn verify_credentials(email: &str, plain_password: &str) -> Result<Option<User>> {
    let email = email.trim().to_lowercase();
    let user = match repository::get_by_email(&email).await? {
        Some(u) => u,
        None => return Ok(None),
    };

    let password_hash = repository::get_password_hash(&user.id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Password hash not found"))?;

    if !password::verify_password(plain_password, &password_hash)? {
        return Ok(None);
    }

    Ok(Some(user))
}

/// Get user by ID
pub async fn get_by_id(id: &str) -> Result<Option<User>> {
    repository::get_by_id(id).await
}

/// Deduct generation credits, returning the fresh balance.
/// Errors when the balance does not cover the amount.
pub async fn spend_credits(user_id: &str, amount: i64) -> Result<i64> {
    if !repository::spend_credits(user_id, amount).await? {
        return Err(anyhow::anyhow!("Insufficient credits"));
    }
    let user = repository::get_by_id(user_id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("User not found"))?;
    Ok(user.credits)
}

/// Add purchased credits, returning the fresh balance
pub async fn add_credits(user_id: &str, amount: i64) -> Result<i64> {
    repository::add_credits(user_id, amount).await?;
    let user = repository::get_by_id(user_id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("User not found"))?;
    Ok(user.credits)
}
