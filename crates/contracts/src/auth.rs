//! Account and token types for the credit system.

use serde::{Deserialize, Serialize};

/// Credits granted to a fresh account.
pub const SIGNUP_CREDITS: i64 = 20;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub user: UserInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub email: String,
    /// Remaining generation credits.
    pub credits: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String, // user id
    pub email: String,
    pub exp: usize, // expiration timestamp
    pub iat: usize, // issued at
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditChangeRequest {
    pub amount: i64,
}

impl CreditChangeRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.amount <= 0 {
            return Err("amount must be positive".into());
        }
        Ok(())
    }
}
