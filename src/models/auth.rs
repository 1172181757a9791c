use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST users/auth-with-password`
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub identity: String,
    pub password: String,
}

/// Body of `POST users/records`
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[serde(rename = "passwordConfirm")]
    pub password_confirm: String,
}

/// Session token plus the authenticated user record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    #[serde(default)]
    pub record: Value,
}
