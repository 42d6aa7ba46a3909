//! Wire types and errors for the authentication API.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::store::StoreError;

/// Registration request payload
#[derive(Debug, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterRequest {
    pub fn new(name: &str, email: &str, password: &str, confirm_password: &str) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            confirm_password: confirm_password.to_string(),
        }
    }
}

/// Login request payload
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(email: &str, password: &str) -> Self {
        Self {
            email: email.to_string(),
            password: password.to_string(),
        }
    }
}

/// Verification request payload
///
/// `email` is whatever is currently stored as the pending verification
/// email; it serializes as `null` when nothing is stored.
#[derive(Debug, Serialize)]
pub struct VerifyRequest {
    pub email: Option<String>,
    pub code: String,
}

/// User object returned by the registration endpoint.
///
/// The server reports a plain empty `Settings` object for accounts
/// that still need onboarding. Unknown fields are ignored.
#[derive(Debug, Deserialize)]
pub struct RegisteredUser {
    pub email: String,
    #[serde(rename = "Settings", default)]
    pub settings: Map<String, Value>,
}

/// Login endpoint response
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: LoginUser,
}

/// User object nested in the login response
#[derive(Debug, Deserialize)]
pub struct LoginUser {
    #[serde(default)]
    pub verified: bool,
    pub email: String,
    #[serde(rename = "Settings", default)]
    pub settings: Map<String, Value>,
}

/// Error body returned by the verification endpoint on failure.
///
/// Decoded best-effort for the debug log only; callers never see it.
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub message: Option<String>,
    pub errors: Option<Value>,
}

/// Authentication error types
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Server returned status {0}")]
    Status(u16),

    #[error("Invalid response: {0}")]
    Decode(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    #[error("Configuration error: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_request_serializes_missing_email_as_null() {
        let request = VerifyRequest {
            email: None,
            code: "1234".to_string(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json, serde_json::json!({ "email": null, "code": "1234" }));
    }

    #[test]
    fn test_registered_user_defaults_missing_settings_to_empty() {
        let user: RegisteredUser =
            serde_json::from_str(r#"{"email":"a@example.com"}"#).unwrap();
        assert!(user.settings.is_empty());
    }

    #[test]
    fn test_login_response_ignores_extra_fields() {
        let body = r#"{
            "token": "tok",
            "user": {
                "verified": true,
                "email": "a@example.com",
                "Settings": {"theme": "dark"},
                "id": 42
            },
            "expires": 999
        }"#;
        let response: LoginResponse = serde_json::from_str(body).unwrap();
        assert!(response.user.verified);
        assert_eq!(response.user.settings.len(), 1);
    }
}
