//! Data structures for authentication-related entities.
//!
//! This module defines the registration and session request payloads along
//! with the responses returned to clients.

use crate::api::common::{empty_to_none, first_validation_message};
use crate::database::models::User;
use crate::errors::{ServiceError, ServiceResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Registration request payload
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[serde(default)]
    #[validate(length(
        min = 3,
        max = 30,
        message = "Username must be between 3-30 characters"
    ))]
    pub username: String,

    #[validate(email(message = "Must be a valid email"))]
    pub email: Option<String>,

    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl RegisterRequest {
    /// Normalizes and validates the payload in one atomic step.
    pub fn validated(mut self) -> ServiceResult<Self> {
        self.username = self.username.trim().to_lowercase();
        self.email = empty_to_none(self.email);
        self.validate()
            .map_err(|errors| ServiceError::validation(first_validation_message(&errors)))?;
        Ok(self)
    }
}

/// Session creation (login) request payload
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl LoginRequest {
    pub fn validated(mut self) -> ServiceResult<Self> {
        self.username = self.username.trim().to_lowercase();
        self.validate()
            .map_err(|errors| ServiceError::validation(first_validation_message(&errors)))?;
        Ok(self)
    }
}

/// User information returned by registration and session creation
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: String,
    pub username: String,
    pub email: Option<String>,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserInfo {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

/// Session creation response containing the access token and user info
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub user: UserInfo,
    pub expires_in: u64, // Token expiration in seconds
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_username_is_trimmed_and_lowercased() {
        let request = RegisterRequest {
            username: "  AdaLovelace  ".to_string(),
            email: None,
            password: "hunter2passwd".to_string(),
        };
        let validated = request.validated().unwrap();
        assert_eq!(validated.username, "adalovelace");
    }

    #[test]
    fn registration_requires_a_password() {
        let request = RegisterRequest {
            username: "adalovelace".to_string(),
            email: None,
            password: "".to_string(),
        };
        let error = request.validated().unwrap_err();
        assert!(error.to_string().contains("Password"));
    }

    #[test]
    fn registration_empty_email_becomes_absent() {
        let request = RegisterRequest {
            username: "adalovelace".to_string(),
            email: Some("".to_string()),
            password: "hunter2passwd".to_string(),
        };
        assert_eq!(request.validated().unwrap().email, None);
    }
}
