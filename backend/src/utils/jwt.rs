//! JWT token utilities for authentication and authorization.
//!
//! Provides secure token creation, validation, and claims management for
//! user authentication and role checks.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::errors::ServiceError;

/// The single role granted at registration and required by the API role gate.
pub const ROLE_REGULAR_USER: &str = "REGULAR_USER";

/// JWT Claims structure containing user authentication data
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// User ID
    pub sub: String,
    /// User role
    pub role: String,
    /// Token expiration timestamp
    pub exp: usize,
    /// Token issued at timestamp
    pub iat: usize,
}

/// JWT token utility for creating and validating tokens
pub struct JwtUtils {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expires_in_seconds: u64,
}

impl JwtUtils {
    /// Create a new JwtUtils instance with keys derived from the passed-in
    /// configuration.
    pub fn new(config: &Config) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;

        JwtUtils {
            encoding_key,
            decoding_key,
            validation,
            expires_in_seconds: config.jwt_expires_in_seconds,
        }
    }

    /// Generate a new JWT token for the given user and role
    pub fn generate_token(&self, user_id: String, role: String) -> Result<String, ServiceError> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.expires_in_seconds as i64);

        let claims = Claims {
            sub: user_id,
            role,
            exp: exp.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| ServiceError::internal_error(format!("Token generation failed: {}", e)))
    }

    /// Validate and decode a JWT token
    pub fn validate_token(&self, token: &str) -> Result<Claims, ServiceError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| ServiceError::validation(format!("Token validation failed: {}", e)))
    }

    /// Token lifetime in seconds, as configured
    pub fn expires_in_seconds(&self) -> u64 {
        self.expires_in_seconds
    }
}

impl Claims {
    pub fn user_id(&self) -> &str {
        &self.sub
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    /// Check if user has specific role
    pub fn has_role(&self, role: &str) -> bool {
        self.role == role
    }

    /// Check if the caller holds the regular-user role
    pub fn is_regular_user(&self) -> bool {
        self.has_role(ROLE_REGULAR_USER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            database_url: "sqlite::memory:".to_string(),
            max_connections: 1,
            acquire_timeout_seconds: 3,
            jwt_secret: "unit-test-secret".to_string(),
            jwt_expires_in_seconds: 3600,
            server_port: 0,
            max_page_size: 100,
        }
    }

    #[test]
    fn token_round_trip_preserves_claims() {
        let jwt_utils = JwtUtils::new(&test_config());
        let token = jwt_utils
            .generate_token("user-1".to_string(), ROLE_REGULAR_USER.to_string())
            .unwrap();

        let claims = jwt_utils.validate_token(&token).unwrap();
        assert_eq!(claims.user_id(), "user-1");
        assert!(claims.is_regular_user());
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let jwt_utils = JwtUtils::new(&test_config());
        let mut other_config = test_config();
        other_config.jwt_secret = "a-different-secret".to_string();
        let other = JwtUtils::new(&other_config);

        let token = other
            .generate_token("user-1".to_string(), ROLE_REGULAR_USER.to_string())
            .unwrap();
        assert!(jwt_utils.validate_token(&token).is_err());
    }
}
