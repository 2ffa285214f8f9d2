//! Core business logic for the authentication system.

use crate::auth::models::{LoginRequest, LoginResponse, RegisterRequest, UserInfo};
use crate::config::Config;
use crate::database::models::NewUser;
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::user_repository::UserRepository;
use crate::utils::jwt::{JwtUtils, ROLE_REGULAR_USER};
use bcrypt::{DEFAULT_COST, hash, verify};
use sqlx::SqlitePool;
use uuid::Uuid;

/// Authentication service for handling registration, login, and token generation
pub struct AuthService<'a> {
    pool: &'a SqlitePool,
    jwt_utils: JwtUtils,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService instance
    pub fn new(pool: &'a SqlitePool, config: &Config) -> Self {
        AuthService {
            pool,
            jwt_utils: JwtUtils::new(config),
        }
    }

    /// Registers a new user with the regular-user role.
    ///
    /// # Errors
    /// Returns `ServiceError` for:
    /// - Validation failures
    /// - A username that is already taken
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<UserInfo> {
        let request = request.validated()?;

        let repo = UserRepository::new(self.pool);

        if repo.username_exists(&request.username).await? {
            return Err(ServiceError::already_exists("User", &request.username));
        }

        let password_hash = Self::hash_password(&request.password)?;

        let user = repo
            .create_user(NewUser {
                id: Uuid::now_v7().to_string(),
                username: request.username,
                email: request.email,
                password_hash,
                role: ROLE_REGULAR_USER.to_string(),
            })
            .await?;

        Ok(UserInfo::from(user))
    }

    /// Authenticates a user and creates a session token.
    ///
    /// A missing user and a wrong password are indistinguishable to the
    /// caller.
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<LoginResponse> {
        let request = request.validated()?;

        let repo = UserRepository::new(self.pool);
        let user = repo
            .get_user_by_username(&request.username)
            .await?
            .ok_or_else(|| ServiceError::permission_denied("Invalid username or password"))?;

        let password_matches = verify(&request.password, &user.password_hash)
            .map_err(|e| ServiceError::internal_error(format!("Password check failed: {}", e)))?;

        if !password_matches {
            return Err(ServiceError::permission_denied(
                "Invalid username or password",
            ));
        }

        let access_token = self
            .jwt_utils
            .generate_token(user.id.clone(), user.role.clone())?;

        Ok(LoginResponse {
            access_token,
            expires_in: self.jwt_utils.expires_in_seconds(),
            user: UserInfo::from(user),
        })
    }

    /// Function to hash a password before storing in database
    fn hash_password(password: &str) -> ServiceResult<String> {
        hash(password, DEFAULT_COST)
            .map_err(|e| ServiceError::internal_error(format!("Password hashing failed: {}", e)))
    }
}
