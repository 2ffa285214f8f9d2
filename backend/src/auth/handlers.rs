//! Handler functions for registration and session API endpoints.
//!
//! These functions process incoming HTTP requests for user registration and
//! session creation, parse request data, and interact with the
//! `auth::service` for core business logic.

use crate::api::common::{ApiResponse, service_error_to_http};
use crate::auth::models::{LoginRequest, LoginResponse, RegisterRequest, UserInfo};
use crate::auth::service::AuthService;
use crate::config::Config;
use axum::{
    extract::{Extension, Json},
    http::StatusCode,
    response::Json as ResponseJson,
};
use sqlx::SqlitePool;

/// Handle user registration request
#[axum::debug_handler]
pub async fn register(
    Extension(pool): Extension<SqlitePool>,
    Extension(config): Extension<Config>,
    Json(payload): Json<RegisterRequest>,
) -> Result<ResponseJson<ApiResponse<UserInfo>>, (StatusCode, String)> {
    let auth_service = AuthService::new(&pool, &config);

    match auth_service.register(payload).await {
        Ok(user) => Ok(ResponseJson(ApiResponse::success(
            user,
            "User registered successfully",
        ))),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Handle session creation (login) request
#[axum::debug_handler]
pub async fn create_session(
    Extension(pool): Extension<SqlitePool>,
    Extension(config): Extension<Config>,
    Json(payload): Json<LoginRequest>,
) -> Result<ResponseJson<LoginResponse>, (StatusCode, String)> {
    let auth_service = AuthService::new(&pool, &config);

    match auth_service.login(payload).await {
        Ok(response) => Ok(ResponseJson(response)),
        Err(error) => Err(service_error_to_http(error)),
    }
}
