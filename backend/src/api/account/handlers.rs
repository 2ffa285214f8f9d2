//! Handler functions for account management API endpoints.
//!
//! These functions process requests for account data, interact with the
//! account service, and return account-specific information. Validation
//! failures short-circuit before any persistence call.

use crate::api::account::models::{AccountFilter, CreateAccountRequest};
use crate::api::common::{
    ApiResponse, PaginatedData, PaginationMeta, service_error_to_http,
};
use crate::config::Config;
use crate::database::models::Account;
use crate::services::account_service::AccountService;
use crate::utils::jwt::Claims;
use axum::{
    extract::{Extension, Json, Path, Query},
    http::StatusCode,
    response::Json as ResponseJson,
};
use sqlx::SqlitePool;

#[axum::debug_handler]
pub async fn create_account(
    Extension(pool): Extension<SqlitePool>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateAccountRequest>,
) -> Result<ResponseJson<ApiResponse<Account>>, (StatusCode, String)> {
    let service = AccountService::new(&pool);

    match service.create_account(claims.user_id(), payload).await {
        Ok(account) => Ok(ResponseJson(ApiResponse::success(
            account,
            "Account created successfully",
        ))),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Retrieves the caller's accounts matching the query filter.
#[axum::debug_handler]
pub async fn list_accounts(
    Extension(pool): Extension<SqlitePool>,
    Extension(config): Extension<Config>,
    Extension(claims): Extension<Claims>,
    Query(filter): Query<AccountFilter>,
) -> Result<ResponseJson<ApiResponse<PaginatedData<Account>>>, (StatusCode, String)> {
    let service = AccountService::new(&pool);

    match service
        .list_accounts(claims.user_id(), filter, &config)
        .await
    {
        Ok(listing) => {
            let pagination = PaginationMeta::new(listing.page, listing.per_page, listing.total);
            Ok(ResponseJson(ApiResponse::paginated(
                PaginatedData::new(listing.items, listing.total),
                pagination,
                "Accounts retrieved successfully",
            )))
        }
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Retrieves a single account by its identifier, scoped to the caller.
#[axum::debug_handler]
pub async fn get_account(
    Extension(pool): Extension<SqlitePool>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
) -> Result<ResponseJson<ApiResponse<Account>>, (StatusCode, String)> {
    let service = AccountService::new(&pool);

    match service.get_account(claims.user_id(), &id).await {
        Ok(account) => Ok(ResponseJson(ApiResponse::success(
            account,
            "Account retrieved successfully",
        ))),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Replaces an account in full. There are no partial-update semantics; the
/// stored record takes every field from the payload.
#[axum::debug_handler]
pub async fn update_account(
    Extension(pool): Extension<SqlitePool>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
    Json(payload): Json<CreateAccountRequest>,
) -> Result<ResponseJson<ApiResponse<Account>>, (StatusCode, String)> {
    let service = AccountService::new(&pool);

    match service.update_account(claims.user_id(), &id, payload).await {
        Ok(account) => Ok(ResponseJson(ApiResponse::success(
            account,
            "Account updated successfully",
        ))),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Deletes an account, scoped to the caller.
#[axum::debug_handler]
pub async fn delete_account(
    Extension(pool): Extension<SqlitePool>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
) -> Result<ResponseJson<ApiResponse<()>>, (StatusCode, String)> {
    let service = AccountService::new(&pool);

    match service.delete_account(claims.user_id(), &id).await {
        Ok(()) => Ok(ResponseJson(ApiResponse::success(
            (),
            "Account deleted successfully",
        ))),
        Err(error) => Err(service_error_to_http(error)),
    }
}
