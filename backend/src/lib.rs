//! Library crate for the Rolodex backend.
//!
//! Exposes the application modules and the router assembly so the server
//! binary and the integration tests construct the exact same application.

pub mod api;
pub mod auth;
pub mod config;
pub mod database;
pub mod errors;
pub mod repositories;
pub mod services;
pub mod utils;

use crate::api::common::{ApiResponse, handle_panic};
use axum::{Extension, Router, middleware, response::Json, routing::get};
use config::Config;
use sqlx::SqlitePool;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

/// Assembles the full application router.
///
/// Everything under `/api/v1` passes through the authentication and role
/// stages; the exemption table inside the middleware lets registration and
/// session creation through. The panic boundary wraps the whole router.
pub fn app(pool: SqlitePool, config: Config) -> Router {
    let api = Router::new()
        .nest("/accounts", api::account::routes::account_router())
        .merge(auth::routes::auth_router())
        .layer(middleware::from_fn(auth::middleware::require_regular_user))
        .layer(middleware::from_fn(auth::middleware::require_auth));

    Router::new()
        .route("/", get(root_handler))
        .nest("/api/v1", api)
        .layer(Extension(pool))
        .layer(Extension(config))
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(handle_panic))
}

async fn root_handler() -> Json<ApiResponse<serde_json::Value>> {
    Json(ApiResponse::success(
        serde_json::json!({
            "service": "Rolodex Backend",
            "version": env!("CARGO_PKG_VERSION")
        }),
        "Welcome to the Rolodex API",
    ))
}
