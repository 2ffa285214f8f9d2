//! Defines the HTTP routes for registration and session creation.
//!
//! These are the only two open-access endpoints; the access-control
//! middleware lets them through by exemption. They are designed to be merged
//! into the API router.

use crate::auth::handlers::{create_session, register};
use axum::{Router, routing::post};

/// Creates the router for the open-access endpoints
pub fn auth_router() -> Router {
    Router::new()
        .route("/users", post(register))
        .route("/sessions", post(create_session))
}
