//! Defines the HTTP routes for account management.
//!
//! These routes provide endpoints for creating, listing, retrieving,
//! replacing, and deleting account records.

use super::handlers::{
    create_account, delete_account, get_account, list_accounts, update_account,
};
use axum::{
    Router,
    routing::{get, post},
};

pub fn account_router() -> Router {
    Router::new()
        .route("/", post(create_account).get(list_accounts))
        .route(
            "/{id}",
            get(get_account).put(update_account).delete(delete_account),
        )
}
