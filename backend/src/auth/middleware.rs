//! Middleware for protecting authenticated routes and handling authorization.
//!
//! This module contains logic for validating authentication tokens and
//! enforcing the role requirement across the API endpoints. Both stages
//! consult the same declarative exemption table: the two open-access routes
//! (registration and session creation) pass through untouched, every other
//! route under the API prefix requires a verified, role-qualified caller
//! before any handler logic runs.

use crate::config::Config;
use crate::utils::jwt::{JwtUtils, ROLE_REGULAR_USER};
use axum::{
    extract::{OriginalUri, Request},
    http::{Method, StatusCode, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};

/// Routes reachable without a verified caller identity, by exact method and
/// path.
const OPEN_ROUTES: &[(Method, &str)] = &[
    (Method::POST, "/api/v1/users"),
    (Method::POST, "/api/v1/sessions"),
];

fn is_open_route(method: &Method, path: &str) -> bool {
    OPEN_ROUTES
        .iter()
        .any(|(open_method, open_path)| open_method == method && *open_path == path)
}

/// The request path as the client sent it, regardless of router nesting.
fn request_path(request: &Request) -> &str {
    request
        .extensions()
        .get::<OriginalUri>()
        .map(|uri| uri.0.path())
        .unwrap_or_else(|| request.uri().path())
}

/// JWT authentication middleware.
///
/// Skipped for open-access routes; otherwise the decoded claims are added to
/// the request extensions for use in handlers.
pub async fn require_auth(mut request: Request, next: Next) -> Result<Response, StatusCode> {
    if is_open_route(request.method(), request_path(&request)) {
        return Ok(next.run(request).await);
    }

    // Extract Authorization header
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .ok_or(StatusCode::UNAUTHORIZED)?;

    // Check if it's a Bearer token
    if !auth_header.starts_with("Bearer ") {
        return Err(StatusCode::UNAUTHORIZED);
    }

    let token = &auth_header[7..]; // Remove "Bearer " prefix

    let config = request
        .extensions()
        .get::<Config>()
        .cloned()
        .ok_or(StatusCode::INTERNAL_SERVER_ERROR)?;
    let jwt_utils = JwtUtils::new(&config);

    match jwt_utils.validate_token(token) {
        Ok(claims) => {
            request.extensions_mut().insert(claims);
            Ok(next.run(request).await)
        }
        Err(_) => Err(StatusCode::UNAUTHORIZED),
    }
}

/// Role authorization middleware.
///
/// Skipped for open-access routes; otherwise requires the claims set by
/// `require_auth` to carry the regular-user role.
pub async fn require_regular_user(request: Request, next: Next) -> Result<Response, StatusCode> {
    if is_open_route(request.method(), request_path(&request)) {
        return Ok(next.run(request).await);
    }

    let claims = request
        .extensions()
        .get::<crate::utils::jwt::Claims>()
        .ok_or(StatusCode::UNAUTHORIZED)?;

    if !claims.has_role(ROLE_REGULAR_USER) {
        return Err(StatusCode::FORBIDDEN);
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_registration_and_session_creation_are_open() {
        assert!(is_open_route(&Method::POST, "/api/v1/users"));
        assert!(is_open_route(&Method::POST, "/api/v1/sessions"));

        // Same paths with other methods stay protected
        assert!(!is_open_route(&Method::GET, "/api/v1/users"));
        assert!(!is_open_route(&Method::DELETE, "/api/v1/sessions"));

        // Everything else stays protected
        assert!(!is_open_route(&Method::POST, "/api/v1/accounts"));
        assert!(!is_open_route(&Method::POST, "/api/v1/users/extra"));
        assert!(!is_open_route(&Method::POST, "/users"));
    }
}
