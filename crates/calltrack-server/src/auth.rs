//! Bearer token authentication for `/api` routes
//!
//! When no key is configured every request passes.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::models::ApiError;
use crate::AppState;

/// Check `Authorization: Bearer <key>` against the configured API key
pub async fn auth_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if let Some(expected) = state.api_key.as_deref() {
        check_bearer(request.headers(), expected)?;
    }

    Ok(next.run(request).await)
}

fn check_bearer(headers: &HeaderMap, expected: &str) -> Result<(), ApiError> {
    let Some(value) = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
    else {
        tracing::warn!("Missing Authorization header");
        return Err(ApiError::unauthorized("Missing Authorization header"));
    };

    let Some(token) = value.strip_prefix("Bearer ") else {
        tracing::warn!("Invalid Authorization header format");
        return Err(ApiError::unauthorized(
            "Authorization header must be a Bearer token",
        ));
    };

    if token != expected {
        tracing::warn!("Invalid API key attempted");
        return Err(ApiError::unauthorized("Invalid API key"));
    }

    Ok(())
}
