use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use service_core::error::AppError;

use crate::services::JwtService;

/// Middleware to require a valid bearer token on the wrapped routes.
///
/// Only mounted when auth is enabled in config; health endpoints are never
/// wrapped.
pub async fn require_auth(
    State(jwt): State<JwtService>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    let token = match token {
        Some(token) => token,
        None => {
            return Err(AppError::Unauthorized(anyhow::anyhow!(
                "Missing or invalid Authorization header"
            )));
        }
    };

    let claims = match jwt.validate_access_token(token) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::debug!(error = %e, "Rejected bearer token");
            return Err(AppError::Unauthorized(anyhow::anyhow!(
                "Invalid or expired token"
            )));
        }
    };

    tracing::debug!(sub = %claims.sub, "Authenticated request");

    // Store claims in request extensions so handlers can access them
    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}
