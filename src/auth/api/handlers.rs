//! API request handlers

use axum::{
    extract::{Json, State},
    http::{header, HeaderMap},
};
use std::sync::Arc;
use tracing::debug;

use crate::auth::{types::*, errors::AuthError, AuthService};
use crate::utils::anonymize_email;

/// POST /auth/signup
pub async fn signup(
    State(service): State<Arc<AuthService>>,
    Json(req): Json<SignupRequest>,
) -> Result<&'static str, AuthError> {
    debug!("signup request: email={}", anonymize_email(&req.email));
    let outcome = service.signup(req).await?;
    Ok(outcome.message())
}

/// POST /auth/login
pub async fn login(
    State(service): State<Arc<AuthService>>,
    Json(req): Json<LoginRequest>,
) -> Result<String, AuthError> {
    debug!("login request: email={}", anonymize_email(&req.email));
    service.login(req).await
}

/// GET /auth/me
pub async fn me(
    State(service): State<Arc<AuthService>>,
    headers: HeaderMap,
) -> Result<Json<MeResponse>, AuthError> {
    let token = extract_bearer_token(&headers)?;
    let user = service.current_user(token).await?;
    Ok(Json(user.into()))
}

/// Pull the token out of `Authorization: Bearer <token>`
fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(AuthError::Unauthorized)
}
