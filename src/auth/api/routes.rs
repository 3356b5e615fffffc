//! API routes

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::auth::AuthService;
use super::handlers;

/// Authentication routes, mounted under `/auth`
pub fn create_auth_routes(service: Arc<AuthService>) -> Router {
    Router::new()
        .route("/auth/signup", post(handlers::signup))
        .route("/auth/login", post(handlers::login))
        .route("/auth/me", get(handlers::me))
        .with_state(service)
}
