//! CORS configuration
//!
//! Cross-origin access is allowed for exactly one configured origin.

use axum::http::{header, header::InvalidHeaderValue, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::api::server_config::CORS_MAX_AGE;

/// Build the CORS layer for a single allowed origin.
///
/// # Errors
/// Fails if `cors_origin` is not a valid header value.
pub fn create_cors_layer(cors_origin: &str) -> Result<CorsLayer, InvalidHeaderValue> {
    let origin = HeaderValue::from_str(cors_origin.trim())?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::exact(origin))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
        .max_age(CORS_MAX_AGE))
}
