//! Shared helpers for integration tests
#![allow(dead_code)]

use axum::Router;
use ecobazaar_auth::api::server::{build_auth_service, AuthServer};
use ecobazaar_auth::auth::{
    config::{PasswordAlgorithm, PasswordConfig},
    AuthConfig, AuthService, MemoryStorage, UserStorage,
};
use std::sync::Arc;

pub const TEST_JWT_KEY: &str = "mY$uP3r$tr0nG_jWt_k3Y_f0r_t3sting!@#";
pub const TEST_ORIGIN: &str = "http://localhost:5173";

/// Config with a fast bcrypt cost
pub fn test_auth_config() -> AuthConfig {
    AuthConfig {
        jwt_secret: TEST_JWT_KEY.to_string(),
        token_expiry: 3600,
        password: PasswordConfig {
            algorithm: PasswordAlgorithm::Bcrypt,
            bcrypt_cost: 4,
        },
    }
}

pub fn test_service(storage: Arc<dyn UserStorage>) -> Arc<AuthService> {
    Arc::new(build_auth_service(&test_auth_config(), storage).expect("Failed to build service"))
}

/// Full router over a fresh in-memory store
pub fn create_test_router() -> (Router, MemoryStorage) {
    let storage = MemoryStorage::new();
    let server = AuthServer::with_service(
        test_service(Arc::new(storage.clone())),
        "127.0.0.1".to_string(),
        0,
        TEST_ORIGIN.to_string(),
    );
    (server.create_router().expect("Failed to build router"), storage)
}
