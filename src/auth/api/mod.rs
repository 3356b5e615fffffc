//! HTTP layer for authentication

pub mod handlers;
pub mod routes;

pub use routes::create_auth_routes;
