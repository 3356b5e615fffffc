//! Handlers not tied to authentication

pub mod health;

pub use health::health_check;
