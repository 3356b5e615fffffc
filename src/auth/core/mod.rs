//! Core services: password hashing and token issuance

pub mod token_service;
pub mod password_service;

pub use token_service::{Claims, TokenIssuer, TokenService};
pub use password_service::{PasswordService, SecretVerifier};
