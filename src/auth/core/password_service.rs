//! Password hashing service

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;

use crate::auth::{
    config::{PasswordAlgorithm, PasswordConfig},
    errors::AuthError,
};

/// bcrypt only reads this many bytes of input
pub const BCRYPT_MAX_PASSWORD_BYTES: usize = 72;

/// One-way hashing and verification of user secrets
pub trait SecretVerifier: Send + Sync {
    /// Hash a plaintext secret for storage. Salted, so two calls differ.
    fn encode(&self, plaintext: &str) -> Result<String, AuthError>;

    /// Check a plaintext secret against a stored hash.
    fn matches(&self, plaintext: &str, hash: &str) -> Result<bool, AuthError>;
}

/// Password service
pub struct PasswordService {
    config: PasswordConfig,
}

impl PasswordService {
    /// Create a password service
    pub fn new(config: PasswordConfig) -> Self {
        Self { config }
    }

    fn hash_bcrypt(&self, password: &str) -> Result<String, AuthError> {
        if password.len() > BCRYPT_MAX_PASSWORD_BYTES {
            return Err(AuthError::InvalidInput(format!(
                "Password must be at most {} bytes",
                BCRYPT_MAX_PASSWORD_BYTES
            )));
        }
        bcrypt::hash(password, self.config.bcrypt_cost)
            .map_err(|e| AuthError::InternalError(format!("Password hashing failed: {}", e)))
    }

    fn hash_argon2(password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AuthError::InternalError(format!("Password hashing failed: {}", e)))
    }

    fn verify_argon2(password: &str, hash: &str) -> Result<bool, AuthError> {
        let parsed = PasswordHash::new(hash)
            .map_err(|e| AuthError::InternalError(format!("Invalid password hash: {}", e)))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}

impl SecretVerifier for PasswordService {
    fn encode(&self, plaintext: &str) -> Result<String, AuthError> {
        match self.config.algorithm {
            PasswordAlgorithm::Bcrypt => self.hash_bcrypt(plaintext),
            PasswordAlgorithm::Argon2 => Self::hash_argon2(plaintext),
        }
    }

    // The stored hash names its own algorithm, so switching the configured
    // algorithm does not lock out existing users.
    fn matches(&self, plaintext: &str, hash: &str) -> Result<bool, AuthError> {
        if hash.starts_with("$argon2") {
            Self::verify_argon2(plaintext, hash)
        } else if hash.starts_with("$2") {
            // Stored bcrypt passwords are never longer than the limit, and a
            // longer candidate would be truncated into a false match.
            if plaintext.len() > BCRYPT_MAX_PASSWORD_BYTES {
                return Ok(false);
            }
            bcrypt::verify(plaintext, hash)
                .map_err(|e| AuthError::InternalError(format!("Password verification failed: {}", e)))
        } else {
            Err(AuthError::InternalError(
                "Unrecognized password hash format".to_string(),
            ))
        }
    }
}

impl Default for PasswordService {
    fn default() -> Self {
        Self::new(PasswordConfig::default())
    }
}
