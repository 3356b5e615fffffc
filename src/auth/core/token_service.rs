//! Token service

use crate::auth::{config::MAX_TOKEN_EXPIRY, errors::AuthError};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Minimum signing key length
pub const MIN_SECRET_LEN: usize = 32;

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (email)
    pub sub: String,
    /// Expiry (Unix seconds)
    pub exp: u64,
    /// Issued at (Unix seconds)
    pub iat: u64,
}

/// Issues and checks signed identity tokens
pub trait TokenIssuer: Send + Sync {
    /// Sign a token for `subject`.
    fn generate_token(&self, subject: &str) -> Result<String, AuthError>;

    /// Check signature and expiry, returning the claims.
    fn verify_token(&self, token: &str) -> Result<Claims, AuthError>;
}

/// HS256 JWT token service
pub struct TokenService {
    /// Signing key, wiped on drop
    secret: zeroize::Zeroizing<String>,

    /// Token lifetime (seconds)
    expiry: u64,
}

impl TokenService {
    /// Create a token service.
    ///
    /// # Security
    /// - rejects keys shorter than 32 characters
    /// - rejects keys containing well-known placeholder strings
    /// - rejects a zero lifetime or one longer than [`MAX_TOKEN_EXPIRY`]
    pub fn new(secret: String, expiry: u64) -> Result<Self, AuthError> {
        if expiry == 0 || expiry > MAX_TOKEN_EXPIRY {
            return Err(AuthError::InvalidInput(format!(
                "Token expiry must be between 1 and {} seconds",
                MAX_TOKEN_EXPIRY
            )));
        }

        if secret.len() < MIN_SECRET_LEN {
            return Err(AuthError::InvalidInput(format!(
                "JWT secret must be at least {} characters",
                MIN_SECRET_LEN
            )));
        }

        const WEAK_SECRETS: &[&str] = &[
            "changeme",
            "change_me",
            "secret",
            "password",
            "12345678",
            "default",
        ];

        let lowered = secret.to_lowercase();
        if let Some(weak) = WEAK_SECRETS.iter().find(|weak| lowered.contains(*weak)) {
            return Err(AuthError::InvalidInput(format!(
                "Weak or common JWT secret detected: contains '{}'",
                weak
            )));
        }

        Ok(Self {
            secret: zeroize::Zeroizing::new(secret),
            expiry,
        })
    }

    /// Token lifetime (seconds)
    pub fn expiry(&self) -> u64 {
        self.expiry
    }
}

impl TokenIssuer for TokenService {
    fn generate_token(&self, subject: &str) -> Result<String, AuthError> {
        let now = chrono::Utc::now().timestamp().max(0) as u64;

        let exp = now
            .checked_add(self.expiry)
            .ok_or_else(|| AuthError::InternalError("Token expiry overflow".to_string()))?;

        let claims = Claims {
            sub: subject.to_string(),
            exp,
            iat: now,
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| AuthError::InternalError(format!("JWT signing failed: {}", e)))?;

        debug!("issued access token");
        Ok(token)
    }

    fn verify_token(&self, token: &str) -> Result<Claims, AuthError> {
        let validation = Validation::new(Algorithm::HS256);

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|_| AuthError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "mY$uP3r$tr0nG_jWt_k3Y_f0r_t3sting!@#";

    fn service() -> TokenService {
        TokenService::new(KEY.to_string(), 3600).expect("Failed to create TokenService")
    }

    #[test]
    fn test_token_carries_subject_and_expiry() {
        let service = service();

        let token = service.generate_token("a@x.com").unwrap();
        assert!(!token.is_empty());

        let claims = service.verify_token(&token).unwrap();
        assert_eq!(claims.sub, "a@x.com");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(
            service().verify_token("invalid"),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_rejects_other_key() {
        let other =
            TokenService::new("An0ther_Str0ng_K3y_With_Enough_Len!!".to_string(), 3600).unwrap();

        let token = other.generate_token("a@x.com").unwrap();
        assert!(matches!(
            service().verify_token(&token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_rejects_expired() {
        let service = service();
        let now = chrono::Utc::now().timestamp() as u64;
        let claims = Claims {
            sub: "a@x.com".to_string(),
            exp: now - 3600,
            iat: now - 7200,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(KEY.as_bytes()),
        )
        .unwrap();

        assert!(matches!(
            service.verify_token(&token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_rejects_out_of_range_expiry() {
        assert!(TokenService::new(KEY.to_string(), u64::MAX).is_err());
        assert!(TokenService::new(KEY.to_string(), 0).is_err());

        let longest = TokenService::new(KEY.to_string(), MAX_TOKEN_EXPIRY).unwrap();
        let claims = longest
            .verify_token(&longest.generate_token("a@x.com").unwrap())
            .unwrap();
        assert_eq!(claims.exp - claims.iat, MAX_TOKEN_EXPIRY);
    }

    #[test]
    fn test_rejects_weak_secrets() {
        assert!(TokenService::new("short".to_string(), 3600).is_err());
        assert!(TokenService::new("my-jwt-secret-that-is-long-enough-xyz".to_string(), 3600).is_err());
    }
}
