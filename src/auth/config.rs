//! Authentication configuration

use anyhow::{anyhow, bail, Context, Result};
use std::fmt;
use std::str::FromStr;

/// Default access token lifetime (seconds)
pub const DEFAULT_TOKEN_EXPIRY: u64 = 3600;

/// Longest accepted token lifetime (seconds), one year
pub const MAX_TOKEN_EXPIRY: u64 = 365 * 24 * 60 * 60;

/// Default bcrypt work factor
pub const DEFAULT_BCRYPT_COST: u32 = 10;

/// Authentication configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// HS256 signing key
    pub jwt_secret: String,

    /// Token lifetime (seconds)
    pub token_expiry: u64,

    /// Password hashing
    pub password: PasswordConfig,
}

// Hand-written so the signing key never reaches a log line.
impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"<redacted>")
            .field("token_expiry", &self.token_expiry)
            .field("password", &self.password)
            .finish()
    }
}

/// Password hashing configuration
#[derive(Debug, Clone, PartialEq)]
pub struct PasswordConfig {
    /// Algorithm used for new hashes
    pub algorithm: PasswordAlgorithm,

    /// bcrypt cost
    pub bcrypt_cost: u32,
}

/// Hash algorithm for newly stored passwords
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PasswordAlgorithm {
    #[default]
    Bcrypt,
    Argon2,
}

impl FromStr for PasswordAlgorithm {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bcrypt" => Ok(Self::Bcrypt),
            "argon2" | "argon2id" => Ok(Self::Argon2),
            other => Err(anyhow!("unsupported password algorithm: {}", other)),
        }
    }
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            algorithm: PasswordAlgorithm::Bcrypt,
            bcrypt_cost: DEFAULT_BCRYPT_COST,
        }
    }
}

impl AuthConfig {
    /// Config with the given key and default everything else.
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            token_expiry: DEFAULT_TOKEN_EXPIRY,
            password: PasswordConfig::default(),
        }
    }

    /// Load from environment variables.
    ///
    /// `JWT_SECRET` is required; `TOKEN_EXPIRY`, `PASSWORD_ALGORITHM` and
    /// `BCRYPT_COST` are optional.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let jwt_secret = lookup("JWT_SECRET").context("JWT_SECRET must be set")?;

        let token_expiry = match lookup("TOKEN_EXPIRY") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("TOKEN_EXPIRY is not a number: {}", raw))?,
            None => DEFAULT_TOKEN_EXPIRY,
        };
        if token_expiry == 0 || token_expiry > MAX_TOKEN_EXPIRY {
            bail!(
                "TOKEN_EXPIRY must be between 1 and {} seconds, got {}",
                MAX_TOKEN_EXPIRY,
                token_expiry
            );
        }

        Ok(Self {
            jwt_secret,
            token_expiry,
            password: PasswordConfig::from_lookup(&lookup)?,
        })
    }
}

impl PasswordConfig {
    fn from_lookup<F>(lookup: &F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let algorithm = match lookup("PASSWORD_ALGORITHM") {
            Some(raw) => raw.parse()?,
            None => PasswordAlgorithm::default(),
        };

        let bcrypt_cost = match lookup("BCRYPT_COST") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("BCRYPT_COST is not a number: {}", raw))?,
            None => DEFAULT_BCRYPT_COST,
        };
        if !(4..=31).contains(&bcrypt_cost) {
            bail!("BCRYPT_COST must be between 4 and 31, got {}", bcrypt_cost);
        }

        Ok(Self {
            algorithm,
            bcrypt_cost,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config =
            AuthConfig::from_lookup(lookup_from(&[("JWT_SECRET", "k")])).unwrap();
        assert_eq!(config.token_expiry, DEFAULT_TOKEN_EXPIRY);
        assert_eq!(config.password, PasswordConfig::default());
    }

    #[test]
    fn test_missing_secret() {
        assert!(AuthConfig::from_lookup(lookup_from(&[])).is_err());
    }

    #[test]
    fn test_overrides() {
        let config = AuthConfig::from_lookup(lookup_from(&[
            ("JWT_SECRET", "k"),
            ("TOKEN_EXPIRY", "600"),
            ("PASSWORD_ALGORITHM", "Argon2"),
            ("BCRYPT_COST", "12"),
        ]))
        .unwrap();

        assert_eq!(config.token_expiry, 600);
        assert_eq!(config.password.algorithm, PasswordAlgorithm::Argon2);
        assert_eq!(config.password.bcrypt_cost, 12);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(AuthConfig::from_lookup(lookup_from(&[
            ("JWT_SECRET", "k"),
            ("BCRYPT_COST", "99"),
        ]))
        .is_err());
        assert!(AuthConfig::from_lookup(lookup_from(&[
            ("JWT_SECRET", "k"),
            ("PASSWORD_ALGORITHM", "md5"),
        ]))
        .is_err());
        assert!(AuthConfig::from_lookup(lookup_from(&[
            ("JWT_SECRET", "k"),
            ("TOKEN_EXPIRY", "0"),
        ]))
        .is_err());
    }

    #[test]
    fn test_rejects_oversized_token_expiry() {
        assert!(AuthConfig::from_lookup(lookup_from(&[
            ("JWT_SECRET", "k"),
            ("TOKEN_EXPIRY", "18446744073709551615"),
        ]))
        .is_err());

        let max = MAX_TOKEN_EXPIRY.to_string();
        let config =
            AuthConfig::from_lookup(lookup_from(&[("JWT_SECRET", "k"), ("TOKEN_EXPIRY", max.as_str())]))
                .unwrap();
        assert_eq!(config.token_expiry, MAX_TOKEN_EXPIRY);
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = AuthConfig::new("super-private-signing-key-material");
        let printed = format!("{:?}", config);
        assert!(!printed.contains("super-private"));
    }
}
