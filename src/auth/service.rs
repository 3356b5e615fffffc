//! Authentication service

use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{info, warn};

use crate::auth::{
    core::{SecretVerifier, TokenIssuer},
    errors::AuthError,
    storage::UserStorage,
    types::*,
};
use crate::utils::anonymize_email;

// Verified against when the email is unknown, so both login failures cost
// one hash check.
const TIMING_DUMMY_PASSWORD: &str = "ecobazaar-timing-dummy";

/// Signup and login over explicitly supplied collaborators
pub struct AuthService {
    storage: Arc<dyn UserStorage>,
    secrets: Arc<dyn SecretVerifier>,
    tokens: Arc<dyn TokenIssuer>,
    dummy_hash: OnceCell<String>,
}

impl AuthService {
    /// Wire the service to a store, a password hasher and a token issuer
    pub fn new(
        storage: Arc<dyn UserStorage>,
        secrets: Arc<dyn SecretVerifier>,
        tokens: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            storage,
            secrets,
            tokens,
            dummy_hash: OnceCell::new(),
        }
    }

    /// Register a user.
    ///
    /// An email that is already taken is not an error: it yields
    /// [`SignupOutcome::UserAlreadyExists`] and writes nothing.
    pub async fn signup(&self, req: SignupRequest) -> Result<SignupOutcome, AuthError> {
        if req.email.trim().is_empty() {
            return Err(AuthError::InvalidInput("Email is required".to_string()));
        }
        if req.password.is_empty() {
            return Err(AuthError::InvalidInput("Password is required".to_string()));
        }
        let role = Role::from_request(req.role.as_deref())?;

        if self.storage.find_by_email(&req.email).await?.is_some() {
            info!("signup skipped, user exists: email={}", anonymize_email(&req.email));
            return Ok(SignupOutcome::UserAlreadyExists);
        }

        let password_hash = self.encode_secret(req.password).await?;
        let user = User::new(req.email, password_hash, role);

        // The lookup above is a fast path only; a concurrent signup can still
        // win, and the store's unique key decides.
        match self.storage.save_user(user).await {
            Ok(user) => {
                info!(
                    "user created: id={}, email={}, role={}",
                    user.id,
                    anonymize_email(&user.email),
                    user.role
                );
                Ok(SignupOutcome::Created)
            }
            Err(AuthError::EmailExists) => {
                info!("signup lost race on existing email");
                Ok(SignupOutcome::UserAlreadyExists)
            }
            Err(e) => Err(e),
        }
    }

    /// Check credentials and issue a token bound to the user's email.
    pub async fn login(&self, req: LoginRequest) -> Result<String, AuthError> {
        let user = match self.storage.find_by_email(&req.email).await? {
            Some(user) => user,
            None => {
                let dummy = self.timing_dummy_hash().await?;
                self.verify_secret(req.password, dummy).await?;
                warn!("login failed, no such user: email={}", anonymize_email(&req.email));
                return Err(AuthError::UserNotFound);
            }
        };

        if !self
            .verify_secret(req.password, user.password_hash.clone())
            .await?
        {
            warn!("login failed, wrong password: email={}", anonymize_email(&req.email));
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.tokens.generate_token(&user.email)?;
        info!("login succeeded: id={}", user.id);
        Ok(token)
    }

    /// Resolve the user a token was issued to
    pub async fn current_user(&self, token: &str) -> Result<User, AuthError> {
        let claims = self.tokens.verify_token(token)?;

        self.storage
            .find_by_email(&claims.sub)
            .await?
            .ok_or(AuthError::UserNotFound)
    }

    // Hashing is CPU-bound, so it runs on the blocking pool.
    async fn encode_secret(&self, plaintext: String) -> Result<String, AuthError> {
        let secrets = self.secrets.clone();
        tokio::task::spawn_blocking(move || secrets.encode(&plaintext))
            .await
            .map_err(|e| AuthError::InternalError(format!("Hashing task failed: {}", e)))?
    }

    async fn verify_secret(&self, plaintext: String, hash: String) -> Result<bool, AuthError> {
        let secrets = self.secrets.clone();
        tokio::task::spawn_blocking(move || secrets.matches(&plaintext, &hash))
            .await
            .map_err(|e| AuthError::InternalError(format!("Verification task failed: {}", e)))?
    }

    async fn timing_dummy_hash(&self) -> Result<String, AuthError> {
        self.dummy_hash
            .get_or_try_init(|| self.encode_secret(TIMING_DUMMY_PASSWORD.to_string()))
            .await
            .cloned()
    }
}
