//! In-memory storage (development and tests)

use async_trait::async_trait;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use super::r#trait::UserStorage;
use crate::auth::{errors::AuthError, types::User};
use crate::utils::anonymize_email;

/// In-memory storage
#[derive(Clone, Default)]
pub struct MemoryStorage {
    /// email -> User
    users: Arc<RwLock<HashMap<String, User>>>,
}

impl MemoryStorage {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStorage for MemoryStorage {
    async fn save_user(&self, user: User) -> Result<User, AuthError> {
        let mut users = self.users.write().await;

        match users.entry(user.email.clone()) {
            Entry::Occupied(_) => Err(AuthError::EmailExists),
            Entry::Vacant(slot) => {
                debug!("user saved to memory storage: email={}", anonymize_email(&user.email));
                Ok(slot.insert(user).clone())
            }
        }
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
        let users = self.users.read().await;
        Ok(users.get(email).cloned())
    }

    async fn list_users(&self) -> Result<Vec<User>, AuthError> {
        let users = self.users.read().await;
        Ok(users.values().cloned().collect())
    }
}
