//! Authentication types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::auth::errors::AuthError;

/// Stored user record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    /// User ID (UUID v4)
    pub id: String,
    /// Email, the unique key. Case-sensitive, stored as submitted.
    pub email: String,
    /// Salted password hash. Never sent to clients.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// Role
    pub role: Role,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Build a fresh record for signup.
    pub fn new(email: impl Into<String>, password_hash: impl Into<String>, role: Role) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            email: email.into(),
            password_hash: password_hash.into(),
            role,
            created_at: Utc::now(),
        }
    }
}

/// User role
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    #[default]
    User,
    Seller,
    Admin,
}

impl Role {
    /// Wire form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Seller => "SELLER",
            Role::Admin => "ADMIN",
        }
    }

    /// Case-insensitive parse. Returns `None` for unknown names.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USER" => Some(Role::User),
            "SELLER" => Some(Role::Seller),
            "ADMIN" => Some(Role::Admin),
            _ => None,
        }
    }

    /// Resolve the optional role field of a signup request.
    ///
    /// Absent or blank falls back to [`Role::User`]; anything else must be a
    /// known role name.
    pub fn from_request(value: Option<&str>) -> Result<Self, AuthError> {
        match value.map(str::trim) {
            None | Some("") => Ok(Role::default()),
            Some(name) => Role::parse(name)
                .ok_or_else(|| AuthError::InvalidInput(format!("Unknown role: {}", name))),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Signup request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub role: Option<String>,
}

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Result of a signup that did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignupOutcome {
    /// A new user was stored
    Created,
    /// The email is already taken; nothing was written
    UserAlreadyExists,
}

impl SignupOutcome {
    /// Plain-text body returned by `POST /auth/signup`.
    pub fn message(&self) -> &'static str {
        match self {
            SignupOutcome::Created => "Signup successful",
            SignupOutcome::UserAlreadyExists => "User already exists",
        }
    }
}

/// `GET /auth/me` response
#[derive(Debug, Serialize, Deserialize)]
pub struct MeResponse {
    pub email: String,
    pub role: Role,
}

impl From<User> for MeResponse {
    fn from(user: User) -> Self {
        Self {
            email: user.email,
            role: user.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(None => Role::User ; "absent")]
    #[test_case(Some("") => Role::User ; "empty")]
    #[test_case(Some("   ") => Role::User ; "blank")]
    #[test_case(Some("USER") => Role::User ; "user")]
    #[test_case(Some("seller") => Role::Seller ; "lower case seller")]
    #[test_case(Some(" Admin ") => Role::Admin ; "padded admin")]
    fn test_role_from_request(value: Option<&str>) -> Role {
        Role::from_request(value).unwrap()
    }

    #[test]
    fn test_unknown_role_rejected() {
        let err = Role::from_request(Some("superuser")).unwrap_err();
        assert!(matches!(err, AuthError::InvalidInput(_)));
    }

    #[test]
    fn test_user_serialization_hides_hash() {
        let user = User::new("a@x.com", "$2b$04$abcdefghijklmnopqrstuv", Role::User);

        let json = serde_json::to_string(&user).unwrap();
        assert!(json.contains("a@x.com"));
        assert!(json.contains("\"USER\""));
        assert!(!json.contains("$2b$"));
    }

    #[test]
    fn test_signup_request_role_optional() {
        let req: SignupRequest =
            serde_json::from_str(r#"{"email":"a@x.com","password":"pw1"}"#).unwrap();
        assert!(req.role.is_none());
    }

    #[test]
    fn test_outcome_messages() {
        assert_eq!(SignupOutcome::Created.message(), "Signup successful");
        assert_eq!(SignupOutcome::UserAlreadyExists.message(), "User already exists");
    }
}
