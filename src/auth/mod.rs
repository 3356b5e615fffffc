//! User authentication
//!
//! ```text
//! auth/
//! ├── types.rs          # User, Role, request/response types
//! ├── errors.rs         # AuthError
//! ├── config.rs         # AuthConfig
//! ├── service.rs        # AuthService (signup / login)
//! ├── core/             # password hashing, token issuance
//! ├── storage/          # UserStorage trait, memory and SQLite backends
//! └── api/              # axum handlers and routes
//! ```
//!
//! Layers call downward only: API → service → core/storage.

pub mod types;
pub mod errors;
pub mod config;
pub mod service;
pub mod core;
pub mod storage;
pub mod api;

pub use types::{User, Role, SignupRequest, LoginRequest, SignupOutcome};
pub use errors::AuthError;
pub use config::AuthConfig;
pub use service::AuthService;
pub use api::create_auth_routes;
pub use storage::{UserStorage, MemoryStorage, SqliteStorage};
