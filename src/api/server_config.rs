//! Server limits

use std::time::Duration;

/// Concurrent in-flight request limit
pub const MAX_CONCURRENCY: usize = 256;

/// Request body size limit
pub const MAX_BODY_SIZE: usize = 1024 * 1024; // 1MB

/// Per-request timeout
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// CORS preflight cache lifetime
pub const CORS_MAX_AGE: Duration = Duration::from_secs(3600);
