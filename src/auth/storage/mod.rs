//! Storage abstraction
//!
//! User records live behind [`UserStorage`]; the memory backend serves tests
//! and throwaway runs, SQLite serves everything else.

pub mod r#trait;
pub mod memory;
pub mod sqlite;

pub use r#trait::UserStorage;
pub use memory::MemoryStorage;
pub use sqlite::SqliteStorage;
