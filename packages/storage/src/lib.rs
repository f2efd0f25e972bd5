// ABOUTME: Data layer for named option records
// ABOUTME: Provides the option store trait plus SQLite and in-memory backends

pub mod error;
pub mod memory;
pub mod options;
pub mod sqlite;

// Re-export main types
pub use error::{StorageError, StorageResult};
pub use memory::MemoryOptionStore;
pub use options::{validate_option_name, OptionSanitizer, OptionStore, MAX_OPTION_NAME_LEN};
pub use sqlite::SqliteOptionStore;
