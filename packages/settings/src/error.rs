// ABOUTME: Error type for club settings operations
// ABOUTME: Only infrastructure failures surface; input is sanitized, never rejected

use clubdata_storage::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Unknown field: {0}. Must be one of: phone, email, address")]
    UnknownField(String),
}

pub type SettingsResult<T> = Result<T, SettingsError>;
