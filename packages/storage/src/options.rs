// ABOUTME: Named option store contract
// ABOUTME: Get/set/delete of opaque JSON records with a sanitize hook on write

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::error::{StorageError, StorageResult};

/// Maximum length of an option name, matching the host's options table
pub const MAX_OPTION_NAME_LEN: usize = 191;

/// Transforms an untrusted value into the form that gets persisted.
///
/// The store calls this exactly once per [`OptionStore::set_named_record`]
/// before anything is written.
pub trait OptionSanitizer: Send + Sync {
    fn sanitize_option(&self, raw: &Value) -> Value;
}

impl<F> OptionSanitizer for F
where
    F: Fn(&Value) -> Value + Send + Sync,
{
    fn sanitize_option(&self, raw: &Value) -> Value {
        self(raw)
    }
}

/// Persistence for named option records.
///
/// Each name maps to at most one JSON value. Writes replace the whole value;
/// the last writer wins.
#[async_trait]
pub trait OptionStore: Send + Sync {
    /// Fetch the record stored under `name`, or `None` if it was never written.
    async fn get_option(&self, name: &str) -> StorageResult<Option<Value>>;

    /// Store `value` under `name`, replacing any previous value.
    async fn update_option(&self, name: &str, value: &Value) -> StorageResult<()>;

    /// Remove the record stored under `name`. Returns whether anything was removed.
    async fn delete_option(&self, name: &str) -> StorageResult<bool>;

    /// Sanitize `raw` with `sanitizer`, store the result and return what was stored.
    async fn set_named_record(
        &self,
        name: &str,
        raw: &Value,
        sanitizer: &dyn OptionSanitizer,
    ) -> StorageResult<Value> {
        let sanitized = sanitizer.sanitize_option(raw);
        debug!(option = %name, "Storing sanitized option");
        self.update_option(name, &sanitized).await?;
        Ok(sanitized)
    }
}

/// Reject names the options table cannot hold
pub fn validate_option_name(name: &str) -> StorageResult<()> {
    if name.trim().is_empty() {
        return Err(StorageError::InvalidInput(
            "Option name cannot be empty".to_string(),
        ));
    }

    if name.len() > MAX_OPTION_NAME_LEN {
        return Err(StorageError::InvalidInput(format!(
            "Option name exceeds maximum length of {} bytes (got {} bytes)",
            MAX_OPTION_NAME_LEN,
            name.len()
        )));
    }

    if name.contains('\0') {
        return Err(StorageError::InvalidInput(
            "Option name contains invalid null bytes".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_option_name() {
        assert!(validate_option_name("vdm_clubdata").is_ok());
        assert!(validate_option_name("").is_err());
        assert!(validate_option_name("   ").is_err());
        assert!(validate_option_name("bad\0name").is_err());
        assert!(validate_option_name(&"x".repeat(MAX_OPTION_NAME_LEN)).is_ok());
        assert!(validate_option_name(&"x".repeat(MAX_OPTION_NAME_LEN + 1)).is_err());
    }

    #[test]
    fn test_closure_sanitizer() {
        let sanitizer = |raw: &Value| -> Value {
            Value::String(raw.as_str().unwrap_or_default().trim().to_string())
        };

        let out = sanitizer.sanitize_option(&Value::String("  padded  ".to_string()));
        assert_eq!(out, Value::String("padded".to_string()));
    }
}
