// ABOUTME: In-memory option store
// ABOUTME: Used by tests and by callers that do not need durable storage

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::error::StorageResult;
use crate::options::{validate_option_name, OptionStore};

#[derive(Default)]
pub struct MemoryOptionStore {
    options: RwLock<HashMap<String, Value>>,
}

impl MemoryOptionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store with existing records
    pub fn with_options(options: impl IntoIterator<Item = (String, Value)>) -> Self {
        Self {
            options: RwLock::new(options.into_iter().collect()),
        }
    }
}

#[async_trait]
impl OptionStore for MemoryOptionStore {
    async fn get_option(&self, name: &str) -> StorageResult<Option<Value>> {
        validate_option_name(name)?;
        Ok(self.options.read().await.get(name).cloned())
    }

    async fn update_option(&self, name: &str, value: &Value) -> StorageResult<()> {
        validate_option_name(name)?;
        self.options
            .write()
            .await
            .insert(name.to_string(), value.clone());
        Ok(())
    }

    async fn delete_option(&self, name: &str) -> StorageResult<bool> {
        validate_option_name(name)?;
        Ok(self.options.write().await.remove(name).is_some())
    }
}
