//! Session-scoped key-value storage.
//!
//! The cart is persisted as a single string under a fixed key. Production
//! code stores it in the request's `tower-sessions` session, whose cookie
//! ends with the browser session.

use std::future::Future;

use thiserror::Error;
use tower_sessions::Session;

/// Errors from the session storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The session backend failed to load or save.
    #[error("session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// The cart could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// String key-value storage scoped to one browser session.
pub trait SessionStorage: Send + Sync {
    /// Read the value stored under `key`.
    fn get(&self, key: &str)
    -> impl Future<Output = Result<Option<String>, StorageError>> + Send;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: String)
    -> impl Future<Output = Result<(), StorageError>> + Send;
}

impl SessionStorage for Session {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(Self::get::<String>(self, key).await?)
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        Ok(self.insert(key, value).await?)
    }
}

/// In-memory storage for unit tests.
#[cfg(test)]
pub mod memory {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex, PoisonError};

    use super::{SessionStorage, StorageError};

    /// Shared in-memory map; clones see the same data, like two page loads
    /// in one browser tab.
    #[derive(Clone, Default)]
    pub struct MemoryStorage {
        values: Arc<Mutex<HashMap<String, String>>>,
        writes: Arc<Mutex<usize>>,
    }

    impl MemoryStorage {
        pub fn with_value(key: &str, value: &str) -> Self {
            let storage = Self::default();
            storage
                .values
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .insert(key.to_string(), value.to_string());
            storage
        }

        /// Number of `set` calls so far.
        pub fn writes(&self) -> usize {
            *self.writes.lock().unwrap_or_else(PoisonError::into_inner)
        }

        pub fn raw(&self, key: &str) -> Option<String> {
            self.values
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .get(key)
                .cloned()
        }
    }

    impl SessionStorage for MemoryStorage {
        async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            Ok(self.raw(key))
        }

        async fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
            self.values
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .insert(key.to_string(), value);
            *self.writes.lock().unwrap_or_else(PoisonError::into_inner) += 1;
            Ok(())
        }
    }
}
