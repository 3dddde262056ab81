//! In-Memory Object Storage Adapter
//!
//! Keeps uploaded objects in memory. Useful for testing and development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::ObjectStorage;

/// A stored object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// In-memory object storage.
#[derive(Debug, Clone)]
pub struct InMemoryObjectStorage {
    base_url: String,
    objects: Arc<RwLock<HashMap<String, StoredObject>>>,
    fail_uploads: Arc<RwLock<bool>>,
}

impl InMemoryObjectStorage {
    /// Create a new in-memory storage serving URLs under `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            objects: Arc::new(RwLock::new(HashMap::new())),
            fail_uploads: Arc::new(RwLock::new(false)),
        }
    }

    /// Makes every subsequent upload fail with a storage error.
    pub async fn set_failing(&self, failing: bool) {
        *self.fail_uploads.write().await = failing;
    }

    pub async fn get(&self, key: &str) -> Option<StoredObject> {
        self.objects.read().await.get(key).cloned()
    }

    /// Get the number of stored objects
    pub async fn object_count(&self) -> usize {
        self.objects.read().await.len()
    }
}

impl Default for InMemoryObjectStorage {
    fn default() -> Self {
        Self::new("http://localhost/objects")
    }
}

#[async_trait]
impl ObjectStorage for InMemoryObjectStorage {
    async fn put_object(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, DomainError> {
        if *self.fail_uploads.read().await {
            return Err(DomainError::new(
                ErrorCode::StorageError,
                format!("failed to upload {}", key),
            ));
        }

        self.objects.write().await.insert(
            key.to_string(),
            StoredObject {
                bytes,
                content_type: content_type.to_string(),
            },
        );
        Ok(format!("{}/{}", self.base_url, key))
    }
}
