//! Object storage port for uploaded images.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;

/// Stores binary objects and hands back a public URL.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Uploads `bytes` under `key` and returns the object's public URL.
    ///
    /// # Errors
    ///
    /// - `StorageError` if the upload fails
    async fn put_object(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, DomainError>;
}
