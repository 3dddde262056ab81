//! S3-compatible object storage adapter.
//!
//! Works with AWS S3 and with S3-compatible services (MinIO, R2, Spaces)
//! through a custom endpoint and path-style addressing.

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::error::ProvideErrorMetadata;
use aws_sdk_s3::Client as S3Client;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::ObjectStorage;

/// Settings for the S3 adapter.
#[derive(Debug, Clone)]
pub struct S3StorageConfig {
    pub bucket: String,
    pub region: String,
    /// Custom endpoint for S3-compatible services.
    pub endpoint_url: Option<String>,
    /// Base URL objects are publicly served from.
    pub public_base_url: String,
    /// Prepended to every object key.
    pub key_prefix: String,
}

/// Uploads objects to an S3 bucket.
pub struct S3ObjectStorage {
    client: S3Client,
    bucket: String,
    public_base_url: String,
    key_prefix: String,
}

impl S3ObjectStorage {
    /// Builds a client from the ambient AWS credentials chain.
    pub async fn connect(config: S3StorageConfig) -> Self {
        let shared = aws_config::load_defaults(BehaviorVersion::latest()).await;
        let mut builder = aws_sdk_s3::config::Builder::from(&shared)
            .region(Region::new(config.region.clone()))
            .force_path_style(true);
        if let Some(endpoint) = &config.endpoint_url {
            builder = builder.endpoint_url(endpoint);
        }
        let client = S3Client::from_conf(builder.build());

        Self::new(client, config)
    }

    pub fn new(client: S3Client, config: S3StorageConfig) -> Self {
        Self {
            client,
            bucket: config.bucket,
            public_base_url: config.public_base_url.trim_end_matches('/').to_string(),
            key_prefix: config.key_prefix.trim_matches('/').to_string(),
        }
    }

    fn full_key(&self, key: &str) -> String {
        let key = key.trim_start_matches('/');
        if self.key_prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}/{}", self.key_prefix, key)
        }
    }
}

#[async_trait]
impl ObjectStorage for S3ObjectStorage {
    async fn put_object(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, DomainError> {
        let full_key = self.full_key(key);
        let size = bytes.len();

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&full_key)
            .content_type(content_type)
            .body(bytes.into())
            .send()
            .await
            .map_err(|err| {
                let service_error = err.into_service_error();
                tracing::error!(
                    bucket = %self.bucket,
                    key = %full_key,
                    code = ?service_error.code(),
                    error = ?service_error,
                    "S3 put_object failed"
                );
                DomainError::new(
                    ErrorCode::StorageError,
                    format!("failed to upload {}", full_key),
                )
            })?;

        tracing::debug!(key = %full_key, size, "Uploaded object");
        Ok(format!("{}/{}", self.public_base_url, full_key))
    }
}

impl std::fmt::Debug for S3ObjectStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3ObjectStorage")
            .field("bucket", &self.bucket)
            .field("public_base_url", &self.public_base_url)
            .field("key_prefix", &self.key_prefix)
            .finish_non_exhaustive()
    }
}
