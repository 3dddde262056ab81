//! Object storage configuration (S3-compatible)

use serde::Deserialize;

use super::error::ValidationError;
use super::payment::check_url;
use super::server::Environment;
use crate::adapters::storage::S3StorageConfig;

/// Bucket and URL settings for uploaded images.
///
/// Credentials come from the standard AWS provider chain.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    pub bucket: String,

    #[serde(default = "default_region")]
    pub region: String,

    /// Custom endpoint for MinIO, R2 and friends
    #[serde(default)]
    pub endpoint_url: Option<String>,

    /// Prefix for returned object URLs
    pub public_base_url: String,

    /// Prepended to every object key
    #[serde(default)]
    pub key_prefix: String,
}

impl StorageConfig {
    pub fn validate(&self, environment: Environment) -> Result<(), ValidationError> {
        if self.bucket.trim().is_empty() {
            return Err(ValidationError::MissingRequired("STORAGE__BUCKET"));
        }
        if let Some(endpoint) = &self.endpoint_url {
            check_url("endpoint_url", endpoint, Environment::Development)?;
        }
        check_url("public_base_url", &self.public_base_url, environment)
    }

    /// Settings for the S3 adapter.
    pub fn to_s3(&self) -> S3StorageConfig {
        S3StorageConfig {
            bucket: self.bucket.clone(),
            region: self.region.clone(),
            endpoint_url: self.endpoint_url.clone(),
            public_base_url: self.public_base_url.clone(),
            key_prefix: self.key_prefix.clone(),
        }
    }
}

fn default_region() -> String {
    "us-east-1".to_string()
}
