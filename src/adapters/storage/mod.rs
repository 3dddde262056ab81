//! Storage Adapters
//!
//! Implementations of the ObjectStorage port for uploaded images.
//!
//! ## Available Adapters
//!
//! - **S3ObjectStorage** - Uploads to an S3-compatible bucket
//! - **InMemoryObjectStorage** - Stores objects in memory (testing/development)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{InMemoryObjectStorage, S3ObjectStorage};
//!
//! // Production: S3 bucket
//! let storage = S3ObjectStorage::connect(config).await;
//!
//! // Testing: in-memory storage
//! let storage = InMemoryObjectStorage::new("https://cdn.test");
//! ```

mod in_memory_object_storage;
mod s3_object_storage;

pub use in_memory_object_storage::{InMemoryObjectStorage, StoredObject};
pub use s3_object_storage::{S3ObjectStorage, S3StorageConfig};
