//! Pluggable object storage for profile photos: a narrow store trait with
//! an S3 implementation behind it. Uploads return the stored object's URL;
//! reads go through short-lived signed URLs.

pub mod s3;

pub use s3::S3PhotoStore;

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("upload failed: {0}")]
    Upload(String),
    #[error("signing failed: {0}")]
    Sign(String),
}

/// Storage collaborator for binary photo assets.
#[async_trait]
pub trait PhotoStore: Send + Sync {
    /// Store the object and return its canonical URL.
    async fn put_photo(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<String, StorageError>;

    /// Exchange a stored URL for a time-bounded signed GET URL. The expiry
    /// is fixed when the URL is created.
    async fn signed_photo_url(&self, stored_url: &str, expires_in: Duration) -> Result<String, StorageError>;
}
