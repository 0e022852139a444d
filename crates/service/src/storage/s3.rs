use std::time::Duration;

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use tracing::info;

use super::{PhotoStore, StorageError};

/// S3-backed photo store. Works against AWS or any S3-compatible endpoint
/// (set `storage.endpoint` for MinIO and friends).
pub struct S3PhotoStore {
    client: aws_sdk_s3::Client,
    bucket: String,
    region: String,
}

impl S3PhotoStore {
    pub async fn from_config(cfg: &configs::StorageConfig) -> Self {
        let sdk = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(cfg.region.clone()))
            .load()
            .await;
        let mut builder = aws_sdk_s3::config::Builder::from(&sdk);
        if !cfg.endpoint.trim().is_empty() {
            builder = builder.endpoint_url(cfg.endpoint.clone()).force_path_style(true);
        }
        let client = aws_sdk_s3::Client::from_conf(builder.build());
        info!(bucket = %cfg.bucket, region = %cfg.region, "photo store ready");
        Self { client, bucket: cfg.bucket.clone(), region: cfg.region.clone() }
    }

    /// The user row stores the full object URL; signing needs the key back.
    fn object_key<'a>(&self, stored_url: &'a str) -> &'a str {
        stored_url.split(".com/").nth(1).unwrap_or(stored_url)
    }
}

#[async_trait]
impl PhotoStore for S3PhotoStore {
    async fn put_photo(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<String, StorageError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(bytes))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| StorageError::Upload(e.to_string()))?;
        Ok(format!("https://{}.s3.{}.amazonaws.com/{}", self.bucket, self.region, key))
    }

    async fn signed_photo_url(&self, stored_url: &str, expires_in: Duration) -> Result<String, StorageError> {
        let key = self.object_key(stored_url);
        let presigning = PresigningConfig::expires_in(expires_in)
            .map_err(|e| StorageError::Sign(e.to_string()))?;
        let request = self.client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(presigning)
            .await
            .map_err(|e| StorageError::Sign(e.to_string()))?;
        Ok(request.uri().to_string())
    }
}
