//! S3-backed upload store.

use async_trait::async_trait;
use aws_sdk_s3::presigning::PresigningConfig;

use super::{Result, StorageError, UPLOAD_URL_TTL, UploadGrant, UploadStore};

/// Upload store issuing presigned PUT URLs against an S3 bucket.
///
/// Credentials and endpoint resolution follow the standard AWS SDK chain
/// (environment, shared profile, instance metadata).
pub struct S3UploadStore {
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl S3UploadStore {
    pub fn new(sdk_config: &aws_config::SdkConfig, bucket: String) -> Self {
        Self {
            client: aws_sdk_s3::Client::new(sdk_config),
            bucket,
        }
    }
}

#[async_trait]
impl UploadStore for S3UploadStore {
    async fn presign_put(&self, key: &str, content_type: &str) -> Result<UploadGrant> {
        let presigning = PresigningConfig::expires_in(UPLOAD_URL_TTL)
            .map_err(|e| StorageError::Presign(format!("invalid presigning configuration: {e}")))?;

        let presigned = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .presigned(presigning)
            .await
            .map_err(|e| StorageError::Presign(e.to_string()))?;

        Ok(UploadGrant {
            bucket: self.bucket.clone(),
            key: key.to_string(),
            upload_url: presigned.uri().to_string(),
        })
    }
}
