//! S3 upload signer implementation
//!
//! Wraps the AWS SDK's SigV4 presigner. Works against AWS itself or any
//! S3-compatible store (MinIO, Ceph, E2E, ...) via a custom endpoint.

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_credential_types::Credentials;
use aws_sdk_s3::{Client, config::Region, presigning::PresigningConfig};
use std::time::Duration;

use crate::config::StorageConfig;
use crate::signer::{Result, SignerError, UploadSigner};

/// Upload signer backed by the AWS S3 SDK
#[derive(Clone)]
pub struct S3Signer {
    client: Client,
}

impl S3Signer {
    /// Build a signing client from storage configuration.
    ///
    /// The client only ever runs its presigner, so construction succeeds with
    /// any static credentials and an unreachable endpoint.
    pub async fn new(config: &StorageConfig) -> Self {
        let credentials = Credentials::new(
            config.access_key_id.clone(),
            config.secret_access_key.clone(),
            None,
            None,
            "static",
        );

        let region = Region::new(config.region.clone());

        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(region)
            .credentials_provider(credentials);

        if let Some(endpoint) = &config.endpoint {
            loader = loader.endpoint_url(endpoint.as_str());
        }

        let shared_config = loader.load().await;

        // Custom S3 endpoints (MinIO/Ceph/etc) usually require path style
        let s3_config_builder = aws_sdk_s3::config::Builder::from(&shared_config).force_path_style(config.force_path_style);

        Self {
            client: Client::from_conf(s3_config_builder.build()),
        }
    }
}

#[async_trait]
impl UploadSigner for S3Signer {
    async fn presign_upload(&self, bucket: &str, key: &str, content_type: &str, expires_in: Duration) -> Result<String> {
        let presigning_config = PresigningConfig::expires_in(expires_in).map_err(|e| SignerError::InvalidExpiry(e.to_string()))?;

        let presigned = self
            .client
            .put_object()
            .bucket(bucket)
            .key(key)
            .content_type(content_type)
            .presigned(presigning_config)
            .await
            .map_err(|e| SignerError::Presign(e.to_string()))?;

        Ok(presigned.uri().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    fn test_storage_config(force_path_style: bool) -> StorageConfig {
        StorageConfig {
            access_key_id: "AKIATESTKEY".to_string(),
            secret_access_key: "test-secret".to_string(),
            region: "us-east-1".to_string(),
            endpoint: Some(Url::parse("https://objectstore.example.net").unwrap()),
            force_path_style,
        }
    }

    // Path-style URLs put both the bucket and the key in the path
    #[tokio::test]
    async fn test_presigned_put_url_shape() {
        let signer = S3Signer::new(&test_storage_config(true)).await;

        let url = signer
            .presign_upload("my-bucket", "uploads/a.png", "image/png", Duration::from_secs(3600))
            .await
            .unwrap();

        assert!(
            url.starts_with("https://objectstore.example.net/my-bucket/uploads/a.png?"),
            "unexpected url: {url}"
        );
        assert!(url.contains("X-Amz-Expires=3600"), "unexpected url: {url}");
        assert!(url.contains("X-Amz-Signature="), "unexpected url: {url}");
    }

    // The uploader must send the same Content-Type the URL was signed for
    #[tokio::test]
    async fn test_content_type_is_signed() {
        let signer = S3Signer::new(&test_storage_config(true)).await;

        let url = signer
            .presign_upload("my-bucket", "uploads/a.png", "image/png", Duration::from_secs(3600))
            .await
            .unwrap();

        assert!(url.contains("content-type%3Bhost"), "unexpected url: {url}");
    }

    #[tokio::test]
    async fn test_default_endpoint_uses_aws() {
        let config = StorageConfig {
            endpoint: None,
            ..test_storage_config(false)
        };
        let signer = S3Signer::new(&config).await;

        let url = signer
            .presign_upload("my-bucket", "uploads/a.png", "image/png", Duration::from_secs(3600))
            .await
            .unwrap();

        assert!(url.contains("amazonaws.com"), "unexpected url: {url}");
        assert!(url.contains("my-bucket"), "unexpected url: {url}");
        assert!(url.contains("uploads/a.png"), "unexpected url: {url}");
    }

    // The SDK caps presign expiry at one week
    #[tokio::test]
    async fn test_excessive_expiry_rejected() {
        let signer = S3Signer::new(&test_storage_config(true)).await;

        let result = signer
            .presign_upload("my-bucket", "uploads/a.png", "image/png", Duration::from_secs(10_000_000))
            .await;

        assert!(matches!(result, Err(SignerError::InvalidExpiry(_))));
    }
}
