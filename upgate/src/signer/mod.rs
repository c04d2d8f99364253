//! Upload signing abstraction layer
//!
//! This module defines the `UploadSigner` trait which abstracts presigned-URL
//! generation behind an object-safe seam, keeping the HTTP layer independent of
//! the storage SDK and letting tests substitute a counting or failing double.

use async_trait::async_trait;
use std::time::Duration;

pub mod s3;

pub use s3::S3Signer;

/// Result type for signer operations
pub type Result<T> = std::result::Result<T, SignerError>;

/// Errors that can occur while producing a presigned URL
#[derive(Debug, thiserror::Error)]
pub enum SignerError {
    /// The requested expiry could not be converted into a presigning configuration
    #[error("invalid presign expiry: {0}")]
    InvalidExpiry(String),

    /// The storage SDK failed to sign the request
    #[error("presigning failed: {0}")]
    Presign(String),
}

/// Abstract upload signer interface
///
/// Implementors produce time-limited PUT URLs that let clients upload directly
/// to object storage without the file bytes transiting this service.
#[async_trait]
pub trait UploadSigner: Send + Sync {
    /// Presign a PUT of `key` into `bucket` with the given content type.
    ///
    /// Signing is a local computation over the configured credentials; no
    /// request is made to the storage service.
    async fn presign_upload(&self, bucket: &str, key: &str, content_type: &str, expires_in: Duration) -> Result<String>;
}
