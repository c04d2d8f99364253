//! API request/response models for presigned upload URLs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// Request models

/// Request body describing an intended direct-to-storage upload.
///
/// Every field is required by the API contract, but all are declared optional
/// here: a field that is absent from the JSON body must produce the same
/// validation error as one that is present but empty, so presence is checked
/// in the handler rather than by serde.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PresignedUrlRequest {
    /// Original file name on the client (kept for client bookkeeping, not
    /// part of the generated URL)
    #[schema(example = "a.png")]
    pub file_name: Option<String>,
    /// Object key the upload will be stored under, including any prefix
    #[schema(example = "uploads/a.png")]
    pub destination_path: Option<String>,
    /// MIME type the client will send with the upload (signed into the URL)
    #[schema(example = "image/png")]
    pub content_type: Option<String>,
    /// Target bucket name
    #[schema(example = "my-bucket")]
    pub bucket: Option<String>,
}

// Response models

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PresignedUrlResponse {
    /// URL the client should PUT the file bytes to
    pub presigned_url: String,
    /// Bucket the upload targets (echoed from the request)
    pub bucket: String,
    /// Object key the upload will be stored under (echoed from `destinationPath`)
    pub key: String,
    /// Seconds until the URL expires
    #[schema(example = 3600)]
    pub expires_in: u64,
}
