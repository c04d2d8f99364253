//! HTTP handlers for presigned upload URL generation.

use std::time::Duration;

use axum::{Json, extract::State};

use crate::AppState;
use crate::api::models::uploads::{PresignedUrlRequest, PresignedUrlResponse};
use crate::errors::{Error, ErrorResponse, Result};

/// How long issued upload URLs stay valid, in seconds.
pub const URL_EXPIRY_SECS: u64 = 3600;

#[utoipa::path(
    post,
    path = "/api/presigned-url",
    tag = "uploads",
    summary = "Create presigned upload URL",
    description = "Generate a time-limited URL that lets a client PUT a file directly to object \
                   storage. File bytes never pass through this service.",
    request_body = PresignedUrlRequest,
    responses(
        (status = 200, description = "Presigned URL generated", body = PresignedUrlResponse),
        (status = 400, description = "Missing required parameters", body = ErrorResponse),
        (status = 500, description = "Failed to generate presigned URL", body = ErrorResponse),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_presigned_upload_url(
    State(state): State<AppState>,
    Json(payload): Json<PresignedUrlRequest>,
) -> Result<Json<PresignedUrlResponse>> {
    // fileName is required by the contract but only the destination path names
    // the stored object, so the value is checked and otherwise unused.
    require_field(payload.file_name.as_deref())?;
    let destination_path = require_field(payload.destination_path.as_deref())?;
    let content_type = require_field(payload.content_type.as_deref())?;
    let bucket = require_field(payload.bucket.as_deref())?;

    let presigned_url = state
        .signer
        .presign_upload(bucket, destination_path, content_type, Duration::from_secs(URL_EXPIRY_SECS))
        .await?;

    Ok(Json(PresignedUrlResponse {
        presigned_url,
        bucket: bucket.to_string(),
        key: destination_path.to_string(),
        expires_in: URL_EXPIRY_SECS,
    }))
}

/// A field counts as present only when it is non-empty. Whitespace is not
/// trimmed, so a value of `" "` passes.
fn require_field(value: Option<&str>) -> Result<&str> {
    match value {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(Error::InvalidRequest),
    }
}
