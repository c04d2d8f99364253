//! OpenAPI documentation configuration.
//!
//! Defines the OpenAPI spec for the upload gateway. The rendered
//! documentation is served at `/docs`.

use utoipa::OpenApi;

use crate::api;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::handlers::uploads::create_presigned_upload_url,
        api::handlers::health::health_check,
    ),
    components(
        schemas(
            api::models::uploads::PresignedUrlRequest,
            api::models::uploads::PresignedUrlResponse,
            api::models::health::HealthResponse,
            crate::errors::ErrorResponse,
        )
    ),
    tags(
        (name = "uploads", description = "Generate presigned URLs for direct-to-storage uploads.

Clients request a URL here, then PUT the file bytes straight to object storage. The gateway never sees file content."),
        (name = "health", description = "Service liveness."),
    ),
    info(
        title = "Upload Gateway API",
        version = "1.0.0",
        description = "Backend for direct-to-storage file uploads.

Request a presigned URL with the target bucket, object key, and content type. The returned URL accepts a single `PUT` of the file bytes, with the `Content-Type` header matching the requested type, until it expires.",
    ),
)]
pub struct ApiDoc;
