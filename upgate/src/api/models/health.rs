//! API response model for the health check endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Always `"OK"` while the process is able to serve requests
    #[schema(example = "OK")]
    pub status: String,
    /// Current server time (UTC, RFC 3339)
    pub timestamp: DateTime<Utc>,
}
