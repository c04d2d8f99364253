//! HTTP handler for the health check endpoint.

use axum::Json;
use chrono::Utc;

use crate::api::models::health::HealthResponse;

#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    summary = "Health check",
    description = "Report service liveness together with the current server time",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK".to_string(),
        timestamp: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use chrono::DateTime;
    use serde_json::Value;

    use crate::api::models::health::HealthResponse;
    use crate::test_utils::{MockSigner, create_test_app};

    #[test_log::test(tokio::test)]
    async fn test_health_check_returns_ok() {
        let app = create_test_app(Arc::new(MockSigner::default()));

        let response = app.get("/health").await;

        response.assert_status(StatusCode::OK);
        let body: HealthResponse = response.json();
        assert_eq!(body.status, "OK");
    }

    #[test_log::test(tokio::test)]
    async fn test_health_check_timestamp_is_rfc3339() {
        let app = create_test_app(Arc::new(MockSigner::default()));

        let response = app.get("/health").await;

        response.assert_status(StatusCode::OK);
        let json: Value = response.json();
        let timestamp = json["timestamp"].as_str().expect("timestamp should be a string");
        DateTime::parse_from_rfc3339(timestamp).expect("timestamp should parse as RFC 3339");
    }
}
