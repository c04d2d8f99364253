//! Test utilities for integration testing (available with `test-utils` feature).

#[cfg(test)]
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
#[cfg(test)]
use axum_test::TestServer;
use url::Url;

use crate::config::{Config, StorageConfig};
use crate::signer::{self, SignerError, UploadSigner};

/// A config with dummy static credentials pointing at a path-style
/// S3-compatible endpoint. Presigning is local, so the endpoint does not
/// have to exist.
pub fn create_test_config() -> Config {
    Config {
        storage: StorageConfig {
            access_key_id: "AKIATESTKEY".to_string(),
            secret_access_key: "test-secret".to_string(),
            region: "us-east-1".to_string(),
            endpoint: Some(Url::parse("https://objectstore.example.net").expect("valid test endpoint")),
            force_path_style: true,
        },
        ..Default::default()
    }
}

/// Signer double that records how often it is called and can be told to fail.
#[derive(Debug, Default)]
pub struct MockSigner {
    calls: AtomicUsize,
    fail: bool,
}

impl MockSigner {
    /// A signer that fails every request, for exercising the 500 path.
    pub fn failing() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail: true,
        }
    }

    /// Number of presign calls received so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UploadSigner for MockSigner {
    async fn presign_upload(
        &self,
        bucket: &str,
        key: &str,
        _content_type: &str,
        expires_in: Duration,
    ) -> signer::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.fail {
            return Err(SignerError::Presign("signing backend unavailable".to_string()));
        }

        Ok(format!(
            "https://objectstore.example.net/{bucket}/{key}?X-Amz-Expires={}&X-Amz-Signature=00test",
            expires_in.as_secs()
        ))
    }
}

/// Build a test server around the given signer.
#[cfg(test)]
pub fn create_test_app(signer: Arc<dyn UploadSigner>) -> TestServer {
    let state = crate::AppState::builder().config(create_test_config()).signer(signer).build();

    let router = crate::build_router(state).expect("Failed to build router");

    TestServer::new(router).expect("Failed to create test server")
}
