//! Application configuration management.
//!
//! Configuration is loaded from a YAML file with environment variable overrides. The configuration
//! file path defaults to `config.yaml` but can be specified via `-f` flag or `UPGATE_CONFIG`
//! environment variable.
//!
//! ## Loading Priority
//!
//! Configuration sources are merged in the following order (later sources override earlier ones):
//!
//! 1. **YAML config file** - Base configuration (default: `config.yaml`)
//! 2. **Environment variables** - Variables prefixed with `UPGATE_` override YAML values
//! 3. **AWS credential variables** - `AWS_ACCESS_KEY_ID` and `AWS_SECRET_ACCESS_KEY` override
//!    `storage.access_key_id` and `storage.secret_access_key` if set
//!
//! For nested config values, use double underscores in environment variables. For example,
//! `UPGATE_STORAGE__REGION=eu-west-2` sets the `storage.region` field.
//!
//! ## Usage
//!
//! ```no_run
//! use clap::Parser;
//! use upgate::config::{Args, Config};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Parse CLI arguments
//! let args = Args::parse();
//!
//! // Load configuration from file and environment
//! let config = Config::load(&args)?;
//!
//! println!("Server will bind to {}:{}", config.host, config.port);
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment Variable Examples
//!
//! ```bash
//! # Override server port
//! UPGATE_PORT=8080
//!
//! # Set signing credentials (preferred method)
//! AWS_ACCESS_KEY_ID="AKIA..."
//! AWS_SECRET_ACCESS_KEY="..."
//!
//! # Or use the prefixed forms
//! UPGATE_STORAGE__ACCESS_KEY_ID="AKIA..."
//! UPGATE_STORAGE__SECRET_ACCESS_KEY="..."
//!
//! # Point at an S3-compatible store
//! UPGATE_STORAGE__ENDPOINT="https://objectstore.example.net"
//! UPGATE_STORAGE__FORCE_PATH_STYLE=true
//! ```

use clap::Parser;
use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::errors::Error;

/// Simple CLI args - just for specifying config file
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to configuration file
    #[arg(short = 'f', long, env = "UPGATE_CONFIG", default_value = "config.yaml")]
    pub config: String,

    /// Validate configuration and exit without starting the server.
    /// Useful for CI/CD pipelines to catch config errors before deployment.
    #[arg(long)]
    pub validate: bool,
}

/// Main application configuration.
///
/// This is the root configuration structure loaded from YAML and environment variables.
/// All fields have sensible defaults defined in the `Default` implementation, except the
/// signing credentials which must be supplied.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// HTTP server host to bind to (e.g., "0.0.0.0" for all interfaces)
    pub host: String,
    /// HTTP server port to bind to
    pub port: u16,
    /// Object storage signing configuration
    pub storage: StorageConfig,
    /// CORS configuration for browser clients
    pub cors: CorsConfig,
}

/// Object storage signing configuration.
///
/// These values configure the S3 client that signs upload URLs. Signing is a purely
/// local computation, so no connection is made to the endpoint at startup.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageConfig {
    /// Access key ID for signing. Also settable via `AWS_ACCESS_KEY_ID`.
    pub access_key_id: String,
    /// Secret access key for signing. Also settable via `AWS_SECRET_ACCESS_KEY`.
    pub secret_access_key: String,
    /// Region embedded in the signature (e.g., "us-east-1")
    pub region: String,
    /// Custom endpoint URL for S3-compatible stores (MinIO, Ceph, E2E, etc.).
    /// When unset, the SDK's default AWS endpoint resolution applies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<Url>,
    /// Use path-style addressing (`endpoint/bucket/key`) instead of virtual-hosted
    /// style. Most S3-compatible stores require this.
    pub force_path_style: bool,
}

/// CORS (Cross-Origin Resource Sharing) configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct CorsConfig {
    /// Allowed origins for CORS requests
    pub allowed_origins: Vec<CorsOrigin>,
    /// Allow credentials (cookies) in CORS requests
    pub allow_credentials: bool,
    /// Cache preflight requests for this many seconds
    pub max_age: Option<u64>,
}

/// CORS origin specification.
///
/// Can be either a wildcard (`*`) to allow all origins, or a specific URL.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum CorsOrigin {
    /// Allow all origins (`*`)
    #[serde(deserialize_with = "parse_wildcard")]
    Wildcard,
    /// Specific origin URL (e.g., `https://app.example.com`)
    #[serde(deserialize_with = "parse_url")]
    Url(Url),
}

fn parse_wildcard<'de, D>(deserializer: D) -> Result<(), D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: String = Deserialize::deserialize(deserializer)?;
    if s == "*" {
        Ok(())
    } else {
        Err(serde::de::Error::custom("Expected '*'"))
    }
}

fn parse_url<'de, D>(deserializer: D) -> Result<Url, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: String = Deserialize::deserialize(deserializer)?;
    Url::parse(&s).map_err(serde::de::Error::custom)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            storage: StorageConfig::default(),
            cors: CorsConfig::default(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            access_key_id: String::new(),
            secret_access_key: String::new(),
            region: "us-east-1".to_string(),
            endpoint: None,
            force_path_style: false,
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            // Uploads are requested directly from browser clients, so default to permissive
            allowed_origins: vec![CorsOrigin::Wildcard],
            allow_credentials: false,
            max_age: Some(3600), // Cache preflight for 1 hour
        }
    }
}

impl Config {
    pub fn load(args: &Args) -> Result<Self, figment::Error> {
        let config: Self = Self::figment(args).extract()?;
        config.validate().map_err(|e| figment::Error::from(e.to_string()))?;
        Ok(config)
    }

    pub fn figment(args: &Args) -> Figment {
        Figment::new()
            // Load base config file
            .merge(Yaml::file(&args.config))
            // Environment variables can still override specific values
            .merge(Env::prefixed("UPGATE_").split("__"))
            // Common AWS credential variables map onto the storage section
            .merge(
                Env::raw()
                    .only(&["AWS_ACCESS_KEY_ID"])
                    .map(|_| "storage.access_key_id".into())
                    .split("."),
            )
            .merge(
                Env::raw()
                    .only(&["AWS_SECRET_ACCESS_KEY"])
                    .map(|_| "storage.secret_access_key".into())
                    .split("."),
            )
    }

    /// Validate the configuration for consistency and required fields
    pub fn validate(&self) -> Result<(), Error> {
        if self.storage.access_key_id.is_empty() {
            return Err(Error::Internal {
                operation: "Config validation: storage.access_key_id is not configured. \
                 Please set the AWS_ACCESS_KEY_ID environment variable or add storage.access_key_id to the config file."
                    .to_string(),
            });
        }

        if self.storage.secret_access_key.is_empty() {
            return Err(Error::Internal {
                operation: "Config validation: storage.secret_access_key is not configured. \
                 Please set the AWS_SECRET_ACCESS_KEY environment variable or add storage.secret_access_key to the config file."
                    .to_string(),
            });
        }

        if self.storage.region.is_empty() {
            return Err(Error::Internal {
                operation: "Config validation: storage.region cannot be empty.".to_string(),
            });
        }

        // Validate CORS configuration
        if self.cors.allowed_origins.is_empty() {
            return Err(Error::Internal {
                operation: "Config validation: CORS allowed_origins cannot be empty. Add at least one allowed origin.".to_string(),
            });
        }

        // Validate that wildcard is not used with credentials
        let has_wildcard = self.cors.allowed_origins.iter().any(|origin| matches!(origin, CorsOrigin::Wildcard));
        if has_wildcard && self.cors.allow_credentials {
            return Err(Error::Internal {
                operation: "Config validation: CORS cannot use wildcard origin '*' with allow_credentials=true. Specify explicit origins."
                    .to_string(),
            });
        }

        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
