//! Telemetry initialization (tracing, fmt subscriber, etc.)
//!
//! Log verbosity is controlled with the standard `RUST_LOG` environment variable,
//! falling back to `info` when unset. For example:
//!
//! ```bash
//! RUST_LOG=upgate=debug,tower_http=debug upgate
//! ```

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Initialize tracing with console output.
///
/// Uses `try_init` so tests that install their own subscriber don't panic.
pub fn init_telemetry() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()?;

    Ok(())
}
