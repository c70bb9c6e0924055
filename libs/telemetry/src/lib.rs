//! Logging setup shared by presence binaries.
//! Libraries only emit `tracing` events; hosts and tools call [`install`] once at startup.

use anyhow::Result;

mod config;
mod tracing_init;

pub use config::{DEFAULT_FILTER, LogFormat, TelemetryConfig};
pub use tracing_init::{init_tracing, tracing_initialised};

/// Installs the subscriber configured from `RUST_LOG`, `LOG_FORMAT` and
/// `PRESENCE_SERVICE_NAME`.
pub fn install(service_name: &str, service_version: &str) -> Result<()> {
    init_tracing(&TelemetryConfig::from_env(service_name, service_version))
}
