//! Logging setup.
//!
//! Library code only emits `tracing` events. Hosts that have no subscriber of
//! their own call [`init`] once at startup.

use tracing_subscriber::EnvFilter;

use crate::config::BridgeConfig;

/// Install a fmt subscriber. `RUST_LOG` wins over `default_filter`.
///
/// Returns false if a global subscriber was already installed.
pub fn init(default_filter: &str) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .try_init()
        .is_ok()
}

pub fn init_from_config(config: &BridgeConfig) -> bool {
    init(&config.log_filter)
}
