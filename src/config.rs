//! Bridge configuration, loaded from TOML.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Warn when an update names a prop no table registers.
    pub warn_unknown_props: bool,
    /// Space available to root elements, `[width, height]` in world units.
    pub layout_viewport: [f32; 2],
    /// `tracing` filter used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            warn_unknown_props: true,
            layout_viewport: [1.0, 1.0],
            log_filter: "warn".to_string(),
        }
    }
}

impl BridgeConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: BridgeConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Load configuration from `path`, falling back to defaults on errors.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(err) => {
                warn!("Failed to load {}: {err}. Using defaults", path.display());
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let [width, height] = self.layout_viewport;
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "layout_viewport must be positive, got [{width}, {height}]"
            )));
        }
        if self.log_filter.trim().is_empty() {
            return Err(ConfigError::Invalid("log_filter is empty".to_string()));
        }
        Ok(())
    }
}
