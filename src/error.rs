//! Error types for property binding.
//!
//! Setters return these; the dispatch loop in [`crate::props::NodeManager`]
//! logs them and moves on to the next property.

use thiserror::Error;

/// Errors produced while binding a single property update.
#[derive(Debug, Error)]
pub enum BindingError {
    /// A layout dimension arrived as something other than a number or string.
    #[error("{prop} is not of type Number or String (got {found})")]
    UnsupportedDimensionType {
        prop: &'static str,
        found: &'static str,
    },

    /// The value had the wrong shape for the property.
    #[error("invalid value for {prop}: expected {expected}, got {found}")]
    InvalidValue {
        prop: &'static str,
        expected: &'static str,
        found: String,
    },

    /// A material name did not resolve against the material source.
    #[error("material [{0}] not found. Did you create it?")]
    MaterialNotFound(String),

    /// No setter is registered under this name.
    #[error("unknown property {0}")]
    UnknownProp(String),

    /// Two table entries share a name.
    #[error("property {0} registered twice")]
    DuplicateProp(&'static str),

    /// A table entry was registered with an empty name.
    #[error("property table entry with empty name")]
    EmptyPropName,

    /// The scene node rejected the update.
    #[error(transparent)]
    Node(#[from] anyhow::Error),
}

impl BindingError {
    /// Shorthand for [`BindingError::InvalidValue`].
    pub fn invalid(prop: &'static str, expected: &'static str, found: impl Into<String>) -> Self {
        Self::InvalidValue {
            prop,
            expected,
            found: found.into(),
        }
    }
}

/// Errors emitted while loading [`crate::config::BridgeConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Wrap IO errors when reading the config file.
    #[error("failed to read bridge config: {0}")]
    Io(#[from] std::io::Error),
    /// Wrap TOML parsing issues.
    #[error("failed to parse bridge config: {0}")]
    Parse(#[from] toml::de::Error),
    /// A field parsed but holds an unusable value.
    #[error("invalid bridge config: {0}")]
    Invalid(String),
}
