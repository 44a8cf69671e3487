//! Configuration structures.
//!
//! Configuration is read from an optional JSON file; every section falls back
//! to its defaults when absent.

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::errors::{Error, Result};

/// Global configuration for the event translation tooling.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,

    /// Batch forwarding configuration.
    #[serde(default)]
    pub forwarding: ForwardingConfig,
}

impl Config {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("failed to read {}: {}", path.display(), e))
        })?;
        let config: Config = serde_json::from_str(&raw).map_err(|e| {
            Error::config(format!("failed to parse {}: {}", path.display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` when given, defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.observability.log_level.trim().is_empty() {
            return Err(Error::config("observability.log_level cannot be empty"));
        }
        if self.forwarding.max_line_bytes == 0 {
            return Err(Error::config("forwarding.max_line_bytes must be positive"));
        }
        Ok(())
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Tracing log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable JSON log formatting.
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

/// What the forwarder does with an event it cannot translate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ErrorPolicy {
    /// Log the record as un-forwardable and keep going.
    #[default]
    Skip,
    /// Stop at the first failure.
    Abort,
}

/// Batch forwarding configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ForwardingConfig {
    /// Behavior on translation failure.
    pub on_error: ErrorPolicy,

    /// Maximum accepted size of one JSON-lines record. Longer lines are
    /// rejected without being decoded.
    pub max_line_bytes: usize,
}

impl Default for ForwardingConfig {
    fn default() -> Self {
        Self {
            on_error: ErrorPolicy::Skip,
            max_line_bytes: 64 * 1024,
        }
    }
}
