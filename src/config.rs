//! Configuration management for masgraph.
//!
//! Configuration can be set via environment variables:
//! - `MASGRAPH_DEFAULT_TOPOLOGY` - Optional. Topology used when a MAS spec
//!   does not request one. Defaults to `star`.
//! - `MASGRAPH_PRETTY` - Optional. Pretty-print the output JSON. Defaults
//!   to `true`.
//! - `MASGRAPH_COLORS` - Optional. Attach per-type color metadata to
//!   nodes. Defaults to `true`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Runtime configuration for the CLI and embedding hosts.
#[derive(Debug, Clone)]
pub struct Config {
    /// Topology the direct planner falls back to.
    pub default_topology: String,

    /// Pretty-print output JSON.
    pub pretty: bool,

    /// Attach per-type color metadata.
    pub colors: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_topology: "star".to_string(),
            pretty: true,
            colors: true,
        }
    }
}

impl Config {
    /// Load configuration from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            default_topology: std::env::var("MASGRAPH_DEFAULT_TOPOLOGY")
                .unwrap_or_else(|_| "star".to_string()),
            pretty: env_bool("MASGRAPH_PRETTY", true)?,
            colors: env_bool("MASGRAPH_COLORS", true)?,
        })
    }
}

fn env_bool(name: &str, default: bool) -> Result<bool, ConfigError> {
    match std::env::var(name) {
        Err(_) => Ok(default),
        Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(true),
            "false" | "0" | "no" => Ok(false),
            _ => Err(ConfigError::InvalidValue(name.to_string(), raw)),
        },
    }
}
