//! Daemon configuration.
//!
//! Loaded from a JSON file at `$XDG_CONFIG_HOME/autotile/config.json`.
//! Every field is optional — a minimal `{}` file is valid and all values
//! fall back to their compiled-in defaults, so the schema can grow without
//! breaking existing files.
//!
//! # Example
//!
//! ```json
//! {
//!   "workspace_capacity": 5,
//!   "poll_interval_ms": 20
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Maximum number of windows a workspace may hold before the newest
    /// ones are relocated to the next workspace with room.
    pub workspace_capacity: usize,

    /// Milliseconds between reconciliation cycles.
    pub poll_interval_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            workspace_capacity: 5,
            poll_interval_ms: 20,
        }
    }
}

impl Config {
    /// Load configuration from a JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError(format!("failed to read {}: {}", path.display(), e)))?;
        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| ConfigError(format!("failed to parse {}: {}", path.display(), e)))?;
        Ok(config)
    }

    /// The poll cadence as a [`Duration`].
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Error from loading or parsing a configuration file.
#[derive(Debug, thiserror::Error)]
#[error("config error: {0}")]
pub struct ConfigError(String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_full_config() {
        let json = r#"{ "workspace_capacity": 8, "poll_interval_ms": 50 }"#;
        let cfg: Config = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.workspace_capacity, 8);
        assert_eq!(cfg.poll_interval_ms, 50);
        assert_eq!(cfg.poll_interval(), Duration::from_millis(50));
    }

    #[test]
    fn deserialize_empty_uses_defaults() {
        let json = "{}";
        let cfg: Config = serde_json::from_str(json).unwrap();
        let d = Config::default();
        assert_eq!(cfg.workspace_capacity, d.workspace_capacity);
        assert_eq!(cfg.poll_interval_ms, d.poll_interval_ms);
    }

    #[test]
    fn deserialize_partial_keeps_other_defaults() {
        let json = r#"{ "workspace_capacity": 3 }"#;
        let cfg: Config = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.workspace_capacity, 3);
        assert_eq!(cfg.poll_interval_ms, Config::default().poll_interval_ms);
    }

    #[test]
    fn unknown_keys_ignored() {
        let json = r#"{ "poll_interval_ms": 100, "future_section": { "key": 42 } }"#;
        // Should not fail — unknown keys are silently ignored.
        let cfg: Config = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.poll_interval_ms, 100);
    }
}
