//! Configuration management for the pager.
//!
//! Loads configuration from environment variables with sensible defaults.

use crate::types::CreatureIndex;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Default PokeAPI root
pub const DEFAULT_API_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Creature API configuration
    pub api: ApiConfig,
    /// Card shown at startup
    pub initial_index: CreatureIndex,
    /// How long shutdown waits for in-flight loads
    pub shutdown_timeout: Duration,
    /// Install the Prometheus recorder and print metrics on exit
    pub metrics_enabled: bool,
}

/// Creature API configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// API root, without the `/pokemon` segment
    pub base_url: String,
    /// Per-request timeout
    pub request_timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(10),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            initial_index: CreatureIndex::INITIAL,
            shutdown_timeout: Duration::from_secs(5),
            metrics_enabled: false,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Unset or unparseable variables fall back to their defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to
    /// its value.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let secs = |key: &str, default: Duration| {
            lookup(key)
                .and_then(|s| s.trim().parse::<u64>().ok())
                .map_or(default, Duration::from_secs)
        };

        Self {
            api: ApiConfig {
                base_url: lookup("DEXPAGER_API_BASE_URL")
                    .filter(|s| !s.trim().is_empty())
                    .unwrap_or(defaults.api.base_url),
                request_timeout: secs(
                    "DEXPAGER_REQUEST_TIMEOUT_SECS",
                    defaults.api.request_timeout,
                ),
            },
            initial_index: lookup("DEXPAGER_INITIAL_INDEX")
                .and_then(|s| s.trim().parse::<u32>().ok())
                .map_or(defaults.initial_index, CreatureIndex::clamped),
            shutdown_timeout: secs("DEXPAGER_SHUTDOWN_TIMEOUT_SECS", defaults.shutdown_timeout),
            metrics_enabled: lookup("DEXPAGER_METRICS")
                .is_some_and(|s| matches!(s.trim().to_ascii_lowercase().as_str(), "1" | "true")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config, Config::default());
        assert_eq!(config.api.base_url, "https://pokeapi.co/api/v2");
        assert_eq!(config.api.request_timeout, Duration::from_secs(10));
        assert_eq!(config.initial_index.get(), 25);
        assert!(!config.metrics_enabled);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("DEXPAGER_API_BASE_URL", "http://localhost:9000"),
            ("DEXPAGER_REQUEST_TIMEOUT_SECS", "3"),
            ("DEXPAGER_INITIAL_INDEX", "150"),
            ("DEXPAGER_SHUTDOWN_TIMEOUT_SECS", "1"),
            ("DEXPAGER_METRICS", "TRUE"),
        ]);

        assert_eq!(config.api.base_url, "http://localhost:9000");
        assert_eq!(config.api.request_timeout, Duration::from_secs(3));
        assert_eq!(config.initial_index.get(), 150);
        assert_eq!(config.shutdown_timeout, Duration::from_secs(1));
        assert!(config.metrics_enabled);
    }

    #[test]
    fn test_initial_index_is_clamped() {
        assert_eq!(
            config_from(&[("DEXPAGER_INITIAL_INDEX", "0")]).initial_index,
            CreatureIndex::MIN
        );
        assert_eq!(
            config_from(&[("DEXPAGER_INITIAL_INDEX", "99999")]).initial_index,
            CreatureIndex::MAX
        );
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = config_from(&[
            ("DEXPAGER_REQUEST_TIMEOUT_SECS", "soon"),
            ("DEXPAGER_INITIAL_INDEX", "-4"),
            ("DEXPAGER_API_BASE_URL", "  "),
            ("DEXPAGER_METRICS", "yes please"),
        ]);
        assert_eq!(config, Config::default());
    }
}
