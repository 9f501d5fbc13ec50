//! Query configuration.
//!
//! Scope and fetch deadline for access queries. Configuration is loaded from
//! environment variables with defaults suitable for a global query.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid configuration value.
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue {
        /// Configuration key.
        key: String,
        /// Error message.
        message: String,
    },
}

/// Configuration for access queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessConfig {
    /// Namespace to scope queries to. Empty means global scope.
    pub namespace: String,

    /// Deadline for fetching the four input lists, in seconds.
    pub fetch_timeout_secs: u64,
}

impl Default for AccessConfig {
    /// Global scope with a 30 second fetch deadline.
    fn default() -> Self {
        Self {
            namespace: String::new(),
            fetch_timeout_secs: 30,
        }
    }
}

impl AccessConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `RBAC_ACCESS_NAMESPACE`: Namespace scope (default: empty, global)
    /// - `RBAC_ACCESS_FETCH_TIMEOUT_SECS`: Fetch deadline in seconds (default: 30)
    pub fn from_env() -> Self {
        let default = Self::default();

        Self {
            namespace: std::env::var("RBAC_ACCESS_NAMESPACE").unwrap_or(default.namespace),
            fetch_timeout_secs: std::env::var("RBAC_ACCESS_FETCH_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(default.fetch_timeout_secs),
        }
    }

    /// Scope to a namespace.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Get the fetch deadline as a Duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    /// Check if queries run at global scope.
    pub fn is_global(&self) -> bool {
        self.namespace.is_empty()
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fetch_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "RBAC_ACCESS_FETCH_TIMEOUT_SECS".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AccessConfig::default();
        assert!(config.is_global());
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_with_namespace() {
        let config = AccessConfig::default().with_namespace("team-a");
        assert!(!config.is_global());
        assert_eq!(config.namespace, "team-a");
    }

    #[test]
    fn test_zero_timeout_is_invalid() {
        let config = AccessConfig {
            fetch_timeout_secs: 0,
            ..AccessConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("RBAC_ACCESS_FETCH_TIMEOUT_SECS"));
    }
}
