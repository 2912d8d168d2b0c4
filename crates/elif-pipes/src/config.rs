//! Schema configuration
//!
//! Controls how exhaustive validation schedules its work. Fail-fast validation is
//! always sequential and ignores these settings.

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised while loading or checking a [`SchemaConfig`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid value for {field}: '{value}', expected {expected}")]
    InvalidValue { field: String, value: String, expected: String },

    #[error("Validation failed for {field}: {reason}")]
    ValidationFailed { field: String, reason: String },
}

/// How `validate_all` runs its fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Concurrency {
    /// One worker per field
    #[default]
    Parallel,
    /// Every field on the calling thread, in registration order
    Sequential,
}

impl FromStr for Concurrency {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "parallel" => Ok(Concurrency::Parallel),
            "sequential" => Ok(Concurrency::Sequential),
            _ => Err(ConfigError::InvalidValue {
                field: "concurrency".to_string(),
                value: value.to_string(),
                expected: "'parallel' or 'sequential'".to_string(),
            }),
        }
    }
}

/// Exhaustive validation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaConfig {
    /// Scheduling mode for exhaustive validation
    pub concurrency: Concurrency,
    /// Minimum number of fields before workers are spawned; smaller schemas run inline
    pub parallel_threshold: usize,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            concurrency: Concurrency::Parallel,
            parallel_threshold: 2,
        }
    }
}

impl SchemaConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from `PIPES_CONCURRENCY` and `PIPES_PARALLEL_THRESHOLD`, falling back to defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let concurrency = match env::var("PIPES_CONCURRENCY") {
            Ok(value) => value.parse::<Concurrency>()?,
            Err(_) => defaults.concurrency,
        };

        let parallel_threshold = match env::var("PIPES_PARALLEL_THRESHOLD") {
            Ok(value) => value.parse::<usize>().map_err(|_| ConfigError::InvalidValue {
                field: "parallel_threshold".to_string(),
                value: value.clone(),
                expected: "a non-negative integer".to_string(),
            })?,
            Err(_) => defaults.parallel_threshold,
        };

        let config = Self {
            concurrency,
            parallel_threshold,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.parallel_threshold == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "parallel_threshold".to_string(),
                reason: "Parallel threshold must be greater than 0".to_string(),
            });
        }

        Ok(())
    }

    pub fn sequential(mut self) -> Self {
        self.concurrency = Concurrency::Sequential;
        self
    }

    pub fn parallel(mut self) -> Self {
        self.concurrency = Concurrency::Parallel;
        self
    }

    pub fn parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Whether a schema with `fields` fields should fan out to workers
    pub fn runs_in_parallel(&self, fields: usize) -> bool {
        self.concurrency == Concurrency::Parallel && fields >= self.parallel_threshold.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Global test lock to prevent concurrent environment modifications
    static TEST_MUTEX: Mutex<()> = Mutex::new(());

    fn clean_test_env() {
        env::remove_var("PIPES_CONCURRENCY");
        env::remove_var("PIPES_PARALLEL_THRESHOLD");
    }

    #[test]
    fn test_default_config() {
        let config = SchemaConfig::default();
        assert_eq!(config.concurrency, Concurrency::Parallel);
        assert_eq!(config.parallel_threshold, 2);
        assert!(config.validate().is_ok());
        assert!(!config.runs_in_parallel(1));
        assert!(config.runs_in_parallel(2));
    }

    #[test]
    fn test_sequential_never_fans_out() {
        let config = SchemaConfig::new().sequential();
        assert!(!config.runs_in_parallel(100));
    }

    #[test]
    fn test_zero_threshold_is_rejected() {
        let config = SchemaConfig::new().parallel_threshold(0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationFailed { .. })
        ));
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let config: SchemaConfig = serde_json::from_str(r#"{"concurrency": "sequential"}"#).unwrap();
        assert_eq!(config.concurrency, Concurrency::Sequential);
        assert_eq!(config.parallel_threshold, 2);
    }

    #[test]
    fn test_from_env() {
        let _guard = TEST_MUTEX.lock().unwrap();
        clean_test_env();

        let config = SchemaConfig::from_env().unwrap();
        assert_eq!(config, SchemaConfig::default());

        env::set_var("PIPES_CONCURRENCY", "Sequential");
        env::set_var("PIPES_PARALLEL_THRESHOLD", "8");
        let config = SchemaConfig::from_env().unwrap();
        assert_eq!(config.concurrency, Concurrency::Sequential);
        assert_eq!(config.parallel_threshold, 8);

        env::set_var("PIPES_CONCURRENCY", "sometimes");
        assert!(matches!(
            SchemaConfig::from_env(),
            Err(ConfigError::InvalidValue { .. })
        ));

        env::set_var("PIPES_CONCURRENCY", "parallel");
        env::set_var("PIPES_PARALLEL_THRESHOLD", "many");
        assert!(SchemaConfig::from_env().is_err());

        clean_test_env();
    }
}
