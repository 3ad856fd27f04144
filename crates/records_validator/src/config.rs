//! Validator configuration.

use crate::ConfigError;
use records_core::DEFAULT_MAX_DEPTH;
use std::path::{Path, PathBuf};

/// Environment variable naming the schema directory.
pub const SCHEMA_DIR_ENV: &str = "RCV_SCHEMA_DIR";

/// Environment variable holding the nesting depth limit.
pub const MAX_DEPTH_ENV: &str = "RCV_MAX_DEPTH";

/// Directory schemas are read from when nothing else is configured.
pub const DEFAULT_SCHEMA_DIR: &str = "fixtures/schemas";

/// Settings for a [`Validator`](crate::Validator).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorConfig {
    /// Directory of schema documents
    pub schema_dir: PathBuf,

    /// Deepest nesting accepted in schemas and records, the root counting as 1
    pub max_depth: usize,
}

impl ValidatorConfig {
    /// Creates a new builder for `ValidatorConfig`.
    pub fn builder() -> ValidatorConfigBuilder {
        ValidatorConfigBuilder::default()
    }

    /// Reads `RCV_SCHEMA_DIR` and `RCV_MAX_DEPTH`, falling back to defaults
    /// for unset variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env), reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = Self::builder();

        if let Some(dir) = lookup(SCHEMA_DIR_ENV).filter(|dir| !dir.trim().is_empty()) {
            builder = builder.schema_dir(dir);
        }

        if let Some(raw) = lookup(MAX_DEPTH_ENV) {
            let depth = raw
                .trim()
                .parse::<usize>()
                .map_err(|e| ConfigError::InvalidEnv {
                    variable: MAX_DEPTH_ENV.to_string(),
                    value: raw.clone(),
                    reason: e.to_string(),
                })?;
            builder = builder.max_depth(depth);
        }

        builder.build()
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == 0 {
            return Err(ConfigError::Invalid(
                "max_depth must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Directory schemas are read from.
    pub fn schema_dir(&self) -> &Path {
        &self.schema_dir
    }
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            schema_dir: PathBuf::from(DEFAULT_SCHEMA_DIR),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Builder for `ValidatorConfig`.
#[derive(Debug, Clone, Default)]
pub struct ValidatorConfigBuilder {
    schema_dir: Option<PathBuf>,
    max_depth: Option<usize>,
}

impl ValidatorConfigBuilder {
    /// Sets the schema directory.
    pub fn schema_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.schema_dir = Some(dir.into());
        self
    }

    /// Sets the nesting depth limit.
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Builds the configuration, filling unset fields with defaults.
    pub fn build(self) -> Result<ValidatorConfig, ConfigError> {
        let defaults = ValidatorConfig::default();
        let config = ValidatorConfig {
            schema_dir: self.schema_dir.unwrap_or(defaults.schema_dir),
            max_depth: self.max_depth.unwrap_or(defaults.max_depth),
        };
        config.validate()?;
        Ok(config)
    }
}
