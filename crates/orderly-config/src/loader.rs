//! Configuration loader with layered sources.

use crate::AppConfig;
use config::{Config, ConfigError, Environment, File};
use orderly_core::{OrderlyError, OrderlyResult};
use std::path::PathBuf;
use tracing::{debug, info};

/// Default prefix for environment overrides, e.g. `ORDERLY__DATABASE__URL`.
pub const ENV_PREFIX: &str = "ORDERLY";

/// Layered configuration loader.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config_dir: PathBuf,
    env_prefix: String,
}

impl ConfigLoader {
    /// Creates a loader reading files from `config_dir`.
    ///
    /// Configuration is loaded from multiple sources in order:
    /// 1. `{config_dir}/default.toml` - Default values
    /// 2. `{config_dir}/{environment}.toml` - Environment-specific overrides
    /// 3. `{config_dir}/local.toml` - Uncommitted local overrides
    /// 4. Environment variables with `ORDERLY__` prefix
    pub fn new(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
            env_prefix: ENV_PREFIX.to_string(),
        }
    }

    /// Creates a loader for the default location (`./config`).
    #[must_use]
    pub fn from_default_location() -> Self {
        Self::new("./config")
    }

    /// Overrides the environment variable prefix.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Loads and validates the configuration.
    pub fn load(&self) -> OrderlyResult<AppConfig> {
        // Load .env file if present
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file loaded: {}", e);
        }

        let environment = std::env::var(format!("{}_ENVIRONMENT", self.env_prefix))
            .unwrap_or_else(|_| "development".to_string());

        info!("Loading configuration for environment: {}", environment);

        let mut builder = Config::builder();

        for name in ["default", environment.as_str(), "local"] {
            let path = self.config_dir.join(format!("{name}.toml"));
            if path.exists() {
                debug!("Loading config from: {}", path.display());
                builder = builder.add_source(File::from(path).required(false));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix(&self.env_prefix)
                .separator("__")
                .try_parsing(true),
        );

        let app_config: AppConfig = builder
            .build()
            .and_then(Config::try_deserialize)
            .map_err(config_error_to_orderly_error)?;

        app_config.validate()?;

        Ok(app_config)
    }
}

fn config_error_to_orderly_error(err: ConfigError) -> OrderlyError {
    OrderlyError::Configuration(err.to_string())
}
