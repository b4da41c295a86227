use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use validator::Validate;

use crate::domain::error::{AppError, Result};
use crate::domain::ingest_config::IngestConfig;

pub const CONFIG_PATH_ENV: &str = "CSV_INGEST_CONFIG";
pub const ENV_PREFIX: &str = "CSV_INGEST_";
const DEFAULT_CONFIG_FILE: &str = "csv-ingest.toml";

/// Layered configuration: defaults, then the TOML file, then `CSV_INGEST_*`.
pub struct ConfigService {
    figment: Figment,
}

impl ConfigService {
    pub fn new() -> Self {
        let path =
            std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        Self::from_figment(
            Figment::from(Serialized::defaults(IngestConfig::default()))
                .merge(Toml::file(path))
                .merge(Env::prefixed(ENV_PREFIX)),
        )
    }

    pub fn from_figment(figment: Figment) -> Self {
        Self { figment }
    }

    pub fn load(&self) -> Result<IngestConfig> {
        let config: IngestConfig = self
            .figment
            .extract()
            .map_err(|err| AppError::ConfigError(format!("Failed to load config: {}", err)))?;
        config
            .validate()
            .map_err(|err| AppError::ConfigError(format!("Invalid config: {}", err)))?;
        Ok(config)
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}
