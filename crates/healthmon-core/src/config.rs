use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogError, SensorCatalog};
use crate::domain::SensorDefinition;

pub const ENV_PREFIX: &str = "HEALTHMON";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
    #[error("invalid configuration: {0}")]
    Invalid(String),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error("failed to render configuration: {0}")]
    Render(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    pub tick_interval_ms: u64,
    /// Fixed seed for reproducible readings; entropy when unset.
    pub seed: Option<u64>,
    /// Stop after this many ticks; run until shut down when unset.
    pub max_ticks: Option<u64>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 2000,
            seed: None,
            max_ticks: None,
        }
    }
}

impl MonitorConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertConfig {
    pub sound: bool,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self { sound: true }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthmonConfig {
    pub monitor: MonitorConfig,
    pub alert: AlertConfig,
    /// Replaces the built-in sensor catalog when present.
    pub sensors: Option<Vec<SensorDefinition>>,
}

impl HealthmonConfig {
    /// Layer an optional TOML file under `HEALTHMON__SECTION__KEY` environment
    /// variables, then validate.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(
                config::File::from(path)
                    .format(config::FileFormat::Toml)
                    .required(true),
            );
        }
        let cfg: HealthmonConfig = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;
        cfg.validate()?;
        log::debug!("configuration loaded (file: {:?})", path);
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.monitor.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid("monitor.tick_interval_ms must be greater than zero".into()));
        }
        self.catalog()?;
        Ok(())
    }

    pub fn catalog(&self) -> Result<SensorCatalog, CatalogError> {
        match &self.sensors {
            Some(defs) => SensorCatalog::new(defs.clone()),
            None => Ok(SensorCatalog::default_machine()),
        }
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}
