pub mod database_config;
pub mod defaults;
pub mod product_service_config;

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;
use thiserror::Error;

pub use database_config::DatabaseConfig;
pub use product_service_config::ProductServiceConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Database configuration is invalid: {0}")]
    Database(String),

    #[error("Product service configuration is invalid: {0}")]
    ProductService(String),
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default = "defaults::default_host")]
    pub host: String,
    #[serde(default = "defaults::default_port")]
    pub port: u16,
    #[serde(default = "defaults::default_environment")]
    pub environment: String,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub product_service: ProductServiceConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "defaults::default_logging_level")]
    pub level: String,
    #[serde(default = "defaults::default_logging_json_format")]
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::default_logging_level(),
            json_format: defaults::default_logging_json_format(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, Box<figment::Error>> {
        Self::from_figment(
            Figment::new()
                .merge(Toml::file("config/default.toml"))
                .merge(Toml::file("config/development.toml").nested()),
        )
    }

    /// Layers environment overrides on top of `base` and extracts the config.
    pub fn from_figment(base: Figment) -> Result<Self, Box<figment::Error>> {
        let mut config: Self = base
            .merge(Env::prefixed("APP_").split("__"))
            .merge(
                Env::raw()
                    .only(&["DATABASE_URL", "PRODUCT_SERVICE_URL"])
                    .map(|key| match key.as_str() {
                        "DATABASE_URL" => "database.url".into(),
                        "PRODUCT_SERVICE_URL" => "product_service.base_url".into(),
                        _ => key.into(),
                    }),
            )
            .extract()
            .map_err(Box::new)?;

        config.product_service.base_url =
            defaults::normalize_optional_string(config.product_service.base_url);

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.url.trim().is_empty() {
            return Err(ConfigError::Database(
                "DATABASE_URL must be set".to_string(),
            ));
        }

        if self.database.min_connections > self.database.max_connections {
            return Err(ConfigError::Database(
                "min_connections must not exceed max_connections".to_string(),
            ));
        }

        if self.product_service.request_timeout_ms == 0 {
            return Err(ConfigError::ProductService(
                "request_timeout_ms must be greater than zero".to_string(),
            ));
        }

        if let Some(url) = self.product_service.base_url.as_deref() {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::ProductService(format!(
                    "base_url must use http or https: {url}"
                )));
            }
        }

        Ok(())
    }
}
