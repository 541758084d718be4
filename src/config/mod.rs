mod types;

pub use types::*;

use crate::{Error, Result};
use std::{env, path::Path};
use tracing::debug;

const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Loads configuration from `$CONFIG_PATH`, then `config.yaml`, falling back
/// to built-in defaults when neither is present.
pub async fn load() -> Result<Config> {
    if let Ok(config_path) = env::var("CONFIG_PATH") {
        return load_from(&config_path).await;
    }

    if Path::new(DEFAULT_CONFIG_PATH).exists() {
        return load_from(DEFAULT_CONFIG_PATH).await;
    }

    debug!("No configuration file found, using defaults");
    Ok(Config::default())
}

pub async fn load_from(config_path: &str) -> Result<Config> {
    debug!("Loading configuration from: {}", config_path);

    let config_str = tokio::fs::read_to_string(config_path).await?;
    let config: Config = serde_yaml::from_str(&config_str)?;
    config.validate()?;

    Ok(config)
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.ollama.timeout_secs == 0 {
            return Err(Error::config("ollama.timeout_secs must be greater than zero"));
        }

        if self.ollama.model.trim().is_empty() {
            return Err(Error::config("ollama.model cannot be empty"));
        }

        for (field, url) in [
            ("ollama.base_url", &self.ollama.base_url),
            ("frontend.backend_url", &self.frontend.backend_url),
        ] {
            reqwest::Url::parse(url)
                .map_err(|e| Error::config(format!("{} is not a valid URL ({}): {}", field, url, e)))?;
        }

        Ok(())
    }
}
