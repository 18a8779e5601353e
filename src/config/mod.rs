mod types;

pub use types::*;

use crate::{Error, Result};
use std::env;
use std::path::Path;
use tracing::{debug, warn};

const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Loads the YAML configuration and layers API keys from the environment on top.
///
/// An explicit `CONFIG_PATH` must exist. The default `config.yaml` is optional
/// and built-in defaults are used when it is absent.
pub async fn load() -> Result<Config> {
    let explicit = env::var("CONFIG_PATH").ok();
    let config_path = explicit
        .clone()
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

    debug!("Loading configuration from: {}", config_path);

    let mut config = if explicit.is_none() && !Path::new(&config_path).exists() {
        warn!(
            "No {} found, falling back to built-in defaults",
            DEFAULT_CONFIG_PATH
        );
        Config::default()
    } else {
        let config_str = tokio::fs::read_to_string(&config_path)
            .await
            .map_err(|e| Error::config(format!("Cannot read {}: {}", config_path, e)))?;
        parse(&config_str)?
    };

    config.apply_env_overrides(|key| env::var(key).ok());
    Ok(config)
}

pub fn parse(yaml: &str) -> Result<Config> {
    let config: Config = serde_yaml::from_str(yaml)?;
    Ok(config)
}

impl Config {
    /// Overrides API keys with values from `lookup` (normally the process environment).
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let present = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = present("TOGETHER_API_KEY") {
            self.llm.api_key = key;
        }
        if let Some(token) = present("HF_API_TOKEN") {
            self.classifier.api_token = token;
        }
        if let Some(key) = present("SERPER_API_KEY") {
            self.search.api_key = key;
        }
        if let Some(key) = present("OPENCAGE_API_KEY") {
            self.geocoding.api_key = Some(key);
        }
    }
}
