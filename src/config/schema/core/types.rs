use super::super::{GatewayConfig, LlmConfig};
use crate::error::ConfigError;
use directories::UserDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to config.toml - computed or passed on the command line, not serialized
    #[serde(skip)]
    pub config_path: PathBuf,
    /// API key for the generation backend. Environment only, never persisted.
    #[serde(skip)]
    pub api_key: Option<String>,

    #[serde(default)]
    pub llm: LlmConfig,

    #[serde(default)]
    pub gateway: GatewayConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_path: default_config_dir().join("config.toml"),
            api_key: None,
            llm: LlmConfig::default(),
            gateway: GatewayConfig::default(),
        }
    }
}

pub(super) fn default_config_dir() -> PathBuf {
    let home = UserDirs::new().map_or_else(|| PathBuf::from("."), |u| u.home_dir().to_path_buf());
    home.join(".bijochat")
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.llm.models.is_empty() {
            return Err(ConfigError::Validation(
                "llm.models must list at least one model".into(),
            ));
        }
        if self.llm.models.iter().any(|model| model.trim().is_empty()) {
            return Err(ConfigError::Validation(
                "llm.models must not contain blank entries".into(),
            ));
        }
        if let Some(temperature) = self.llm.temperature
            && !(0.0..=2.0).contains(&temperature)
        {
            return Err(ConfigError::Validation(format!(
                "llm.temperature must be between 0.0 and 2.0, got {temperature}"
            )));
        }
        if self.llm.request_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "llm.request_timeout_secs must be greater than 0".into(),
            ));
        }
        if self.gateway.max_body_bytes == 0 {
            return Err(ConfigError::Validation(
                "gateway.max_body_bytes must be greater than 0".into(),
            ));
        }
        if self.gateway.request_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "gateway.request_timeout_secs must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}
