use crate::domain::error::{AppError, Result};
use crate::domain::llm_config::LlmConfig;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

/// Service configuration, layered: built-in defaults, then
/// `datasweep.toml`, then `DATASWEEP_*` environment variables.
/// `GROQ_API_KEY` is honored on top so deploys can pass the secret the
/// same way the original service did.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub llm: LlmConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3001,
            llm: LlmConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        let mut config: AppConfig = Figment::new()
            .merge(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file("datasweep.toml"))
            .merge(Env::prefixed("DATASWEEP_").split("__"))
            .extract()
            .map_err(|e| AppError::Internal(format!("Failed to load config: {}", e)))?;

        if config.llm.api_key.is_none() {
            if let Ok(key) = std::env::var("GROQ_API_KEY") {
                if !key.is_empty() {
                    config.llm.api_key = Some(key);
                }
            }
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.port, 3001);
        assert_eq!(config.llm.model, "llama3-8b-8192");
        assert!(config.llm.api_key.is_none());
    }
}
