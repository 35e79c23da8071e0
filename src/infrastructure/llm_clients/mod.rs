pub mod groq;

use crate::domain::error::Result;
use crate::domain::llm_config::LlmConfig;
use async_trait::async_trait;

pub use groq::GroqClient;

/// A single prompt against the hosted completion endpoint. Every call is
/// non-streaming; `json_mode` asks the API for a JSON-object response.
#[derive(Debug, Clone)]
pub struct ChatPrompt {
    pub system: String,
    pub user: String,
    pub temperature: f32,
    pub json_mode: bool,
}

impl ChatPrompt {
    pub fn text(system: &str, user: String, temperature: f32) -> Self {
        Self {
            system: system.to_string(),
            user,
            temperature,
            json_mode: false,
        }
    }

    pub fn json(system: &str, user: String, temperature: f32) -> Self {
        Self {
            system: system.to_string(),
            user,
            temperature,
            json_mode: true,
        }
    }
}

#[async_trait]
pub trait LlmClient {
    async fn generate(&self, config: &LlmConfig, prompt: &ChatPrompt) -> Result<String>;
}
