use super::{ChatPrompt, LlmClient};
use crate::domain::error::{AppError, Result};
use crate::domain::llm_config::LlmConfig;
use async_trait::async_trait;
use serde_json::json;

/// Client for Groq's OpenAI-compatible chat-completions API.
pub struct GroqClient {
    client: reqwest::Client,
}

impl GroqClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(60))
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }

    fn api_key(config: &LlmConfig) -> Result<String> {
        config
            .api_key
            .clone()
            .ok_or_else(|| AppError::LlmError("Missing API key for Groq".to_string()))
    }
}

impl Default for GroqClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LlmClient for GroqClient {
    async fn generate(&self, config: &LlmConfig, prompt: &ChatPrompt) -> Result<String> {
        let api_key = Self::api_key(config)?;
        let url = format!(
            "{}/chat/completions",
            config.base_url.trim_end_matches('/')
        );

        let mut body = json!({
            "model": config.model,
            "messages": [
                {
                    "role": "system",
                    "content": prompt.system
                },
                {
                    "role": "user",
                    "content": prompt.user
                }
            ],
            "max_tokens": config.max_tokens,
            "temperature": prompt.temperature,
        });
        if prompt.json_mode {
            body["response_format"] = json!({ "type": "json_object" });
        }

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::LlmError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(AppError::LlmError(format!(
                "API error ({}): {}",
                status, text
            )));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AppError::LlmError(format!("Failed to parse JSON: {}", e)))?;

        json["choices"][0]["message"]["content"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| AppError::LlmError("Invalid response format".to_string()))
    }
}
