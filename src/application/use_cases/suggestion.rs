use crate::domain::error::Result;
use crate::domain::llm_config::LlmConfig;
use crate::infrastructure::llm_clients::{ChatPrompt, LlmClient};
use crate::infrastructure::response::clean_llm_response;
use std::sync::Arc;

const SYSTEM_PROMPT: &str = "You are a helpful data correction assistant.";
const TEMPERATURE: f32 = 0.2;

/// Asks the model for a single corrected cell value.
pub struct SuggestionUseCase {
    llm_client: Arc<dyn LlmClient + Send + Sync>,
}

impl SuggestionUseCase {
    pub fn new(llm_client: Arc<dyn LlmClient + Send + Sync>) -> Self {
        Self { llm_client }
    }

    pub async fn execute(
        &self,
        config: &LlmConfig,
        column: &str,
        error: &str,
        current_value: &str,
    ) -> Result<String> {
        let user_prompt = format!(
            "For a CSV file column named '{}', a data entry of '{}' is invalid. \
             The error is: '{}'. Provide a likely correct value. \
             Respond with only the corrected value, and nothing else.",
            column, current_value, error
        );

        let raw = self
            .llm_client
            .generate(config, &ChatPrompt::text(SYSTEM_PROMPT, user_prompt, TEMPERATURE))
            .await?;

        Ok(clean_llm_response(&raw))
    }
}
