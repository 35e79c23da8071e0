use crate::domain::dataset::{DataRow, DatasetKind, RuleRecommendation};
use crate::domain::error::{AppError, Result};
use crate::domain::llm_config::LlmConfig;
use crate::infrastructure::llm_clients::{ChatPrompt, LlmClient};
use crate::infrastructure::response::clean_llm_response;
use serde::Deserialize;
use std::sync::Arc;

const SYSTEM_PROMPT: &str = "You are a data analysis assistant that only responds with JSON.";
const TEMPERATURE: f32 = 0.5;
const SAMPLE_ROWS: usize = 15;

#[derive(Deserialize)]
struct RawRecommendations {
    #[serde(default)]
    recommendations: Vec<RuleRecommendation>,
}

/// Asks the model for validation/operational rules worth adding for a
/// dataset. The output is descriptive text only; nothing evaluates it.
pub struct RuleRecommendationUseCase {
    llm_client: Arc<dyn LlmClient + Send + Sync>,
}

impl RuleRecommendationUseCase {
    pub fn new(llm_client: Arc<dyn LlmClient + Send + Sync>) -> Self {
        Self { llm_client }
    }

    pub async fn execute(
        &self,
        config: &LlmConfig,
        rows: &[DataRow],
        kind: DatasetKind,
    ) -> Result<Vec<RuleRecommendation>> {
        let sample = &rows[..rows.len().min(SAMPLE_ROWS)];
        let sample_json = serde_json::to_string_pretty(sample)
            .map_err(|e| AppError::Internal(format!("Failed to serialize row sample: {}", e)))?;

        let user_prompt = format!(
            "You are an expert data analyst. Here are the first rows of a '{}' dataset as JSON:\n{}\n\n\
             Suggest validation or operational rules that would improve the quality of this data. \
             Respond with a JSON object of the form \
             {{\"recommendations\": [{{\"id\": \"<short-kebab-case-id>\", \"description\": \"<one sentence>\"}}]}}.",
            kind.as_str(),
            sample_json
        );

        let raw = self
            .llm_client
            .generate(config, &ChatPrompt::json(SYSTEM_PROMPT, user_prompt, TEMPERATURE))
            .await?;

        let cleaned = clean_llm_response(&raw);
        let parsed: RawRecommendations = serde_json::from_str(&cleaned).map_err(|e| {
            AppError::LlmError(format!("AI returned malformed recommendation JSON: {}", e))
        })?;

        Ok(parsed.recommendations)
    }
}
