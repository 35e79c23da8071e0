use crate::domain::dataset::{DataRow, DatasetKind};
use crate::domain::error::{AppError, Result};
use crate::domain::llm_config::LlmConfig;
use crate::infrastructure::llm_clients::{ChatPrompt, LlmClient};
use crate::infrastructure::response::clean_llm_response;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

const SYSTEM_PROMPT: &str = "You are a data modification assistant that only responds with JSON.";
const TEMPERATURE: f32 = 0.1;

/// Only the first rows are shown to the model; enough context to map the
/// command onto columns without shipping the whole dataset.
pub const SAMPLE_ROWS: usize = 15;

/// One proposed cell edit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CellEdit {
    pub row: usize,
    pub column: String,
    #[serde(rename = "newValue")]
    pub new_value: Value,
}

/// The full proposal handed back to the UI for confirmation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModificationProposal {
    pub modifications: Vec<CellEdit>,
    pub summary: String,
}

#[derive(Deserialize)]
struct RawProposal {
    #[serde(default)]
    modifications: Vec<CellEdit>,
}

/// Maps a natural-language command onto a list of cell edits via the
/// model. The data itself is never modified here; the caller applies the
/// proposal only after the user confirms it.
pub struct ModificationUseCase {
    llm_client: Arc<dyn LlmClient + Send + Sync>,
}

impl ModificationUseCase {
    pub fn new(llm_client: Arc<dyn LlmClient + Send + Sync>) -> Self {
        Self { llm_client }
    }

    pub async fn execute(
        &self,
        config: &LlmConfig,
        command: &str,
        rows: &[DataRow],
        kind: DatasetKind,
    ) -> Result<ModificationProposal> {
        let sample = &rows[..rows.len().min(SAMPLE_ROWS)];
        let sample_json = serde_json::to_string_pretty(sample)
            .map_err(|e| AppError::Internal(format!("Failed to serialize row sample: {}", e)))?;

        let user_prompt = format!(
            "A user wants to modify their '{}' dataset with this command: \"{}\".\n\
             Here are the first rows of the dataset as JSON:\n{}\n\n\
             Respond with a JSON object of the form \
             {{\"modifications\": [{{\"row\": <0-based row index>, \"column\": \"<column name>\", \"newValue\": <new value>}}]}}. \
             Only reference columns that exist in the sample. If the command cannot be \
             mapped onto the data, respond with {{\"modifications\": []}}.",
            kind.as_str(),
            command,
            sample_json
        );

        let raw = self
            .llm_client
            .generate(config, &ChatPrompt::json(SYSTEM_PROMPT, user_prompt, TEMPERATURE))
            .await?;

        let cleaned = clean_llm_response(&raw);
        let proposal: RawProposal = serde_json::from_str(&cleaned).map_err(|e| {
            AppError::LlmError(format!("AI returned malformed modification JSON: {}", e))
        })?;

        let count = proposal.modifications.len();
        let summary = format!(
            "The AI proposes making {} change(s) based on your command.",
            count
        );

        Ok(ModificationProposal {
            modifications: proposal.modifications,
            summary,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::test_support::StaticLlm;
    use serde_json::json;

    fn rows(n: usize) -> Vec<DataRow> {
        (0..n)
            .map(|i| {
                let mut row = DataRow::new();
                row.insert("TaskID".to_string(), json!(format!("T{}", i)));
                row.insert("Duration".to_string(), json!("2"));
                row
            })
            .collect()
    }

    #[tokio::test]
    async fn test_parses_edits_and_builds_summary() {
        let body = r#"{"modifications": [{"row": 1, "column": "Duration", "newValue": "3"}]}"#;
        let use_case = ModificationUseCase::new(Arc::new(StaticLlm::new(body)));
        let proposal = use_case
            .execute(&LlmConfig::default(), "bump durations", &rows(3), DatasetKind::Tasks)
            .await
            .unwrap();

        assert_eq!(proposal.modifications.len(), 1);
        assert_eq!(proposal.modifications[0].column, "Duration");
        assert_eq!(proposal.summary, "The AI proposes making 1 change(s) based on your command.");
    }

    #[tokio::test]
    async fn test_missing_modifications_key_means_no_edits() {
        let use_case = ModificationUseCase::new(Arc::new(StaticLlm::new("{}")));
        let proposal = use_case
            .execute(&LlmConfig::default(), "do nothing", &rows(1), DatasetKind::Tasks)
            .await
            .unwrap();
        assert!(proposal.modifications.is_empty());
        assert!(proposal.summary.contains("0 change(s)"));
    }

    #[tokio::test]
    async fn test_non_json_body_is_an_error_not_a_panic() {
        let use_case = ModificationUseCase::new(Arc::new(StaticLlm::new("sorry, I cannot help")));
        let result = use_case
            .execute(&LlmConfig::default(), "cmd", &rows(1), DatasetKind::Tasks)
            .await;
        assert!(matches!(result, Err(AppError::LlmError(_))));
    }

    #[tokio::test]
    async fn test_sample_capped_to_first_fifteen_rows() {
        let llm = Arc::new(StaticLlm::new(r#"{"modifications": []}"#));
        let use_case = ModificationUseCase::new(llm.clone());
        use_case
            .execute(&LlmConfig::default(), "cmd", &rows(40), DatasetKind::Tasks)
            .await
            .unwrap();
        let prompt = llm.last_prompt().unwrap();
        assert!(prompt.user.contains("T14"));
        assert!(!prompt.user.contains("T15"));
        assert!(prompt.json_mode);
    }

    #[tokio::test]
    async fn test_fenced_json_is_unwrapped() {
        let body = "```json\n{\"modifications\": []}\n```";
        let use_case = ModificationUseCase::new(Arc::new(StaticLlm::new(body)));
        let proposal = use_case
            .execute(&LlmConfig::default(), "cmd", &rows(1), DatasetKind::Tasks)
            .await
            .unwrap();
        assert!(proposal.modifications.is_empty());
    }
}
