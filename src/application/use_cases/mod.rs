pub mod modification;
pub mod rule_recommendation;
pub mod search;
pub mod suggestion;
pub mod validation;

#[cfg(test)]
pub mod test_support {
    use crate::domain::error::{AppError, Result};
    use crate::domain::llm_config::LlmConfig;
    use crate::infrastructure::llm_clients::{ChatPrompt, LlmClient};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// LLM stub that replies with a fixed body and records the prompt.
    pub struct StaticLlm {
        body: String,
        last: Mutex<Option<ChatPrompt>>,
    }

    impl StaticLlm {
        pub fn new(body: &str) -> Self {
            Self {
                body: body.to_string(),
                last: Mutex::new(None),
            }
        }

        pub fn last_prompt(&self) -> Option<ChatPrompt> {
            self.last.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl LlmClient for StaticLlm {
        async fn generate(&self, _config: &LlmConfig, prompt: &ChatPrompt) -> Result<String> {
            *self.last.lock().unwrap() = Some(prompt.clone());
            Ok(self.body.clone())
        }
    }

    /// LLM stub that always fails at the transport level.
    pub struct FailingLlm;

    #[async_trait]
    impl LlmClient for FailingLlm {
        async fn generate(&self, _config: &LlmConfig, _prompt: &ChatPrompt) -> Result<String> {
            Err(AppError::LlmError("Request failed: connection refused".to_string()))
        }
    }
}
