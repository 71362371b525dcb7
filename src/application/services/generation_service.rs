use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{LlmClient, LlmClientError};
use crate::domain::{GeneratedContent, GenerationRequest};
use crate::infrastructure::observability::sanitize_prompt;

use super::PromptBuilder;

/// Builds the prompt for a request and runs it against the remote service.
pub struct GenerationService {
    llm_client: Arc<dyn LlmClient>,
    prompt_builder: PromptBuilder,
    timeout: Duration,
}

impl GenerationService {
    pub fn new(
        llm_client: Arc<dyn LlmClient>,
        prompt_builder: PromptBuilder,
        timeout: Duration,
    ) -> Self {
        Self {
            llm_client,
            prompt_builder,
            timeout,
        }
    }

    #[tracing::instrument(
        skip(self, request),
        fields(kind = %request.kind, count = request.count.get(), text_chars = request.text.len())
    )]
    pub async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GeneratedContent, LlmClientError> {
        let prompt = self
            .prompt_builder
            .build(request.kind, &request.text, request.count);

        tracing::debug!(prompt = %sanitize_prompt(&prompt), "Sending generation prompt");

        let response = tokio::time::timeout(self.timeout, self.llm_client.generate(&prompt))
            .await
            .map_err(|_| LlmClientError::Timeout(self.timeout.as_secs()))??;

        let trimmed = response.trim();
        if trimmed.is_empty() {
            return Err(LlmClientError::EmptyResponse);
        }

        let content = GeneratedContent::new(trimmed);
        tracing::info!(
            sections = content.sections().len(),
            "Generation complete"
        );

        Ok(content)
    }
}
