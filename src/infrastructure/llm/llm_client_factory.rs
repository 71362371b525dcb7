use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{LlmClient, LlmClientError};
use crate::presentation::config::{LlmProvider, LlmSettings, ScaffoldConfig};

use super::{GeminiClient, MockLlmClient, OpenAiClient};

#[derive(Debug, thiserror::Error)]
pub enum LlmClientFactoryError {
    #[error("llm.api_key is required for the {0} provider")]
    MissingApiKey(&'static str),
    #[error("llm client initialization failed: {0}")]
    InitializationFailed(#[from] LlmClientError),
}

pub struct LlmClientFactory;

impl LlmClientFactory {
    pub fn create(
        settings: &LlmSettings,
        scaffold: &ScaffoldConfig,
    ) -> Result<Arc<dyn LlmClient>, LlmClientFactoryError> {
        let mut settings = settings.clone();
        scaffold.apply(&mut settings);
        let timeout = Duration::from_secs(settings.timeout_secs);

        match settings.provider {
            LlmProvider::Gemini => {
                let api_key = require_key(&settings, "gemini")?;
                tracing::info!(model = %settings.model, "Using Gemini generation client");
                Ok(Arc::new(GeminiClient::new(
                    settings.base_url.as_deref(),
                    api_key,
                    settings.model.clone(),
                    settings.max_output_tokens,
                    settings.temperature,
                    timeout,
                )?))
            }
            LlmProvider::OpenAi => {
                let api_key = require_key(&settings, "openai")?;
                tracing::info!(
                    model = %settings.model,
                    base_url = ?settings.base_url,
                    "Using OpenAI-compatible generation client"
                );
                Ok(Arc::new(OpenAiClient::new(
                    settings.base_url.as_deref(),
                    api_key,
                    settings.model.clone(),
                    settings.max_output_tokens,
                    settings.temperature,
                    timeout,
                )?))
            }
            LlmProvider::Mock => {
                tracing::info!("Using mock generation client");
                Ok(Arc::new(MockLlmClient::with_delay(scaffold.mock_delay())))
            }
        }
    }
}

fn require_key(
    settings: &LlmSettings,
    provider: &'static str,
) -> Result<String, LlmClientFactoryError> {
    let key = settings.api_key.trim();
    if key.is_empty() {
        return Err(LlmClientFactoryError::MissingApiKey(provider));
    }
    Ok(key.to_string())
}
