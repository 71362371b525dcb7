use std::time::Duration;

use super::{LlmProvider, LlmSettings};

/// Demo mode: `SCAFFOLD_MODE=1` swaps the generation service for canned
/// output, optionally delayed by `MOCK_RESPONSE_DELAY` milliseconds.
#[derive(Debug, Clone, Default)]
pub struct ScaffoldConfig {
    pub enabled: bool,
    pub mock_response_delay_ms: u64,
}

impl ScaffoldConfig {
    pub fn from_env() -> Self {
        Self {
            enabled: std::env::var("SCAFFOLD_MODE")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(false),
            mock_response_delay_ms: std::env::var("MOCK_RESPONSE_DELAY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0),
        }
    }

    pub fn mock_delay(&self) -> Duration {
        Duration::from_millis(self.mock_response_delay_ms)
    }

    pub fn apply(&self, llm: &mut LlmSettings) {
        if self.enabled {
            tracing::warn!("Scaffold mode enabled, using canned generation output");
            llm.provider = LlmProvider::Mock;
        }
    }
}
