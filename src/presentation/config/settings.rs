use config::{Config, ConfigError, Environment as EnvironmentSource, File};
use serde::Deserialize;

use super::Environment;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub llm: LlmSettings,
    pub storage: StorageSettings,
    pub generation: GenerationSettings,
    pub sessions: SessionSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub max_upload_mb: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmSettings {
    pub provider: LlmProvider,
    pub api_key: String,
    pub model: String,
    pub base_url: Option<String>,
    pub timeout_secs: u64,
    pub max_output_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    Gemini,
    #[serde(rename = "openai")]
    OpenAi,
    Mock,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    pub root: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerationSettings {
    pub max_input_tokens: usize,
    pub default_count: u32,
}

/// Idle sessions are dropped after `idle_ttl_secs`, checked every
/// `sweep_interval_secs`. The TTL should exceed `llm.timeout_secs`.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionSettings {
    pub idle_ttl_secs: u64,
    pub sweep_interval_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub json: bool,
}

impl Settings {
    /// Defaults, then `appsettings.<env>.toml`, then `APP_*` variables
    /// (`APP_LLM__API_KEY` sets `llm.api_key`).
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("server.max_upload_mb", 25)?
            .set_default("llm.provider", "gemini")?
            .set_default("llm.api_key", "")?
            .set_default("llm.model", "gemini-1.5-pro")?
            .set_default("llm.timeout_secs", 120)?
            .set_default("llm.max_output_tokens", 8192)?
            .set_default("llm.temperature", 0.7)?
            .set_default("storage.root", ".")?
            .set_default("generation.max_input_tokens", 100_000)?
            .set_default("generation.default_count", 5)?
            .set_default("sessions.idle_ttl_secs", 3600)?
            .set_default("sessions.sweep_interval_secs", 300)?
            .set_default("logging.level", "info")?
            .set_default("logging.json", false)?
            .add_source(
                File::with_name(&format!(
                    "appsettings.{}",
                    environment.as_str().to_lowercase()
                ))
                .required(false),
            )
            .add_source(
                EnvironmentSource::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
    }
}
