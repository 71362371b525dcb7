pub mod bootstrap;
pub mod config;
pub mod handlers;
pub mod router;
pub mod state;

pub use bootstrap::build_controller;
pub use config::{
    Environment, GenerationSettings, LlmProvider, LlmSettings, LoggingSettings, ScaffoldConfig,
    ServerSettings, SessionSettings, Settings, StorageSettings,
};
pub use router::create_router;
pub use state::AppState;
