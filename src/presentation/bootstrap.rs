use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;

use crate::application::services::{
    GenerationService, PromptBuilder, ResultWriter, SessionController,
};
use crate::infrastructure::llm::LlmClientFactory;
use crate::infrastructure::persistence::InMemorySessionRepository;
use crate::infrastructure::rendering::LopdfRenderer;
use crate::infrastructure::storage::LocalArtifactStore;
use crate::infrastructure::text_processing::CompositeFileLoader;
use crate::presentation::config::{ScaffoldConfig, Settings};

/// Wires the production adapters behind a `SessionController`. Shared by the
/// server and the CLI.
pub fn build_controller(
    settings: &Settings,
    scaffold: &ScaffoldConfig,
) -> anyhow::Result<Arc<SessionController>> {
    let llm_client = LlmClientFactory::create(&settings.llm, scaffold)
        .context("Failed to initialize generation client")?;

    let store = Arc::new(
        LocalArtifactStore::new(PathBuf::from(&settings.storage.root))
            .context("Failed to open storage root")?,
    );

    let generation = GenerationService::new(
        llm_client,
        PromptBuilder::new(settings.generation.max_input_tokens),
        Duration::from_secs(settings.llm.timeout_secs),
    );
    let writer = ResultWriter::new(store.clone(), Arc::new(LopdfRenderer::new()));

    tracing::info!(
        scaffold = scaffold.enabled,
        model = %settings.llm.model,
        storage_root = %settings.storage.root,
        "Session controller ready"
    );

    Ok(Arc::new(SessionController::new(
        Arc::new(InMemorySessionRepository::new()),
        Arc::new(CompositeFileLoader::with_default_adapters()),
        store,
        generation,
        writer,
    )))
}
