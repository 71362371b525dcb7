mod artifact_store;
mod file_loader;
mod llm_client;
mod pdf_renderer;
mod repository_error;
mod session_repository;

pub use artifact_store::{ArtifactStore, ArtifactStoreError};
pub use file_loader::{FileLoader, FileLoaderError};
pub use llm_client::{LlmClient, LlmClientError};
pub use pdf_renderer::{PdfRenderer, RenderError};
pub use repository_error::RepositoryError;
pub use session_repository::SessionRepository;
