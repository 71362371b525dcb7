use std::sync::Arc;

use bytes::Bytes;

use crate::application::ports::{ArtifactStore, ArtifactStoreError, PdfRenderer, RenderError};
use crate::domain::{ArtifactNames, GeneratedContent, GenerationResult, StoragePath};

/// Persists a generation result as `.txt` and `.pdf` under `results/`.
pub struct ResultWriter {
    store: Arc<dyn ArtifactStore>,
    renderer: Arc<dyn PdfRenderer>,
}

impl ResultWriter {
    pub fn new(store: Arc<dyn ArtifactStore>, renderer: Arc<dyn PdfRenderer>) -> Self {
        Self { store, renderer }
    }

    pub async fn write_text(
        &self,
        content: &GeneratedContent,
        filename: &str,
    ) -> Result<StoragePath, ResultWriterError> {
        let path = StoragePath::result(filename);
        let data = Bytes::copy_from_slice(content.as_str().as_bytes());
        let written = self.store.put(&path, data).await?;
        tracing::debug!(path = %path, bytes = written, "Text artifact written");
        Ok(path)
    }

    /// One text block per non-blank `##` section, in order.
    pub fn render_pdf(&self, content: &GeneratedContent) -> Result<Vec<u8>, RenderError> {
        self.renderer.render(&content.sections())
    }

    pub async fn write_pdf(
        &self,
        content: &GeneratedContent,
        filename: &str,
    ) -> Result<StoragePath, ResultWriterError> {
        let pdf = self.render_pdf(content)?;
        self.write_rendered_pdf(pdf, filename).await
    }

    pub async fn write_rendered_pdf(
        &self,
        pdf: Vec<u8>,
        filename: &str,
    ) -> Result<StoragePath, ResultWriterError> {
        let path = StoragePath::result(filename);
        let written = self.store.put(&path, Bytes::from(pdf)).await?;
        tracing::debug!(path = %path, bytes = written, "PDF artifact written");
        Ok(path)
    }

    /// Writes the text artifact, then the pre-rendered PDF. Without a PDF any
    /// older one under the same name is removed.
    pub async fn persist(
        &self,
        content: &GeneratedContent,
        pdf: Option<Vec<u8>>,
        artifacts: &ArtifactNames,
    ) -> Result<(), ResultWriterError> {
        self.write_text(content, &artifacts.txt_filename).await?;
        match pdf {
            Some(pdf) => {
                self.write_rendered_pdf(pdf, &artifacts.pdf_filename)
                    .await?;
            }
            None => {
                if let Err(e) = self.remove(&artifacts.pdf_filename).await {
                    tracing::debug!(error = %e, "No stale PDF artifact to remove");
                }
            }
        }
        Ok(())
    }

    /// Puts the artifacts of `previous` back after a failed overwrite.
    pub async fn restore(&self, previous: &GenerationResult) {
        let pdf = if previous.pdf_available {
            match self.render_pdf(&previous.content) {
                Ok(pdf) => Some(pdf),
                Err(e) => {
                    tracing::error!(error = %e, "Previous PDF artifact could not be rendered");
                    return;
                }
            }
        } else {
            None
        };

        match self.persist(&previous.content, pdf, &previous.artifacts).await {
            Ok(()) => tracing::info!(
                txt = %previous.artifacts.txt_filename,
                "Previous artifacts restored"
            ),
            Err(e) => tracing::error!(
                error = %e,
                txt = %previous.artifacts.txt_filename,
                "Failed to restore previous artifacts"
            ),
        }
    }

    pub async fn read(&self, filename: &str) -> Result<Vec<u8>, ResultWriterError> {
        Ok(self.store.fetch(&StoragePath::result(filename)).await?)
    }

    pub async fn remove(&self, filename: &str) -> Result<(), ResultWriterError> {
        Ok(self.store.delete(&StoragePath::result(filename)).await?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ResultWriterError {
    #[error("storage: {0}")]
    Storage(#[from] ArtifactStoreError),
    #[error("render: {0}")]
    Render(#[from] RenderError),
}
