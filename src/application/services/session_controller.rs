use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use chrono::Utc;
use tokio::sync::Mutex;

use crate::application::ports::{ArtifactStore, FileLoader, FileLoaderError, SessionRepository};
use crate::domain::{
    ArtifactNames, Document, GenerationKind, GenerationRequest, GenerationResult, ItemCount,
    Session, SessionId, SessionState, SessionTransitionError, StoragePath,
};

use super::{GenerationService, ResultWriter, SessionError};

/// Drives one session through upload, extraction, generation and download.
pub struct SessionController {
    sessions: Arc<dyn SessionRepository>,
    file_loader: Arc<dyn FileLoader>,
    store: Arc<dyn ArtifactStore>,
    generation: GenerationService,
    writer: ResultWriter,
    // Serialises load-transition-save; never held across the remote call.
    transition_lock: Mutex<()>,
}

#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    pub session: Session,
    pub cached: bool,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadFormat {
    Txt,
    Pdf,
}

impl DownloadFormat {
    pub fn as_mime(&self) -> &'static str {
        match self {
            DownloadFormat::Txt => "text/plain; charset=utf-8",
            DownloadFormat::Pdf => "application/pdf",
        }
    }
}

impl FromStr for DownloadFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "txt" => Ok(DownloadFormat::Txt),
            "pdf" => Ok(DownloadFormat::Pdf),
            other => Err(format!("Invalid download format: {}. Expected: txt or pdf", other)),
        }
    }
}

impl fmt::Display for DownloadFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DownloadFormat::Txt => f.write_str("txt"),
            DownloadFormat::Pdf => f.write_str("pdf"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Download {
    pub filename: String,
    pub content_type: &'static str,
    pub data: Vec<u8>,
}

impl SessionController {
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        file_loader: Arc<dyn FileLoader>,
        store: Arc<dyn ArtifactStore>,
        generation: GenerationService,
        writer: ResultWriter,
    ) -> Self {
        Self {
            sessions,
            file_loader,
            store,
            generation,
            writer,
            transition_lock: Mutex::new(()),
        }
    }

    pub async fn create_session(&self) -> Result<SessionId, SessionError> {
        let session = Session::new();
        self.sessions.create(&session).await?;
        tracing::info!(session_id = %session.id, "Session created");
        Ok(session.id)
    }

    pub async fn get(&self, id: SessionId) -> Result<Session, SessionError> {
        self.sessions
            .get(id)
            .await?
            .ok_or(SessionError::SessionNotFound(id))
    }

    /// Persists the upload, then extracts its text. A failed extraction
    /// returns the session to `Idle` and never reaches generation.
    #[tracing::instrument(skip(self, data), fields(session_id = %id, bytes = data.len()))]
    pub async fn upload(
        &self,
        id: SessionId,
        filename: &str,
        data: Bytes,
    ) -> Result<Session, SessionError> {
        let document = Document::from_upload(filename, data.len() as u64);

        {
            let _guard = self.transition_lock.lock().await;
            let mut session = self.get(id).await?;
            session.begin_upload(document.clone())?;
            self.sessions.save(&session).await?;
        }

        if !document.has_accepted_extension() {
            tracing::warn!(filename = %document.filename, "Upload rejected, extension not accepted");
            self.update(id, |s| s.fail_extraction()).await?;
            return Err(SessionError::UnsupportedFormat(document.filename.clone()));
        }

        let path = StoragePath::upload(&document.filename);
        if let Err(e) = self.store.put(&path, data.clone()).await {
            self.update(id, |s| s.fail_extraction()).await?;
            return Err(e.into());
        }
        tracing::info!(path = %path, filename = %document.filename, "Upload persisted");

        let extracted = self.extract(&document, &data).await;

        match extracted {
            Ok(text) => {
                tracing::info!(chars = text.chars().count(), "Text extracted");
                self.update(id, move |s| s.complete_extraction(text)).await
            }
            Err(error) => {
                tracing::warn!(error = %error, filename = %document.filename, "Extraction halted");
                self.update(id, |s| s.fail_extraction()).await?;
                Err(match error {
                    FileLoaderError::UnsupportedContentType(_) => {
                        SessionError::UnsupportedFormat(document.filename.clone())
                    }
                    other => SessionError::ExtractionFailure(other),
                })
            }
        }
    }

    async fn extract(&self, document: &Document, data: &[u8]) -> Result<String, FileLoaderError> {
        let text = self.file_loader.extract_text(data, document).await?;
        if text.trim().is_empty() {
            return Err(FileLoaderError::NoTextFound(document.filename.clone()));
        }
        Ok(text)
    }

    /// Returns the stored result when one already exists for the same kind and
    /// count; otherwise calls the generation service.
    #[tracing::instrument(skip_all, fields(session_id = %id, kind = %kind, count = count.get()))]
    pub async fn generate(
        &self,
        id: SessionId,
        kind: GenerationKind,
        count: ItemCount,
    ) -> Result<GenerationOutcome, SessionError> {
        let session = {
            let _guard = self.transition_lock.lock().await;
            let mut session = self.get(id).await?;

            if session.state == SessionState::Ready
                && session
                    .result
                    .as_ref()
                    .is_some_and(|r| r.matches(kind, count))
            {
                tracing::debug!("Returning stored result");
                return Ok(GenerationOutcome {
                    session,
                    cached: true,
                    warnings: Vec::new(),
                });
            }

            session.begin_generation()?;
            self.sessions.save(&session).await?;
            session
        };

        self.run_generation(session, kind, count).await
    }

    /// Re-runs the last request with the same text, kind and count. On failure
    /// the previous result stays in place.
    #[tracing::instrument(skip(self), fields(session_id = %id))]
    pub async fn regenerate(&self, id: SessionId) -> Result<GenerationOutcome, SessionError> {
        let (session, kind, count) = {
            let _guard = self.transition_lock.lock().await;
            let mut session = self.get(id).await?;
            let (kind, count) = match &session.result {
                Some(result) => (result.kind, result.count),
                None => return Err(SessionError::NoResult),
            };
            session.begin_regeneration()?;
            self.sessions.save(&session).await?;
            (session, kind, count)
        };

        self.run_generation(session, kind, count).await
    }

    pub async fn download(
        &self,
        id: SessionId,
        format: DownloadFormat,
    ) -> Result<Download, SessionError> {
        let session = self.get(id).await?;
        let result = session.result.as_ref().ok_or(SessionError::NoResult)?;

        let filename = match format {
            DownloadFormat::Txt => result.artifacts.txt_filename.clone(),
            DownloadFormat::Pdf if result.pdf_available => result.artifacts.pdf_filename.clone(),
            DownloadFormat::Pdf => {
                return Err(SessionError::ArtifactUnavailable(
                    result.artifacts.pdf_filename.clone(),
                ));
            }
        };

        let data = self.writer.read(&filename).await?;
        Ok(Download {
            filename,
            content_type: format.as_mime(),
            data,
        })
    }

    /// Drops sessions untouched for longer than `max_idle`. Artifacts on disk
    /// are shared by name and stay in place.
    pub async fn evict_idle(&self, max_idle: Duration) -> Result<usize, SessionError> {
        let Some(cutoff) = chrono::Duration::from_std(max_idle)
            .ok()
            .and_then(|idle| Utc::now().checked_sub_signed(idle))
        else {
            return Ok(0);
        };

        let _guard = self.transition_lock.lock().await;
        let evicted = self.sessions.remove_idle(cutoff).await?;
        for id in &evicted {
            tracing::debug!(session_id = %id, "Idle session evicted");
        }
        Ok(evicted.len())
    }

    pub fn artifact_path(&self, filename: &str) -> Option<std::path::PathBuf> {
        self.store.local_path(&StoragePath::result(filename))
    }

    async fn run_generation(
        &self,
        session: Session,
        kind: GenerationKind,
        count: ItemCount,
    ) -> Result<GenerationOutcome, SessionError> {
        let id = session.id;
        let prepared = match (&session.document, &session.extracted_text) {
            (Some(document), Some(text)) => Ok((document.clone(), text.clone())),
            _ => Err(SessionError::InvalidState(
                SessionTransitionError::InvalidTransition {
                    from: session.state,
                    action: "generate without extracted text",
                },
            )),
        };

        let outcome = match prepared {
            Ok((document, text)) => {
                self.generate_and_persist(&document, text, kind, count, session.result.as_ref())
                    .await
            }
            Err(e) => Err(e),
        };

        match outcome {
            Ok((result, warnings)) => {
                let session = self
                    .update(id, move |s| s.complete_generation(result))
                    .await?;
                Ok(GenerationOutcome {
                    session,
                    cached: false,
                    warnings,
                })
            }
            Err(error) => {
                tracing::warn!(error = %error, "Generation failed");
                self.update(id, |s| s.abort_generation()).await?;
                Err(error)
            }
        }
    }

    async fn generate_and_persist(
        &self,
        document: &Document,
        text: String,
        kind: GenerationKind,
        count: ItemCount,
        previous: Option<&GenerationResult>,
    ) -> Result<(GenerationResult, Vec<String>), SessionError> {
        let request = GenerationRequest::new(text, kind, count);
        let content = self.generation.generate(&request).await?;
        let artifacts = ArtifactNames::for_document(kind, document);

        let mut warnings = Vec::new();
        let pdf = match self.writer.render_pdf(&content) {
            Ok(pdf) => Some(pdf),
            Err(e) => {
                tracing::warn!(error = %e, "PDF rendering failed, text result kept");
                warnings.push(format!("PDF download unavailable: {e}"));
                None
            }
        };
        let pdf_available = pdf.is_some();

        if let Err(error) = self.writer.persist(&content, pdf, &artifacts).await {
            // The session keeps `previous`, so its files must match it again.
            if let Some(previous) = previous.filter(|p| p.artifacts == artifacts) {
                self.writer.restore(previous).await;
            }
            return Err(error.into());
        }

        Ok((
            GenerationResult {
                kind,
                count,
                content,
                artifacts,
                pdf_available,
                generated_at: Utc::now(),
            },
            warnings,
        ))
    }

    async fn update<F>(&self, id: SessionId, apply: F) -> Result<Session, SessionError>
    where
        F: FnOnce(&mut Session) -> Result<(), SessionTransitionError>,
    {
        let _guard = self.transition_lock.lock().await;
        let mut session = self.get(id).await?;
        apply(&mut session)?;
        self.sessions.save(&session).await?;
        Ok(session)
    }
}
