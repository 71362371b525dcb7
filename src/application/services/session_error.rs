use crate::application::ports::{
    ArtifactStoreError, FileLoaderError, LlmClientError, RenderError, RepositoryError,
};
use crate::domain::{SessionId, SessionTransitionError};

use super::ResultWriterError;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("session not found: {0}")]
    SessionNotFound(SessionId),
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),
    #[error("text extraction failed: {0}")]
    ExtractionFailure(FileLoaderError),
    #[error("generation service failed: {0}")]
    ServiceError(#[from] LlmClientError),
    #[error("pdf rendering failed: {0}")]
    RenderFailure(#[from] RenderError),
    #[error("{0}")]
    InvalidState(SessionTransitionError),
    #[error("an extraction or generation is already in progress for this session")]
    SessionBusy,
    #[error("no generated result in this session")]
    NoResult,
    #[error("artifact unavailable: {0}")]
    ArtifactUnavailable(String),
    #[error("storage: {0}")]
    Storage(#[from] ArtifactStoreError),
    #[error("session repository: {0}")]
    Repository(#[from] RepositoryError),
}

impl SessionError {
    /// Stable tag for API clients.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::SessionNotFound(_) => "session_not_found",
            Self::UnsupportedFormat(_) => "unsupported_format",
            Self::ExtractionFailure(_) => "extraction_failure",
            Self::ServiceError(_) => "service_error",
            Self::RenderFailure(_) => "render_failure",
            Self::InvalidState(_) => "invalid_state",
            Self::SessionBusy => "session_busy",
            Self::NoResult => "no_result",
            Self::ArtifactUnavailable(_) => "artifact_unavailable",
            Self::Storage(_) => "storage_error",
            Self::Repository(_) => "storage_error",
        }
    }

    pub fn is_retryable(&self) -> bool {
        match self {
            Self::ServiceError(e) => e.is_retryable(),
            Self::SessionBusy => true,
            _ => false,
        }
    }
}

impl From<SessionTransitionError> for SessionError {
    fn from(error: SessionTransitionError) -> Self {
        match error {
            SessionTransitionError::Busy => Self::SessionBusy,
            other => Self::InvalidState(other),
        }
    }
}

impl From<ResultWriterError> for SessionError {
    fn from(error: ResultWriterError) -> Self {
        match error {
            ResultWriterError::Storage(e) => Self::Storage(e),
            ResultWriterError::Render(e) => Self::RenderFailure(e),
        }
    }
}
