use chrono::{DateTime, Utc};

use super::{
    ArtifactNames, Document, GeneratedContent, GenerationKind, ItemCount, SessionId, SessionState,
};

/// One user's interaction: the current document, its text and the latest result.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: SessionId,
    pub state: SessionState,
    pub document: Option<Document>,
    pub extracted_text: Option<String>,
    pub result: Option<GenerationResult>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub kind: GenerationKind,
    pub count: ItemCount,
    pub content: GeneratedContent,
    pub artifacts: ArtifactNames,
    pub pdf_available: bool,
    pub generated_at: DateTime<Utc>,
}

impl GenerationResult {
    pub fn matches(&self, kind: GenerationKind, count: ItemCount) -> bool {
        self.kind == kind && self.count == count
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionTransitionError {
    #[error("an extraction or generation is already in progress")]
    Busy,
    #[error("cannot {action} while session is {from}")]
    InvalidTransition {
        from: SessionState,
        action: &'static str,
    },
}

impl Session {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: SessionId::new(),
            state: SessionState::Idle,
            document: None,
            extracted_text: None,
            result: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// A new document always discards the previous text and result.
    pub fn begin_upload(&mut self, document: Document) -> Result<(), SessionTransitionError> {
        self.ensure_not_busy()?;
        self.document = Some(document);
        self.extracted_text = None;
        self.result = None;
        self.transition(SessionState::Uploaded);
        Ok(())
    }

    pub fn complete_extraction(&mut self, text: String) -> Result<(), SessionTransitionError> {
        self.ensure_state(&[SessionState::Uploaded], "complete extraction")?;
        self.extracted_text = Some(text);
        self.transition(SessionState::Extracted);
        Ok(())
    }

    pub fn fail_extraction(&mut self) -> Result<(), SessionTransitionError> {
        self.ensure_state(&[SessionState::Uploaded], "fail extraction")?;
        self.document = None;
        self.extracted_text = None;
        self.transition(SessionState::Idle);
        Ok(())
    }

    pub fn begin_generation(&mut self) -> Result<(), SessionTransitionError> {
        self.ensure_not_busy()?;
        self.ensure_state(
            &[SessionState::Extracted, SessionState::Ready],
            "generate",
        )?;
        self.transition(SessionState::Generating);
        Ok(())
    }

    pub fn begin_regeneration(&mut self) -> Result<(), SessionTransitionError> {
        self.ensure_not_busy()?;
        self.ensure_state(&[SessionState::Ready], "regenerate")?;
        self.transition(SessionState::Regenerating);
        Ok(())
    }

    pub fn complete_generation(
        &mut self,
        result: GenerationResult,
    ) -> Result<(), SessionTransitionError> {
        self.ensure_state(
            &[SessionState::Generating, SessionState::Regenerating],
            "complete generation",
        )?;
        self.result = Some(result);
        self.transition(SessionState::Ready);
        Ok(())
    }

    /// Returns to `Ready` when a previous result exists, `Extracted` otherwise.
    pub fn abort_generation(&mut self) -> Result<(), SessionTransitionError> {
        self.ensure_state(
            &[SessionState::Generating, SessionState::Regenerating],
            "abort generation",
        )?;
        let next = if self.result.is_some() {
            SessionState::Ready
        } else {
            SessionState::Extracted
        };
        self.transition(next);
        Ok(())
    }

    fn ensure_not_busy(&self) -> Result<(), SessionTransitionError> {
        if self.state.is_busy() {
            return Err(SessionTransitionError::Busy);
        }
        Ok(())
    }

    fn ensure_state(
        &self,
        allowed: &[SessionState],
        action: &'static str,
    ) -> Result<(), SessionTransitionError> {
        if allowed.contains(&self.state) {
            Ok(())
        } else {
            Err(SessionTransitionError::InvalidTransition {
                from: self.state,
                action,
            })
        }
    }

    fn transition(&mut self, next: SessionState) {
        tracing::debug!(
            session_id = %self.id,
            from = %self.state,
            to = %next,
            "Session state transition"
        );
        self.state = next;
        self.updated_at = Utc::now();
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
