use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    Idle,
    Uploaded,
    Extracted,
    Generating,
    Ready,
    Regenerating,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::Idle => "IDLE",
            SessionState::Uploaded => "UPLOADED",
            SessionState::Extracted => "EXTRACTED",
            SessionState::Generating => "GENERATING",
            SessionState::Ready => "READY",
            SessionState::Regenerating => "REGENERATING",
        }
    }

    /// An extraction or a remote generation is in flight.
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            SessionState::Uploaded | SessionState::Generating | SessionState::Regenerating
        )
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
