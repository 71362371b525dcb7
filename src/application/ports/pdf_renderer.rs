/// Lays out generated sections as a paginated PDF.
pub trait PdfRenderer: Send + Sync {
    fn render(&self, sections: &[&str]) -> Result<Vec<u8>, RenderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("character {0:?} cannot be rendered with the built-in font")]
    UnsupportedCharacter(char),
    #[error("pdf encoding failed: {0}")]
    EncodingFailed(String),
}
