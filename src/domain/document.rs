use super::DocumentId;

/// Extensions accepted by the upload surface.
pub const ACCEPTED_EXTENSIONS: &[&str] = &["pdf", "txt", "docx"];

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: DocumentId,
    pub filename: String,
    pub content_type: ContentType,
    pub size_bytes: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    Pdf,
    Docx,
    Text,
    Unsupported,
}

impl ContentType {
    /// Extension-only detection; the bytes are never sniffed.
    pub fn from_filename(filename: &str) -> Self {
        match extension_of(filename) {
            Some(ext) => Self::from_extension(&ext),
            None => Self::Unsupported,
        }
    }

    pub fn from_extension(extension: &str) -> Self {
        match extension.to_lowercase().as_str() {
            "pdf" => Self::Pdf,
            "docx" => Self::Docx,
            "txt" => Self::Text,
            _ => Self::Unsupported,
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Unsupported)
    }

    pub fn as_mime(&self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Docx => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            Self::Text => "text/plain",
            Self::Unsupported => "application/octet-stream",
        }
    }
}

impl Document {
    pub fn new(filename: String, content_type: ContentType, size_bytes: u64) -> Self {
        Self {
            id: DocumentId::new(),
            filename,
            content_type,
            size_bytes,
        }
    }

    /// Drops any directory components the client sent along with the name.
    pub fn from_upload(filename: &str, size_bytes: u64) -> Self {
        let filename = filename
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(filename)
            .trim()
            .to_string();
        let content_type = ContentType::from_filename(&filename);
        Self::new(filename, content_type, size_bytes)
    }

    /// Filename with its last extension removed.
    pub fn basename(&self) -> &str {
        match self.filename.rsplit_once('.') {
            Some((stem, _)) => stem,
            None => &self.filename,
        }
    }

    pub fn extension(&self) -> Option<String> {
        extension_of(&self.filename)
    }

    /// Case-insensitive check of the extension alone.
    pub fn has_accepted_extension(&self) -> bool {
        self.extension()
            .is_some_and(|ext| ACCEPTED_EXTENSIONS.contains(&ext.as_str()))
    }
}

fn extension_of(filename: &str) -> Option<String> {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .filter(|ext| !ext.is_empty())
}
