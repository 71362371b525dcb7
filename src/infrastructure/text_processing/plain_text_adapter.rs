use async_trait::async_trait;
use encoding_rs::WINDOWS_1252;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{ContentType, Document};

/// UTF-8 first, then a single ISO-8859-1 retry.
pub struct PlainTextAdapter;

impl PlainTextAdapter {
    fn decode(data: &[u8]) -> Result<String, FileLoaderError> {
        match String::from_utf8(data.to_vec()) {
            Ok(text) => Ok(text),
            Err(utf8_error) => {
                tracing::debug!(error = %utf8_error, "Not valid UTF-8, retrying as ISO-8859-1");
                // WHATWG maps the ISO-8859-1 label to windows-1252.
                let (text, had_errors) = WINDOWS_1252.decode_without_bom_handling(data);
                if had_errors {
                    return Err(FileLoaderError::ExtractionFailed(format!(
                        "not valid UTF-8 ({utf8_error}) or ISO-8859-1"
                    )));
                }
                Ok(text.into_owned())
            }
        }
    }
}

#[async_trait]
impl FileLoader for PlainTextAdapter {
    async fn extract_text(
        &self,
        data: &[u8],
        document: &Document,
    ) -> Result<String, FileLoaderError> {
        if document.content_type != ContentType::Text {
            return Err(FileLoaderError::UnsupportedContentType(
                document.content_type.as_mime().to_string(),
            ));
        }

        Self::decode(data)
    }
}
