use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::Document;

/// Decodes bytes as UTF-8 regardless of content type, or fails on demand.
#[derive(Default)]
pub struct MockFileLoader {
    fail_with_unsupported: bool,
    delay: Duration,
    calls: AtomicUsize,
}

impl MockFileLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unsupported() -> Self {
        Self {
            fail_with_unsupported: true,
            ..Self::default()
        }
    }

    /// Holds every extraction for `delay` before answering.
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl FileLoader for MockFileLoader {
    async fn extract_text(&self, data: &[u8], doc: &Document) -> Result<String, FileLoaderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self.fail_with_unsupported || !doc.content_type.is_supported() {
            return Err(FileLoaderError::UnsupportedContentType(
                doc.content_type.as_mime().to_string(),
            ));
        }
        String::from_utf8(data.to_vec())
            .map_err(|e| FileLoaderError::ExtractionFailed(e.to_string()))
    }
}
