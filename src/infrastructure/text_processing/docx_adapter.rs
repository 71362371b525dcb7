use std::io::{BufReader, Cursor, Read};

use async_trait::async_trait;
use quick_xml::events::Event;
use quick_xml::reader::Reader;
use zip::ZipArchive;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{ContentType, Document};

const DOCUMENT_XML: &str = "word/document.xml";

/// Body paragraphs of a Word document, joined with single spaces.
///
/// Only direct children of `w:body` are read, so table cells, text boxes,
/// headers and footers are not part of the result.
#[derive(Default)]
pub struct DocxAdapter;

impl DocxAdapter {
    pub fn new() -> Self {
        Self
    }

    fn extract_paragraphs(data: &[u8]) -> Result<Vec<String>, FileLoaderError> {
        let mut archive = ZipArchive::new(Cursor::new(data)).map_err(|e| {
            FileLoaderError::ExtractionFailed(format!("failed to open DOCX archive: {e}"))
        })?;

        let document = archive.by_name(DOCUMENT_XML).map_err(|e| {
            FileLoaderError::ExtractionFailed(format!("missing {DOCUMENT_XML}: {e}"))
        })?;

        parse_body_paragraphs(BufReader::new(document))
    }
}

fn parse_body_paragraphs<R: Read>(reader: BufReader<R>) -> Result<Vec<String>, FileLoaderError> {
    let mut xml = Reader::from_reader(reader);
    let mut buf = Vec::with_capacity(1024);

    let mut stack: Vec<Vec<u8>> = Vec::new();
    let mut paragraphs = Vec::new();
    let mut current: Option<String> = None;

    loop {
        let event = xml.read_event_into(&mut buf).map_err(|e| {
            FileLoaderError::ExtractionFailed(format!(
                "malformed {DOCUMENT_XML} at byte {}: {e}",
                xml.buffer_position()
            ))
        })?;

        match event {
            Event::Start(e) => {
                let name = e.local_name().as_ref().to_vec();
                if name == b"p" && parent_is_body(&stack) {
                    current = Some(String::new());
                }
                stack.push(name);
            }
            Event::Empty(e) => {
                let name = e.local_name();
                match name.as_ref() {
                    b"p" if parent_is_body(&stack) => paragraphs.push(String::new()),
                    b"tab" => push_char(&mut current, &stack, '\t'),
                    b"br" | b"cr" => push_char(&mut current, &stack, '\n'),
                    _ => {}
                }
            }
            Event::Text(e) => {
                if stack.last().is_some_and(|n| n == b"t") {
                    if let Some(paragraph) = current.as_mut() {
                        let text = e.unescape().map_err(|e| {
                            FileLoaderError::ExtractionFailed(format!("bad text run: {e}"))
                        })?;
                        paragraph.push_str(&text);
                    }
                }
            }
            Event::End(e) => {
                stack.pop();
                if e.local_name().as_ref() == b"p" && parent_is_body(&stack) {
                    if let Some(paragraph) = current.take() {
                        paragraphs.push(paragraph);
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(paragraphs)
}

fn parent_is_body(stack: &[Vec<u8>]) -> bool {
    stack.last().is_some_and(|n| n == b"body")
}

// Tabs and breaks only count inside a run of a body paragraph.
fn push_char(current: &mut Option<String>, stack: &[Vec<u8>], ch: char) {
    if stack.last().is_some_and(|n| n == b"r") {
        if let Some(paragraph) = current.as_mut() {
            paragraph.push(ch);
        }
    }
}

#[async_trait]
impl FileLoader for DocxAdapter {
    #[tracing::instrument(
        skip(self, data),
        fields(
            document_id = %document.id.as_uuid(),
            filename = %document.filename,
        )
    )]
    async fn extract_text(
        &self,
        data: &[u8],
        document: &Document,
    ) -> Result<String, FileLoaderError> {
        if document.content_type != ContentType::Docx {
            return Err(FileLoaderError::UnsupportedContentType(
                document.content_type.as_mime().to_string(),
            ));
        }

        let owned = data.to_vec();
        let paragraphs = tokio::task::spawn_blocking(move || Self::extract_paragraphs(&owned))
            .await
            .map_err(|e| FileLoaderError::ExtractionFailed(format!("task join error: {e}")))??;

        tracing::info!(paragraph_count = paragraphs.len(), "DOCX text extraction complete");

        Ok(paragraphs.join(" "))
    }
}
