use quizzybee::application::ports::{FileLoader, FileLoaderError};
use quizzybee::domain::Document;
use quizzybee::infrastructure::text_processing::DocxAdapter;

#[tokio::test]
async fn given_docx_fixture_when_loading_then_body_paragraphs_joined_with_spaces() {
    let data = include_bytes!("../../fixtures/sample.docx");
    let document = Document::from_upload("sample.docx", data.len() as u64);

    let text = DocxAdapter::new().extract_text(data, &document).await.unwrap();

    assert_eq!(
        text,
        "The cell is the basic unit of life. Mitochondria produce ATP. Ribosomes build proteins."
    );
    assert!(!text.contains("Table cell text"));
}

#[tokio::test]
async fn given_bytes_that_are_not_a_zip_when_loading_then_extraction_failed() {
    let document = Document::from_upload("broken.docx", 4);

    let result = DocxAdapter::new().extract_text(b"nope", &document).await;

    assert!(matches!(result, Err(FileLoaderError::ExtractionFailed(_))));
}

#[tokio::test]
async fn given_txt_document_when_loading_with_docx_adapter_then_unsupported() {
    let document = Document::from_upload("notes.txt", 4);

    let result = DocxAdapter::new().extract_text(b"text", &document).await;

    assert!(matches!(result, Err(FileLoaderError::UnsupportedContentType(_))));
}
