//! PDF documents parsed with pdf-extract.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::{ExtractError, ExtractResult};
use crate::types::DocumentKind;
use crate::{non_empty, Document};

/// Uploaded PDF file.
///
/// pdf-extract is synchronous and may panic on malformed input, so parsing
/// runs inside spawn_blocking; a panic surfaces as [`ExtractError::TaskJoin`].
#[derive(Debug, Clone)]
pub struct PdfDocument {
    id: String,
    name: String,
    content: Vec<u8>,
}

impl PdfDocument {
    /// Create a PDF document from a file name and its bytes.
    pub fn new(name: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            content,
        }
    }

    fn extract_sync(content: &[u8]) -> ExtractResult<String> {
        pdf_extract::extract_text_from_mem(content)
            .map_err(|e| ExtractError::Pdf(format!("could not read pdf: {}", e)))
    }
}

#[async_trait]
impl Document for PdfDocument {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> DocumentKind {
        DocumentKind::Pdf
    }

    async fn parsed_text(&self) -> ExtractResult<String> {
        if self.content.is_empty() {
            return Err(ExtractError::EmptyContent);
        }
        let content = self.content.clone();
        let text = tokio::task::spawn_blocking(move || Self::extract_sync(&content)).await??;
        non_empty(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_pdf_document_empty_content() {
        let doc = PdfDocument::new("empty.pdf", Vec::new());
        assert!(matches!(doc.parsed_text().await, Err(ExtractError::EmptyContent)));
    }

    #[tokio::test]
    async fn test_pdf_document_malformed_content() {
        let doc = PdfDocument::new("broken.pdf", b"definitely not a pdf".to_vec());
        assert!(doc.parsed_text().await.is_err());
    }

    #[test]
    fn test_pdf_document_metadata() {
        let doc = PdfDocument::new("cv.pdf", vec![1, 2, 3]);
        assert_eq!(doc.name(), "cv.pdf");
        assert_eq!(doc.kind(), DocumentKind::Pdf);
        assert!(doc.is_file());
    }
}
