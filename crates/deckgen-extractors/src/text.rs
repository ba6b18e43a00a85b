//! Raw text documents (e.g. pasted into a form).

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::{ExtractError, ExtractResult};
use crate::types::DocumentKind;
use crate::{non_empty, Document};

/// Document backed by text supplied directly by the caller.
#[derive(Debug, Clone)]
pub struct TextDocument {
    id: String,
    name: String,
    content: Vec<u8>,
}

impl TextDocument {
    /// Create a text document from a string.
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self::from_bytes(name, text.into().into_bytes())
    }

    /// Create a text document from raw bytes; decoding happens on parse.
    pub fn from_bytes(name: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            content,
        }
    }
}

#[async_trait]
impl Document for TextDocument {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> DocumentKind {
        DocumentKind::Text
    }

    async fn parsed_text(&self) -> ExtractResult<String> {
        let text = String::from_utf8(self.content.clone())
            .map_err(|e| ExtractError::ExtractionFailed(format!("text is not valid UTF-8: {}", e)))?;
        non_empty(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_text_document_returns_content() {
        let doc = TextDocument::new("notes", "Rust, Go, Kubernetes");
        assert_eq!(doc.parsed_text().await.unwrap(), "Rust, Go, Kubernetes");
        assert!(!doc.is_file());
    }

    #[tokio::test]
    async fn test_text_document_rejects_invalid_utf8() {
        let doc = TextDocument::from_bytes("bad", vec![0xff, 0xfe, 0xfd]);
        let result = doc.parsed_text().await;
        assert!(matches!(result, Err(ExtractError::ExtractionFailed(_))));
    }

    #[tokio::test]
    async fn test_text_document_rejects_blank() {
        let doc = TextDocument::new("blank", "   \n\t");
        assert!(matches!(doc.parsed_text().await, Err(ExtractError::EmptyContent)));
    }

    #[test]
    fn test_text_documents_get_distinct_ids() {
        let a = TextDocument::new("a", "x");
        let b = TextDocument::new("a", "x");
        assert_ne!(a.id(), b.id());
    }
}
