//! Core types for document extraction.

use serde::{Deserialize, Serialize};

use crate::error::ExtractResult;
use crate::Document;

/// Format of an uploaded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    /// Plain text content.
    #[default]
    Text,
    /// PDF document.
    Pdf,
    /// Microsoft Word document.
    Docx,
}

impl DocumentKind {
    /// Get the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Text => "text",
            DocumentKind::Pdf => "pdf",
            DocumentKind::Docx => "docx",
        }
    }
}

/// A document whose text has already been extracted.
///
/// Providers only ever see this form, so parsing failures surface before any
/// provider is contacted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedDocument {
    /// Identifier of the source document.
    pub id: String,
    /// Original name of the source document.
    pub name: String,
    /// Format of the source document.
    pub kind: DocumentKind,
    /// Extracted plain text.
    pub text: String,
}

impl ParsedDocument {
    /// Run the document's parsing step and capture the result.
    pub async fn from_document(document: &dyn Document) -> ExtractResult<Self> {
        let text = document.parsed_text().await?;
        tracing::debug!(
            document_id = document.id(),
            name = document.name(),
            kind = document.kind().as_str(),
            chars = text.len(),
            "Document parsed"
        );
        Ok(Self {
            id: document.id().to_string(),
            name: document.name().to_string(),
            kind: document.kind(),
            text,
        })
    }

    /// Build a parsed document directly from text (tests, raw-text uploads).
    pub fn from_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            kind: DocumentKind::Text,
            text: text.into(),
        }
    }
}
