//! deckgen-extractors - Document-to-text extraction for deckgen uploads.
//!
//! Every uploaded job ad or resume is wrapped in a [`Document`]: it carries a
//! unique identifier, the original name, and a plain-text representation that
//! is produced on demand by a parsing step which may fail.
//!
//! # Features
//!
//! - `pdf` (default) - PDF text extraction via pdf-extract
//! - `docx` (default) - DOCX text extraction via docx-rs
//! - `full` - All extraction features
//!
//! # Example
//!
//! ```ignore
//! use deckgen_extractors::{Document, DocumentFactory, ParsedDocument};
//!
//! let document = DocumentFactory::from_upload("resume.pdf", Some("application/pdf"), bytes)?;
//! let parsed = ParsedDocument::from_document(document.as_ref()).await?;
//! println!("{}: {} chars", parsed.name, parsed.text.len());
//! ```

mod error;
mod factory;
mod text;
mod types;

#[cfg(feature = "pdf")]
mod pdf;

#[cfg(feature = "docx")]
mod docx;

pub use error::{ExtractError, ExtractResult};
pub use factory::DocumentFactory;
pub use text::TextDocument;
pub use types::{DocumentKind, ParsedDocument};

#[cfg(feature = "pdf")]
pub use pdf::PdfDocument;

#[cfg(feature = "docx")]
pub use docx::DocxDocument;

use async_trait::async_trait;

/// Core Document trait - every uploaded source implements this.
#[async_trait]
pub trait Document: Send + Sync {
    /// Unique identifier assigned when the document was received.
    fn id(&self) -> &str;

    /// Original name (file name or caller-supplied label).
    fn name(&self) -> &str;

    /// Format of the underlying content.
    fn kind(&self) -> DocumentKind;

    /// Whether the document came from an uploaded file rather than raw text.
    fn is_file(&self) -> bool {
        self.kind() != DocumentKind::Text
    }

    /// Produce the plain-text representation of the document.
    async fn parsed_text(&self) -> ExtractResult<String>;
}

/// Reject text that carries no content once whitespace is stripped.
pub(crate) fn non_empty(text: String) -> ExtractResult<String> {
    if text.trim().is_empty() {
        return Err(ExtractError::EmptyContent);
    }
    Ok(text)
}
