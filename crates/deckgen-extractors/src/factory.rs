//! Factory for turning uploads into documents.

use std::path::Path;
use std::sync::Arc;

use crate::error::{ExtractError, ExtractResult};
use crate::text::TextDocument;
use crate::Document;

#[cfg(feature = "pdf")]
use crate::PdfDocument;

#[cfg(feature = "docx")]
use crate::DocxDocument;

const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Factory for creating documents from uploaded content.
pub struct DocumentFactory;

impl DocumentFactory {
    /// Create a document for an upload.
    ///
    /// The declared content type wins when it is specific; generic types
    /// (`application/octet-stream`) or a missing type fall back to the file
    /// extension.
    pub fn from_upload(
        name: &str,
        content_type: Option<&str>,
        content: Vec<u8>,
    ) -> ExtractResult<Arc<dyn Document>> {
        let mime = content_type
            .map(|ct| ct.split(';').next().unwrap_or(ct).trim().to_ascii_lowercase())
            .filter(|ct| !ct.is_empty() && ct != "application/octet-stream");

        match mime {
            Some(mime) => Self::for_mime_type(&mime, name, content),
            None => Self::for_extension(name, content),
        }
    }

    /// Create a document for a given MIME type.
    pub fn for_mime_type(
        mime_type: &str,
        name: &str,
        content: Vec<u8>,
    ) -> ExtractResult<Arc<dyn Document>> {
        match mime_type {
            "text/plain" | "text/markdown" => Ok(Arc::new(TextDocument::from_bytes(name, content))),

            #[cfg(feature = "pdf")]
            "application/pdf" => Ok(Arc::new(PdfDocument::new(name, content))),

            #[cfg(feature = "docx")]
            DOCX_MIME | "application/docx" => Ok(Arc::new(DocxDocument::new(name, content))),

            _ => Err(ExtractError::UnsupportedType(mime_type.to_string())),
        }
    }

    /// Create a document based on the file extension of `name`.
    pub fn for_extension(name: &str, content: Vec<u8>) -> ExtractResult<Arc<dyn Document>> {
        let ext = Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("txt" | "md") => Self::for_mime_type("text/plain", name, content),
            Some("pdf") => Self::for_mime_type("application/pdf", name, content),
            Some("docx") => Self::for_mime_type(DOCX_MIME, name, content),
            Some(other) => Err(ExtractError::UnsupportedType(format!(".{}", other))),
            None => Err(ExtractError::UnsupportedType(format!(
                "'{}' has no extension and no content type",
                name
            ))),
        }
    }

    /// List all MIME types this build can handle.
    #[allow(clippy::vec_init_then_push)]
    pub fn supported_types() -> Vec<&'static str> {
        let mut types = vec!["text/plain", "text/markdown"];

        #[cfg(feature = "pdf")]
        types.push("application/pdf");

        #[cfg(feature = "docx")]
        types.push(DOCX_MIME);

        types
    }
}
