//! Multipart upload parsing shared by the extraction endpoints.

use std::sync::Arc;

use axum::extract::Multipart;
use deckgen_core::DeckgenError;
use deckgen_extractors::{Document, DocumentFactory};

use crate::error::{ApiError, ApiResult};

/// A document upload plus the provider chosen to process it.
pub struct Upload {
    pub document: Arc<dyn Document>,
    pub provider: String,
}

/// Read the `file` and `provider` fields; other fields are ignored.
pub async fn read_upload(mut multipart: Multipart) -> ApiResult<Upload> {
    let mut file = None;
    let mut provider = None;

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().map(str::to_string);
        match field_name.as_deref() {
            Some("file") => {
                let name = field.file_name().unwrap_or("upload").to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await?;
                file = Some((name, content_type, bytes.to_vec()));
            }
            Some("provider") => provider = Some(field.text().await?.trim().to_string()),
            _ => {}
        }
    }

    let (name, content_type, bytes) =
        file.ok_or_else(|| ApiError::validation("missing multipart field 'file'"))?;
    let provider = provider
        .filter(|p| !p.is_empty())
        .ok_or_else(|| ApiError::validation("missing multipart field 'provider'"))?;

    let document = DocumentFactory::from_upload(&name, content_type.as_deref(), bytes)
        .map_err(DeckgenError::from)?;

    Ok(Upload { document, provider })
}
