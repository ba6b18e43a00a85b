//! DOCX documents parsed with docx-rs.
//!
//! Paragraph text is kept in document order; tables are flattened to one line
//! per row with cells separated by ` | `, which keeps skill matrices and
//! experience tables readable for the model.

use async_trait::async_trait;
use docx_rs::{DocumentChild, ParagraphChild, RunChild, TableCellContent, TableChild, TableRowChild};
use uuid::Uuid;

use crate::error::{ExtractError, ExtractResult};
use crate::types::DocumentKind;
use crate::{non_empty, Document};

/// Uploaded DOCX file.
#[derive(Debug, Clone)]
pub struct DocxDocument {
    id: String,
    name: String,
    content: Vec<u8>,
}

impl DocxDocument {
    /// Create a DOCX document from a file name and its bytes.
    pub fn new(name: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            content,
        }
    }

    fn extract_sync(content: &[u8]) -> ExtractResult<String> {
        let docx = docx_rs::read_docx(content)
            .map_err(|e| ExtractError::Docx(format!("Failed to parse DOCX: {}", e)))?;

        let mut lines: Vec<String> = Vec::new();
        for child in &docx.document.children {
            match child {
                DocumentChild::Paragraph(p) => {
                    let line = paragraph_text(p);
                    if !line.trim().is_empty() {
                        lines.push(line);
                    }
                }
                DocumentChild::Table(t) => {
                    lines.extend(table_rows(t).into_iter().filter(|r| !r.trim().is_empty()));
                }
                _ => {}
            }
        }

        Ok(lines.join("\n"))
    }
}

fn paragraph_text(p: &docx_rs::Paragraph) -> String {
    let mut text = String::new();
    for child in &p.children {
        match child {
            ParagraphChild::Run(r) => push_run(&mut text, r),
            ParagraphChild::Hyperlink(h) => {
                for link_child in &h.children {
                    if let ParagraphChild::Run(r) = link_child {
                        push_run(&mut text, r);
                    }
                }
            }
            _ => {}
        }
    }
    text
}

fn push_run(text: &mut String, run: &docx_rs::Run) {
    for run_child in &run.children {
        match run_child {
            RunChild::Text(t) => text.push_str(&t.text),
            RunChild::Tab(_) => text.push('\t'),
            RunChild::Break(_) => text.push('\n'),
            _ => {}
        }
    }
}

fn table_rows(t: &docx_rs::Table) -> Vec<String> {
    t.rows
        .iter()
        .map(|row| {
            let TableChild::TableRow(r) = row;
            r.cells
                .iter()
                .map(|cell| {
                    let TableRowChild::TableCell(c) = cell;
                    c.children
                        .iter()
                        .filter_map(|content| match content {
                            TableCellContent::Paragraph(p) => Some(paragraph_text(p)),
                            _ => None,
                        })
                        .filter(|s| !s.trim().is_empty())
                        .collect::<Vec<_>>()
                        .join(" ")
                        .trim()
                        .to_string()
                })
                .collect::<Vec<_>>()
                .join(" | ")
        })
        .collect()
}

#[async_trait]
impl Document for DocxDocument {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> DocumentKind {
        DocumentKind::Docx
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
    use docx_rs::{Docx, Paragraph, Run};
    use std::io::Cursor;

    fn build_docx(lines: &[&str]) -> Vec<u8> {
        let mut docx = Docx::new();
        for line in lines {
            docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(*line)));
        }
        let mut cursor = Cursor::new(Vec::new());
        docx.build().pack(&mut cursor).unwrap();
        cursor.into_inner()
    }

    #[tokio::test]
    async fn test_docx_document_extracts_paragraphs() {
        let bytes = build_docx(&["Jane Doe", "Senior Rust Engineer"]);
        let doc = DocxDocument::new("cv.docx", bytes);

        let text = doc.parsed_text().await.unwrap();
        assert!(text.contains("Jane Doe"));
        assert!(text.contains("Senior Rust Engineer"));
    }

    #[tokio::test]
    async fn test_docx_document_empty_content() {
        let doc = DocxDocument::new("empty.docx", Vec::new());
        assert!(matches!(doc.parsed_text().await, Err(ExtractError::EmptyContent)));
    }

    #[tokio::test]
    async fn test_docx_document_malformed_content() {
        let doc = DocxDocument::new("broken.docx", b"PK not really a zip".to_vec());
        assert!(doc.parsed_text().await.is_err());
    }
}
