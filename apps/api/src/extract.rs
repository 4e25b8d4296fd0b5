//! Text extraction for uploaded documents.
//!
//! Thin collaborator in front of the analysis flows: given a spooled upload
//! and its extension, produce plain text or fail with a typed error the
//! transport layer maps to a client-visible response.

use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported file extension: {0}")]
    UnsupportedExtension(String),

    #[error("Failed to read upload: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to extract text from PDF: {0}")]
    Pdf(String),

    #[error("Failed to extract text from DOCX: {0}")]
    Docx(String),
}

/// File extensions accepted by the upload endpoints, lowercased with dot.
pub const ALLOWED_EXTENSIONS: &[&str] = &[".pdf", ".docx", ".doc", ".txt"];

/// Extracts plain text from `path`, dispatching on the lowercased extension
/// hint. `.doc` goes through the DOCX reader; legacy binary containers fail
/// there and surface as extraction errors.
pub async fn extract_text(path: &Path, extension: &str) -> Result<String, ExtractionError> {
    match extension {
        ".pdf" => extract_pdf(path).await,
        ".docx" | ".doc" => extract_docx(path).await,
        ".txt" => {
            let bytes = tokio::fs::read(path).await?;
            Ok(String::from_utf8_lossy(&bytes).into_owned())
        }
        other => Err(ExtractionError::UnsupportedExtension(other.to_string())),
    }
}

async fn extract_pdf(path: &Path) -> Result<String, ExtractionError> {
    let bytes = tokio::fs::read(path).await?;
    pdf_extract::extract_text_from_mem(&bytes).map_err(|e| ExtractionError::Pdf(e.to_string()))
}

/// Walks the document tree collecting run text, one line per paragraph.
async fn extract_docx(path: &Path) -> Result<String, ExtractionError> {
    let bytes = tokio::fs::read(path).await?;
    let docx = docx_rs::read_docx(&bytes).map_err(|e| ExtractionError::Docx(e.to_string()))?;

    let mut paragraphs: Vec<String> = Vec::new();
    for child in docx.document.children.iter() {
        if let docx_rs::DocumentChild::Paragraph(para) = child {
            let text: String = para
                .children
                .iter()
                .filter_map(|pc| match pc {
                    docx_rs::ParagraphChild::Run(run) => Some(
                        run.children
                            .iter()
                            .filter_map(|rc| match rc {
                                docx_rs::RunChild::Text(t) => Some(t.text.clone()),
                                _ => None,
                            })
                            .collect::<Vec<_>>()
                            .join(""),
                    ),
                    _ => None,
                })
                .collect::<Vec<_>>()
                .join("");

            if !text.is_empty() {
                paragraphs.push(text);
            }
        }
    }

    Ok(paragraphs.join("\n"))
}
