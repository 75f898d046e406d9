//! Text extraction for ingested content (plain text, PDF).
//!
//! Extraction never panics: a failure rejects the single ingestion call
//! and the document is not added.

use std::path::Path;

use recap_core::error::IngestError;

pub const MIME_PDF: &str = "application/pdf";
pub const MIME_TEXT: &str = "text/plain";
pub const MIME_MARKDOWN: &str = "text/markdown";

/// Extract plain UTF-8 text from uploaded bytes.
///
/// Text content is validated strictly: bytes that are not valid UTF-8
/// are rejected as [`IngestError::UnsupportedEncoding`] rather than
/// lossily decoded, so a bad upload is surfaced to the caller instead of
/// silently mangled. PDF parse failures are rejections for the same
/// reason, as are content types this system does not ingest.
pub fn extract_text(bytes: &[u8], content_type: &str) -> Result<String, IngestError> {
    match strip_parameters(content_type) {
        MIME_PDF => pdf_extract::extract_text_from_mem(bytes).map_err(|e| {
            IngestError::UnsupportedEncoding {
                detail: format!("PDF extraction failed: {}", e),
            }
        }),
        MIME_TEXT | MIME_MARKDOWN => String::from_utf8(bytes.to_vec()).map_err(|e| {
            IngestError::UnsupportedEncoding {
                detail: format!("invalid UTF-8 text: {}", e),
            }
        }),
        other => Err(IngestError::UnsupportedEncoding {
            detail: format!("unsupported content type: {}", other),
        }),
    }
}

/// Guess a supported content type from a file extension (CLI import).
pub fn content_type_for_path(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("pdf") => MIME_PDF,
        Some("md") => MIME_MARKDOWN,
        _ => MIME_TEXT,
    }
}

/// `"text/plain; charset=utf-8"` → `"text/plain"`.
fn strip_parameters(content_type: &str) -> &str {
    content_type
        .split(';')
        .next()
        .unwrap_or(content_type)
        .trim()
}
