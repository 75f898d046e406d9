//! Upload extraction flows: PDF and text bytes in, corpus documents out.

use async_trait::async_trait;

use recap::extract::{extract_text, MIME_PDF, MIME_TEXT};
use recap_core::embedding::Embedder;
use recap_core::error::{EmbedError, IngestError};
use recap_core::models::DocumentOrigin;
use recap_core::retriever::{ContextRetriever, RetrievalMode};

/// Minimal valid PDF containing `phrase`. The body is written first and
/// the xref table carries the resulting byte offsets so a conforming
/// parser accepts it.
fn minimal_pdf_with_phrase(phrase: &str) -> Vec<u8> {
    let content = format!("BT /F1 12 Tf 100 700 Td ({}) Tj ET", phrase);
    let mut out = Vec::new();
    out.extend_from_slice(b"%PDF-1.4\n");
    let o1 = out.len();
    out.extend_from_slice(b"1 0 obj << /Type /Catalog /Pages 2 0 R >> endobj\n");
    let o2 = out.len();
    out.extend_from_slice(b"2 0 obj << /Type /Pages /Kids [3 0 R] /Count 1 >> endobj\n");
    let o3 = out.len();
    out.extend_from_slice(b"3 0 obj << /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] /Contents 4 0 R /Resources << /Font << /F1 5 0 R >> >> >> endobj\n");
    let o4 = out.len();
    out.extend_from_slice(
        format!(
            "4 0 obj << /Length {} >> stream\n{}\nendstream endobj\n",
            content.len(),
            content
        )
        .as_bytes(),
    );
    let o5 = out.len();
    out.extend_from_slice(
        b"5 0 obj << /Type /Font /Subtype /Type1 /BaseFont /Helvetica >> endobj\n",
    );
    let xref_start = out.len();
    out.extend_from_slice(b"xref\n0 6\n");
    out.extend_from_slice(format!("{:010} 65535 f \n", 0).as_bytes());
    for offset in [o1, o2, o3, o4, o5] {
        out.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
    }
    out.extend_from_slice(b"trailer << /Size 6 /Root 1 0 R >>\nstartxref\n");
    out.extend_from_slice(format!("{}\n", xref_start).as_bytes());
    out.extend_from_slice(b"%%EOF\n");
    out
}

/// Keyword-mode flows must never call the embedder.
struct UnreachableEmbedder;

#[async_trait]
impl Embedder for UnreachableEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>, EmbedError> {
        panic!("embedder called during keyword-mode extraction flow");
    }
}

#[test]
fn pdf_bytes_extract_to_text() {
    let pdf = minimal_pdf_with_phrase("chlorophyll absorbs light");
    let text = extract_text(&pdf, MIME_PDF).unwrap();
    assert!(
        text.contains("chlorophyll"),
        "extracted text was: {:?}",
        text
    );
}

#[tokio::test]
async fn extracted_pdf_text_becomes_searchable() {
    let pdf = minimal_pdf_with_phrase("entropy always increases");
    let text = extract_text(&pdf, MIME_PDF).unwrap();

    let mut retriever = ContextRetriever::new(RetrievalMode::Keyword, 5);
    retriever
        .ingest(&UnreachableEmbedder, &text, DocumentOrigin::Uploaded)
        .await
        .unwrap();

    let context = retriever
        .get_relevant_context(&UnreachableEmbedder, "entropy", 800)
        .await
        .unwrap();
    assert!(context.contains("entropy"));
}

#[tokio::test]
async fn rejected_upload_does_not_grow_the_corpus() {
    let mut retriever = ContextRetriever::new(RetrievalMode::Keyword, 5);

    // Invalid UTF-8 is rejected before ingestion is ever attempted.
    let err = extract_text(&[0xc3, 0x28, 0xa0, 0xa1], MIME_TEXT).unwrap_err();
    assert!(matches!(err, IngestError::UnsupportedEncoding { .. }));

    // A whitespace-only body survives extraction but is rejected as an
    // empty ingestion; either way the corpus stays untouched.
    let text = extract_text(b"   \n\t  ", MIME_TEXT).unwrap();
    let err = retriever
        .ingest(&UnreachableEmbedder, &text, DocumentOrigin::Uploaded)
        .await
        .unwrap_err();
    assert!(matches!(err, IngestError::EmptyInput));
    assert_eq!(retriever.document_count(), 0);
}
