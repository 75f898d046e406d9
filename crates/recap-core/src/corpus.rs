//! Append-only corpus of ingested documents.

use crate::error::IngestError;
use crate::models::{Document, DocumentOrigin};

/// The ordered collection of all ingested documents.
///
/// Append-only: the corpus grows monotonically over the process lifetime
/// and there is no deletion API. Created at startup from the configured
/// sources, then extended one document at a time by ingestion calls.
#[derive(Debug, Default)]
pub struct Corpus {
    documents: Vec<Document>,
}

impl Corpus {
    pub fn new() -> Self {
        Self {
            documents: Vec::new(),
        }
    }

    /// Seed a corpus from already-loaded documents.
    pub fn from_documents(documents: Vec<Document>) -> Self {
        Self { documents }
    }

    /// Append one document built from raw text.
    ///
    /// The text is trimmed first; whitespace-only input is rejected with
    /// [`IngestError::EmptyInput`] and the corpus is unchanged. On success
    /// the new document is observable by subsequent searches.
    pub fn append(&mut self, text: &str, origin: DocumentOrigin) -> Result<(), IngestError> {
        let doc = Document::new(text, origin).ok_or(IngestError::EmptyInput)?;
        self.documents.push(doc);
        Ok(())
    }

    /// Append an already-constructed document.
    pub fn push(&mut self, document: Document) {
        self.documents.push(document);
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Document> {
        self.documents.iter()
    }

    /// Document bodies joined by newline — the keyword scorer's input
    /// shape, where each corpus line is a ranking candidate.
    pub fn joined_text(&self) -> String {
        self.documents
            .iter()
            .map(|d| d.body.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_grows_corpus() {
        let mut corpus = Corpus::new();
        assert!(corpus.is_empty());
        corpus
            .append("first note", DocumentOrigin::BaseCorpus)
            .unwrap();
        corpus.append("  second note  ", DocumentOrigin::Uploaded).unwrap();
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.iter().nth(1).unwrap().body, "second note");
    }

    #[test]
    fn append_rejects_whitespace_only() {
        let mut corpus = Corpus::new();
        let err = corpus.append("  \n ", DocumentOrigin::Uploaded).unwrap_err();
        assert!(matches!(err, IngestError::EmptyInput));
        assert!(corpus.is_empty());
    }

    #[test]
    fn joined_text_is_newline_separated() {
        let mut corpus = Corpus::new();
        corpus.append("alpha", DocumentOrigin::BaseCorpus).unwrap();
        corpus.append("beta", DocumentOrigin::BaseCorpus).unwrap();
        assert_eq!(corpus.joined_text(), "alpha\nbeta");
    }
}
