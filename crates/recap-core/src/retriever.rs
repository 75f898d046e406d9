//! The single retrieval entry point: query in, context string out.
//!
//! All frontends (CLI, HTTP) delegate here. The retriever owns the corpus
//! and the vector index outright — construct one per process (or per
//! test) and pass it where it is needed; there is no global instance.

use crate::corpus::Corpus;
use crate::embedding::Embedder;
use crate::error::{EmbedError, IngestError, RetrievalError};
use crate::index::VectorIndex;
use crate::keyword;
use crate::models::{Document, DocumentOrigin};

/// Returned when nothing has been ingested yet.
pub const NO_NOTES_MESSAGE: &str = "No study notes found.";

/// Returned when retrieval ran but nothing relevant matched.
///
/// Distinct from [`NO_NOTES_MESSAGE`] so callers can tell "nothing
/// ingested" apart from "ingested but nothing relevant".
pub const NO_MATCH_MESSAGE: &str =
    "No matching context found in notes; consider answering from general knowledge.";

/// Retrieval strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetrievalMode {
    /// Vector-similarity search over embeddings (authoritative).
    Semantic,
    /// Lexical line ranking over the raw corpus (dependency-free fallback).
    Keyword,
}

/// Orchestrates the corpus and the active retrieval strategy.
pub struct ContextRetriever {
    corpus: Corpus,
    index: VectorIndex,
    mode: RetrievalMode,
    top_k: usize,
}

impl ContextRetriever {
    /// An empty retriever in the given mode.
    pub fn new(mode: RetrievalMode, top_k: usize) -> Self {
        Self {
            corpus: Corpus::new(),
            index: VectorIndex::new(),
            mode,
            top_k,
        }
    }

    /// Seed a retriever from an initial document batch.
    ///
    /// In semantic mode the batch is embedded up front; keyword mode
    /// defers entirely to the raw corpus text and never touches the
    /// embedder.
    pub async fn from_documents(
        embedder: &dyn Embedder,
        documents: Vec<Document>,
        mode: RetrievalMode,
        top_k: usize,
    ) -> Result<Self, EmbedError> {
        let index = match mode {
            RetrievalMode::Semantic => VectorIndex::build(embedder, documents.clone()).await?,
            RetrievalMode::Keyword => VectorIndex::new(),
        };
        Ok(Self {
            corpus: Corpus::from_documents(documents),
            index,
            mode,
            top_k,
        })
    }

    /// Append one document and make it searchable immediately.
    ///
    /// The index is updated before the corpus so a failed embedding
    /// leaves both untouched; there is no staleness window on success.
    pub async fn ingest(
        &mut self,
        embedder: &dyn Embedder,
        text: &str,
        origin: DocumentOrigin,
    ) -> Result<(), IngestError> {
        let document = Document::new(text, origin).ok_or(IngestError::EmptyInput)?;
        if self.mode == RetrievalMode::Semantic {
            self.index.insert(embedder, document.clone()).await?;
        }
        self.corpus.push(document);
        Ok(())
    }

    /// Translate a query into a context string for downstream prompting.
    ///
    /// An empty corpus yields [`NO_NOTES_MESSAGE`]; a search that ran but
    /// matched nothing yields [`NO_MATCH_MESSAGE`]. Both are ordinary
    /// results. A backend failure is an error — never a misleading empty
    /// context. Excerpts are joined with a blank line in semantic mode
    /// (multi-line passages) and a newline in keyword mode (single
    /// lines), then hard-truncated to `max_chars` characters.
    pub async fn get_relevant_context(
        &self,
        embedder: &dyn Embedder,
        query: &str,
        max_chars: usize,
    ) -> Result<String, RetrievalError> {
        if self.corpus.is_empty() {
            return Ok(NO_NOTES_MESSAGE.to_string());
        }

        let joined = match self.mode {
            RetrievalMode::Semantic => {
                let hits = self.index.search(embedder, query, self.top_k).await?;
                hits.iter()
                    .map(|d| d.body.as_str())
                    .collect::<Vec<_>>()
                    .join("\n\n")
            }
            RetrievalMode::Keyword => {
                let corpus_text = self.corpus.joined_text();
                let ranked = keyword::rank_lines(query, &corpus_text, self.top_k);
                ranked
                    .iter()
                    .map(|m| m.line)
                    .collect::<Vec<_>>()
                    .join("\n")
            }
        };

        if joined.is_empty() {
            return Ok(NO_MATCH_MESSAGE.to_string());
        }

        Ok(truncate_chars(joined, max_chars))
    }

    pub fn mode(&self) -> RetrievalMode {
        self.mode
    }

    pub fn document_count(&self) -> usize {
        self.corpus.len()
    }
}

/// Hard-cut `text` to at most `max_chars` characters.
///
/// Not word-boundary aware. Counting characters rather than bytes keeps
/// the cut off UTF-8 sequence boundaries.
fn truncate_chars(text: String, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text
    } else {
        text.chars().take(max_chars).collect()
    }
}
