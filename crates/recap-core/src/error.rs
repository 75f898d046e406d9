//! Error taxonomy for the retrieval core.
//!
//! Missing or unreadable corpus sources at startup are deliberately not
//! represented here: they are non-fatal, logged by the loader, and
//! contribute an empty corpus rather than an error value. Nothing in this
//! crate fails the whole process — an error only fails the single call.

use thiserror::Error;

/// Failure reported by an embedding backend.
///
/// Covers network, auth, quota, and malformed-response failures alike;
/// the caller only needs to know that embedding did not produce a vector.
#[derive(Debug, Clone, Error)]
#[error("embedding backend error: {message}")]
pub struct EmbedError {
    pub message: String,
}

impl EmbedError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A rejected ingestion call. The document is not added.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Input contained only whitespace.
    #[error("document is empty after trimming whitespace")]
    EmptyInput,
    /// Input bytes could not be decoded as text.
    #[error("unsupported encoding: {detail}")]
    UnsupportedEncoding { detail: String },
    /// The embedding backend failed while indexing the document.
    #[error(transparent)]
    Embedding(#[from] EmbedError),
}

/// Search infrastructure failure.
///
/// Distinct from the "no documents yet" and "no match" sentinels, which
/// are ordinary results — a retriever must never turn a backend failure
/// into an empty-looking context.
#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("retrieval unavailable: {0}")]
    Unavailable(#[from] EmbedError),
}
