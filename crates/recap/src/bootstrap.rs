//! Wires configuration, corpus sources, and the embedding provider into
//! a ready [`ContextRetriever`].
//!
//! Shared by the CLI one-shot commands and the HTTP server. The index is
//! ephemeral: it is rebuilt from the corpus sources on every startup.

use anyhow::{Context, Result};
use std::sync::Arc;

use recap_core::embedding::Embedder;
use recap_core::retriever::{ContextRetriever, RetrievalMode};

use crate::config::Config;
use crate::embedding::{create_embedder, DisabledEmbedder};
use crate::sources;

/// Load the corpus, construct the embedder for the configured mode, and
/// build the retriever (embedding the initial batch in semantic mode).
pub async fn build_retriever(config: &Config) -> Result<(ContextRetriever, Arc<dyn Embedder>)> {
    let mode = config.retrieval.parse_mode()?;

    let embedder: Arc<dyn Embedder> = match mode {
        RetrievalMode::Semantic => create_embedder(&config.embedding)?,
        RetrievalMode::Keyword => Arc::new(DisabledEmbedder),
    };

    let documents = sources::load_initial_corpus(&config.corpus);
    tracing::info!(
        documents = documents.len(),
        mode = %config.retrieval.mode,
        "corpus loaded"
    );

    let retriever = ContextRetriever::from_documents(
        embedder.as_ref(),
        documents,
        mode,
        config.retrieval.top_k,
    )
    .await
    .context("Failed to build the vector index from the initial corpus")?;

    Ok((retriever, embedder))
}
