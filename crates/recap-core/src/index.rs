//! Append-only vector similarity index.
//!
//! Brute-force cosine similarity over all stored vectors. The corpus this
//! system serves is personal notes — small enough that a linear scan per
//! query beats the bookkeeping of an approximate index.

use crate::embedding::{cosine_similarity, Embedder};
use crate::error::EmbedError;
use crate::models::Document;

struct IndexEntry {
    document: Document,
    vector: Vec<f32>,
}

/// Similarity-searchable structure pairing each document with its
/// embedding vector.
///
/// Purely additive: every document ever inserted stays retrievable, and a
/// search can only return previously inserted documents. Vectors are
/// owned by the index and never exposed to callers.
#[derive(Default)]
pub struct VectorIndex {
    entries: Vec<IndexEntry>,
}

impl VectorIndex {
    /// The designated empty state.
    ///
    /// The index does not need to pre-exist before the first insert: the
    /// first [`insert`](Self::insert) transitions the empty state to a
    /// populated index containing exactly that document.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Embed each document and build an index from the batch.
    ///
    /// An empty batch yields the empty state rather than an error.
    pub async fn build(
        embedder: &dyn Embedder,
        documents: Vec<Document>,
    ) -> Result<Self, EmbedError> {
        let mut index = Self::new();
        for document in documents {
            index.insert(embedder, document).await?;
        }
        Ok(index)
    }

    /// Embed and append one document.
    pub async fn insert(
        &mut self,
        embedder: &dyn Embedder,
        document: Document,
    ) -> Result<(), EmbedError> {
        let vector = embedder.embed(&document.body).await?;
        self.entries.push(IndexEntry { document, vector });
        Ok(())
    }

    /// Return the `k` documents nearest to `query`, nearest first.
    ///
    /// Similarity is cosine. The sort is stable, so exact score ties keep
    /// insertion order; for a fixed index state and query the result is
    /// deterministic. An empty index returns an empty sequence without
    /// calling the embedder — callers distinguish that case via the
    /// retriever's sentinel, not an error.
    pub async fn search(
        &self,
        embedder: &dyn Embedder,
        query: &str,
        k: usize,
    ) -> Result<Vec<&Document>, EmbedError> {
        if self.entries.is_empty() || k == 0 {
            return Ok(Vec::new());
        }

        let query_vec = embedder.embed(query).await?;

        let mut scored: Vec<(usize, f32)> = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (i, cosine_similarity(&query_vec, &entry.vector)))
            .collect();

        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(k);

        Ok(scored
            .into_iter()
            .map(|(i, _)| &self.entries[i].document)
            .collect())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DocumentOrigin;
    use async_trait::async_trait;

    /// Deterministic stub: letter-frequency histogram. Identical text maps
    /// to identical vectors, so cosine ranks an exact copy at 1.0.
    struct LetterFreqEmbedder;

    #[async_trait]
    impl Embedder for LetterFreqEmbedder {
        async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbedError> {
            let mut freq = vec![0.0f32; 26];
            for c in text.to_lowercase().chars() {
                if c.is_ascii_lowercase() {
                    freq[(c as u8 - b'a') as usize] += 1.0;
                }
            }
            Ok(freq)
        }
    }

    /// Fails every call; proves a code path never reaches the embedder.
    struct FailingEmbedder;

    #[async_trait]
    impl Embedder for FailingEmbedder {
        async fn embed(&self, _text: &str) -> Result<Vec<f32>, EmbedError> {
            Err(EmbedError::new("backend down"))
        }
    }

    fn doc(body: &str) -> Document {
        Document::new(body, DocumentOrigin::BaseCorpus).unwrap()
    }

    #[tokio::test]
    async fn build_from_empty_batch_is_empty_state() {
        let index = VectorIndex::build(&LetterFreqEmbedder, Vec::new())
            .await
            .unwrap();
        assert!(index.is_empty());
    }

    #[tokio::test]
    async fn first_insert_populates_empty_index() {
        let mut index = VectorIndex::new();
        index
            .insert(&LetterFreqEmbedder, doc("gravity pulls things down"))
            .await
            .unwrap();
        assert_eq!(index.len(), 1);
    }

    #[tokio::test]
    async fn search_empty_index_skips_embedder() {
        let index = VectorIndex::new();
        let hits = index.search(&FailingEmbedder, "anything", 3).await.unwrap();
        assert!(hits.is_empty());
    }

    #[tokio::test]
    async fn exact_text_ranks_top() {
        let embedder = LetterFreqEmbedder;
        let mut index = VectorIndex::new();
        index
            .insert(&embedder, doc("the krebs cycle produces atp"))
            .await
            .unwrap();
        index
            .insert(&embedder, doc("newton wrote the principia"))
            .await
            .unwrap();

        let hits = index
            .search(&embedder, "the krebs cycle produces atp", 2)
            .await
            .unwrap();
        assert_eq!(hits[0].body, "the krebs cycle produces atp");
    }

    #[tokio::test]
    async fn single_document_index_ranks_it_first() {
        let embedder = LetterFreqEmbedder;
        let mut index = VectorIndex::new();
        index.insert(&embedder, doc("osmosis moves water")).await.unwrap();

        let hits = index
            .search(&embedder, "osmosis moves water", 1)
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].body, "osmosis moves water");
    }

    #[tokio::test]
    async fn search_returns_at_most_k() {
        let embedder = LetterFreqEmbedder;
        let docs = vec![doc("alpha"), doc("beta"), doc("gamma"), doc("delta")];
        let index = VectorIndex::build(&embedder, docs).await.unwrap();

        let hits = index.search(&embedder, "alpha", 2).await.unwrap();
        assert_eq!(hits.len(), 2);
    }

    #[tokio::test]
    async fn insert_failure_leaves_index_unchanged() {
        let mut index = VectorIndex::new();
        let err = index.insert(&FailingEmbedder, doc("lost note")).await;
        assert!(err.is_err());
        assert!(index.is_empty());
    }

    #[tokio::test]
    async fn tied_scores_keep_insertion_order() {
        let embedder = LetterFreqEmbedder;
        let mut index = VectorIndex::new();
        // Anagrams embed identically under the letter-frequency stub.
        index.insert(&embedder, doc("listen")).await.unwrap();
        index.insert(&embedder, doc("silent")).await.unwrap();

        let hits = index.search(&embedder, "enlist", 2).await.unwrap();
        assert_eq!(hits[0].body, "listen");
        assert_eq!(hits[1].body, "silent");
    }
}
