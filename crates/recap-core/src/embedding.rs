//! Embedder seam and vector math.
//!
//! The [`Embedder`] trait is the boundary to the external embedding
//! collaborator. Concrete providers (OpenAI, Ollama) live in the `recap`
//! app crate; tests inject deterministic stubs.

use async_trait::async_trait;

use crate::error::EmbedError;

/// Maps a text string to a fixed-length numeric vector.
///
/// Implementations are assumed deterministic for identical input.
/// Backend failures (quota, auth, network) surface as [`EmbedError`] and
/// propagate to callers as retrieval-unavailable.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbedError>;
}

/// Compute cosine similarity between two embedding vectors.
///
/// Returns a value in `[-1.0, 1.0]`:
/// - `1.0` = identical direction
/// - `0.0` = orthogonal (unrelated)
/// - `-1.0` = opposite direction
///
/// Returns `0.0` for empty vectors or vectors of different lengths.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;

    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom < f32::EPSILON {
        return 0.0;
    }

    dot / denom
}
