//! Embedding provider clients implementing the core [`Embedder`] seam.
//!
//! - **[`OpenAiEmbedder`]** — calls the OpenAI embeddings API.
//! - **[`OllamaEmbedder`]** — calls a local Ollama instance's `/api/embed`.
//! - **[`DisabledEmbedder`]** — returns errors; wired in when retrieval
//!   runs in keyword mode, which never embeds.
//!
//! Providers validate the returned vector length against the configured
//! `dims` so a misconfigured model cannot put mixed-dimension vectors
//! into the index.

use anyhow::{bail, Result};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use recap_core::embedding::Embedder;
use recap_core::error::EmbedError;

use crate::config::EmbeddingConfig;
use crate::http::post_json_with_retry;

/// Create the configured embedding provider.
///
/// # Errors
///
/// Returns an error for the `disabled` provider (semantic retrieval was
/// requested but no backend is configured), unknown provider names, or a
/// provider that cannot be initialized (missing model/dims/API key).
pub fn create_embedder(config: &EmbeddingConfig) -> Result<Arc<dyn Embedder>> {
    match config.provider.as_str() {
        "openai" => Ok(Arc::new(OpenAiEmbedder::new(config)?)),
        "ollama" => Ok(Arc::new(OllamaEmbedder::new(config)?)),
        "disabled" => bail!("embedding provider is disabled; semantic retrieval needs [embedding] configured"),
        other => bail!("Unknown embedding provider: {}", other),
    }
}

/// A no-op embedder that always returns errors.
///
/// Keyword-mode retrieval never calls the embedder; this stands in so the
/// rest of the application can hold an embedder unconditionally.
pub struct DisabledEmbedder;

#[async_trait]
impl Embedder for DisabledEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>, EmbedError> {
        Err(EmbedError::new("embedding provider is disabled"))
    }
}

/// Embedding provider using the OpenAI API.
///
/// Calls `POST /v1/embeddings` with the configured model. Requires the
/// `OPENAI_API_KEY` environment variable at construction time.
pub struct OpenAiEmbedder {
    client: reqwest::Client,
    api_key: String,
    url: String,
    model: String,
    dims: usize,
    max_retries: u32,
}

impl OpenAiEmbedder {
    pub fn new(config: &EmbeddingConfig) -> Result<Self> {
        let model = config
            .model
            .clone()
            .ok_or_else(|| anyhow::anyhow!("embedding.model required for OpenAI provider"))?;
        let dims = config
            .dims
            .ok_or_else(|| anyhow::anyhow!("embedding.dims required for OpenAI provider"))?;
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| anyhow::anyhow!("OPENAI_API_KEY environment variable not set"))?;
        let url = config
            .url
            .clone()
            .unwrap_or_else(|| "https://api.openai.com".to_string());
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_key,
            url,
            model,
            dims,
            max_retries: config.max_retries,
        })
    }
}

#[async_trait]
impl Embedder for OpenAiEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbedError> {
        let body = serde_json::json!({
            "model": self.model,
            "input": [text],
        });

        let json = post_json_with_retry(
            &self.client,
            &format!("{}/v1/embeddings", self.url),
            Some(&self.api_key),
            &body,
            self.max_retries,
        )
        .await
        .map_err(EmbedError::new)?;

        let vector = parse_openai_embedding(&json)?;
        check_dims(&vector, self.dims)?;
        Ok(vector)
    }
}

fn parse_openai_embedding(json: &serde_json::Value) -> Result<Vec<f32>, EmbedError> {
    let embedding = json
        .get("data")
        .and_then(|d| d.as_array())
        .and_then(|d| d.first())
        .and_then(|item| item.get("embedding"))
        .and_then(|e| e.as_array())
        .ok_or_else(|| EmbedError::new("invalid OpenAI response: missing embedding"))?;

    Ok(embedding
        .iter()
        .map(|v| v.as_f64().unwrap_or(0.0) as f32)
        .collect())
}

/// Embedding provider using a local Ollama instance.
///
/// Calls `POST /api/embed` on the configured URL (default
/// `http://localhost:11434`). Requires an embedding model pulled, e.g.
/// `ollama pull nomic-embed-text`.
pub struct OllamaEmbedder {
    client: reqwest::Client,
    url: String,
    model: String,
    dims: usize,
    max_retries: u32,
}

impl OllamaEmbedder {
    pub fn new(config: &EmbeddingConfig) -> Result<Self> {
        let model = config
            .model
            .clone()
            .ok_or_else(|| anyhow::anyhow!("embedding.model required for Ollama provider"))?;
        let dims = config
            .dims
            .ok_or_else(|| anyhow::anyhow!("embedding.dims required for Ollama provider"))?;
        let url = config
            .url
            .clone()
            .unwrap_or_else(|| "http://localhost:11434".to_string());
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            url,
            model,
            dims,
            max_retries: config.max_retries,
        })
    }
}

#[async_trait]
impl Embedder for OllamaEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbedError> {
        let body = serde_json::json!({
            "model": self.model,
            "input": [text],
        });

        let json = post_json_with_retry(
            &self.client,
            &format!("{}/api/embed", self.url),
            None,
            &body,
            self.max_retries,
        )
        .await
        .map_err(EmbedError::new)?;

        let vector = parse_ollama_embedding(&json)?;
        check_dims(&vector, self.dims)?;
        Ok(vector)
    }
}

fn parse_ollama_embedding(json: &serde_json::Value) -> Result<Vec<f32>, EmbedError> {
    let embedding = json
        .get("embeddings")
        .and_then(|e| e.as_array())
        .and_then(|e| e.first())
        .and_then(|e| e.as_array())
        .ok_or_else(|| EmbedError::new("invalid Ollama response: missing embeddings array"))?;

    Ok(embedding
        .iter()
        .map(|v| v.as_f64().unwrap_or(0.0) as f32)
        .collect())
}

fn check_dims(vector: &[f32], dims: usize) -> Result<(), EmbedError> {
    if vector.len() != dims {
        return Err(EmbedError::new(format!(
            "embedding has {} dimensions, expected {}",
            vector.len(),
            dims
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_openai_response_extracts_vector() {
        let json = serde_json::json!({
            "data": [{"embedding": [0.1, -0.2, 0.3]}]
        });
        let vector = parse_openai_embedding(&json).unwrap();
        assert_eq!(vector.len(), 3);
        assert!((vector[1] + 0.2).abs() < 1e-6);
    }

    #[test]
    fn parse_openai_response_missing_data_fails() {
        let json = serde_json::json!({"unexpected": true});
        assert!(parse_openai_embedding(&json).is_err());
    }

    #[test]
    fn parse_ollama_response_extracts_vector() {
        let json = serde_json::json!({
            "embeddings": [[1.0, 0.0]]
        });
        let vector = parse_ollama_embedding(&json).unwrap();
        assert_eq!(vector, vec![1.0, 0.0]);
    }

    #[test]
    fn dims_mismatch_is_rejected() {
        assert!(check_dims(&[0.0; 3], 4).is_err());
        assert!(check_dims(&[0.0; 4], 4).is_ok());
    }
}
