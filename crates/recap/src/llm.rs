//! Hosted LLM client: turns question + retrieved context into an answer.
//!
//! The model's reply is always a single text string at this boundary —
//! provider response-shape variance (nested choices, structured content)
//! is absorbed here and never leaks into the retrieval core.

use anyhow::{bail, Result};
use std::time::Duration;

use crate::config::LlmConfig;
use crate::http::post_json_with_retry;

/// Build the study-assistant prompt.
///
/// The model is told to admit uncertainty when the notes don't contain
/// the answer rather than fabricate one from the context.
fn build_prompt(question: &str, context: &str) -> String {
    format!(
        "You are a helpful study assistant. Use the context from the student's notes \
         to answer the question clearly and concisely. If the context does not contain \
         the answer, say you are not sure and give a high-level explanation instead.\n\n\
         CONTEXT FROM NOTES:\n{context}\n\n\
         QUESTION:\n{question}\n\n\
         ANSWER (student-friendly, step-by-step if needed):"
    )
}

/// Ask the configured hosted model to answer `question` grounded in
/// `context`.
pub async fn answer(config: &LlmConfig, question: &str, context: &str) -> Result<String> {
    let prompt = build_prompt(question, context);
    match config.provider.as_str() {
        "openai" => answer_openai(config, &prompt).await,
        "ollama" => answer_ollama(config, &prompt).await,
        "disabled" => bail!("LLM provider is disabled; set [llm] provider in config"),
        other => bail!("Unknown LLM provider: {}", other),
    }
}

async fn answer_openai(config: &LlmConfig, prompt: &str) -> Result<String> {
    let model = config
        .model
        .as_ref()
        .ok_or_else(|| anyhow::anyhow!("llm.model required"))?;
    let api_key = std::env::var("OPENAI_API_KEY")
        .map_err(|_| anyhow::anyhow!("OPENAI_API_KEY environment variable not set"))?;
    let url = config.url.as_deref().unwrap_or("https://api.openai.com");

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;

    let body = serde_json::json!({
        "model": model,
        "messages": [{"role": "user", "content": prompt}],
        "max_tokens": config.max_tokens,
        "temperature": config.temperature,
    });

    let json = post_json_with_retry(
        &client,
        &format!("{}/v1/chat/completions", url),
        Some(&api_key),
        &body,
        config.max_retries,
    )
    .await
    .map_err(|e| anyhow::anyhow!("LLM call failed: {}", e))?;

    parse_openai_answer(&json)
}

fn parse_openai_answer(json: &serde_json::Value) -> Result<String> {
    json.get("choices")
        .and_then(|c| c.as_array())
        .and_then(|c| c.first())
        .and_then(|choice| choice.get("message"))
        .and_then(|m| m.get("content"))
        .and_then(|c| c.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| anyhow::anyhow!("Invalid OpenAI response: missing message content"))
}

async fn answer_ollama(config: &LlmConfig, prompt: &str) -> Result<String> {
    let model = config
        .model
        .as_ref()
        .ok_or_else(|| anyhow::anyhow!("llm.model required"))?;
    let url = config.url.as_deref().unwrap_or("http://localhost:11434");

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;

    let body = serde_json::json!({
        "model": model,
        "prompt": prompt,
        "stream": false,
        "options": {
            "temperature": config.temperature,
            "num_predict": config.max_tokens,
        },
    });

    let json = post_json_with_retry(
        &client,
        &format!("{}/api/generate", url),
        None,
        &body,
        config.max_retries,
    )
    .await
    .map_err(|e| anyhow::anyhow!("LLM call failed: {}", e))?;

    parse_ollama_answer(&json)
}

fn parse_ollama_answer(json: &serde_json::Value) -> Result<String> {
    json.get("response")
        .and_then(|r| r.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| anyhow::anyhow!("Invalid Ollama response: missing response field"))
}
