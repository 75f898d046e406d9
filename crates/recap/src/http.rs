//! Shared HTTP plumbing for the provider clients.
//!
//! One retry contract for every hosted collaborator:
//! - HTTP 429 (rate limited) and 5xx (server error) → retry
//! - HTTP 4xx (client error, not 429) → fail immediately
//! - Network errors → retry
//! - Backoff: 1s, 2s, 4s, 8s, 16s, 32s (capped at 2^5)

use std::time::Duration;

/// POST a JSON body and return the parsed JSON response.
///
/// Errors are plain messages; the embedding and LLM callers wrap them in
/// their own error types.
pub(crate) async fn post_json_with_retry(
    client: &reqwest::Client,
    url: &str,
    bearer: Option<&str>,
    body: &serde_json::Value,
    max_retries: u32,
) -> Result<serde_json::Value, String> {
    let mut last_err = None;

    for attempt in 0..=max_retries {
        if attempt > 0 {
            let delay = Duration::from_secs(1 << (attempt - 1).min(5));
            tokio::time::sleep(delay).await;
        }

        let mut request = client
            .post(url)
            .header("Content-Type", "application/json")
            .json(body);
        if let Some(key) = bearer {
            request = request.header("Authorization", format!("Bearer {}", key));
        }

        match request.send().await {
            Ok(response) => {
                let status = response.status();

                if status.is_success() {
                    return response
                        .json()
                        .await
                        .map_err(|e| format!("invalid JSON response from {}: {}", url, e));
                }

                let body_text = response.text().await.unwrap_or_default();

                if status.as_u16() == 429 || status.is_server_error() {
                    last_err = Some(format!("API error {}: {}", status, body_text));
                    continue;
                }

                return Err(format!("API error {}: {}", status, body_text));
            }
            Err(e) => {
                last_err = Some(format!("request to {} failed: {}", url, e));
                continue;
            }
        }
    }

    Err(last_err.unwrap_or_else(|| "request failed after retries".to_string()))
}
