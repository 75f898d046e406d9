//! HTTP API for the study assistant.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/health` | Health check (returns version) |
//! | `POST` | `/ask` | Answer a question grounded in the notes corpus |
//! | `POST` | `/notes` | Ingest a raw-text note (JSON `{"text": ...}`) |
//! | `POST` | `/notes/upload` | Ingest a binary document (PDF or text body) |
//!
//! # Error Contract
//!
//! All error responses share one envelope:
//!
//! ```json
//! { "error": { "code": "empty_input", "message": "document is empty after trimming whitespace" } }
//! ```
//!
//! Codes: `bad_request` (400), `empty_input` (400), `unsupported_encoding`
//! (415), `retrieval_unavailable` (502), `llm_error` (502), `internal` (500).
//!
//! The two retrieval sentinels ("no notes yet" / "no match") are ordinary
//! `200` payloads, not errors — only an infrastructure failure is an error.
//!
//! # Concurrency
//!
//! The retriever sits behind a single `RwLock`: ingestion takes the write
//! half, queries the read half, so index mutation is serialized while
//! concurrent reads proceed.

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};

use recap_core::embedding::Embedder;
use recap_core::error::{IngestError, RetrievalError};
use recap_core::models::DocumentOrigin;
use recap_core::retriever::ContextRetriever;

use crate::bootstrap;
use crate::config::Config;
use crate::extract;
use crate::llm;

/// Shared application state passed to all route handlers.
#[derive(Clone)]
struct AppState {
    config: Arc<Config>,
    retriever: Arc<RwLock<ContextRetriever>>,
    embedder: Arc<dyn Embedder>,
}

/// Start the HTTP server.
///
/// Loads the corpus, builds the retriever for the configured mode, binds
/// to `[server].bind`, and serves until the process is terminated.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let (retriever, embedder) = bootstrap::build_retriever(config).await?;

    let bind_addr = config.server.bind.clone();
    let state = AppState {
        config: Arc::new(config.clone()),
        retriever: Arc::new(RwLock::new(retriever)),
        embedder,
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(health))
        .route("/ask", post(ask))
        .route("/notes", post(add_note))
        .route("/notes/upload", post(upload_note))
        .layer(cors)
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(%bind_addr, "study assistant listening");
    axum::serve(listener, app).await?;

    Ok(())
}

// ============ Handlers ============

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[derive(Debug, Deserialize)]
struct AskRequest {
    question: String,
}

#[derive(Debug, Serialize)]
struct AskResponse {
    question: String,
    context_used: String,
    answer: String,
}

async fn ask(
    State(state): State<AppState>,
    Json(req): Json<AskRequest>,
) -> Result<Json<AskResponse>, ApiError> {
    let question = req.question.trim();
    if question.is_empty() {
        return Err(ApiError::BadRequest(
            "question must not be empty".to_string(),
        ));
    }

    let context = {
        let retriever = state.retriever.read().await;
        retriever
            .get_relevant_context(
                state.embedder.as_ref(),
                question,
                state.config.retrieval.max_context_chars,
            )
            .await?
    };

    let answer = llm::answer(&state.config.llm, question, &context)
        .await
        .map_err(|e| ApiError::Llm(e.to_string()))?;

    Ok(Json(AskResponse {
        question: question.to_string(),
        context_used: context,
        answer,
    }))
}

#[derive(Debug, Deserialize)]
struct NoteRequest {
    text: String,
}

#[derive(Debug, Serialize)]
struct IngestResponse {
    ingested: bool,
    documents: usize,
}

async fn add_note(
    State(state): State<AppState>,
    Json(req): Json<NoteRequest>,
) -> Result<Json<IngestResponse>, ApiError> {
    ingest_text(&state, &req.text).await
}

async fn upload_note(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<IngestResponse>, ApiError> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or(extract::MIME_TEXT);

    let text = extract::extract_text(&body, content_type)?;
    ingest_text(&state, &text).await
}

async fn ingest_text(state: &AppState, text: &str) -> Result<Json<IngestResponse>, ApiError> {
    let mut retriever = state.retriever.write().await;
    retriever
        .ingest(state.embedder.as_ref(), text, DocumentOrigin::Uploaded)
        .await?;

    Ok(Json(IngestResponse {
        ingested: true,
        documents: retriever.document_count(),
    }))
}

// ============ Error envelope ============

#[derive(Debug)]
enum ApiError {
    BadRequest(String),
    EmptyInput(String),
    UnsupportedEncoding(String),
    RetrievalUnavailable(String),
    Llm(String),
}

impl ApiError {
    fn parts(&self) -> (StatusCode, &'static str, &str) {
        match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            ApiError::EmptyInput(msg) => (StatusCode::BAD_REQUEST, "empty_input", msg),
            ApiError::UnsupportedEncoding(msg) => {
                (StatusCode::UNSUPPORTED_MEDIA_TYPE, "unsupported_encoding", msg)
            }
            ApiError::RetrievalUnavailable(msg) => {
                (StatusCode::BAD_GATEWAY, "retrieval_unavailable", msg)
            }
            ApiError::Llm(msg) => (StatusCode::BAD_GATEWAY, "llm_error", msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();
        tracing::warn!(code, error = message, "request failed");
        let body = serde_json::json!({
            "error": { "code": code, "message": message }
        });
        (status, Json(body)).into_response()
    }
}

impl From<IngestError> for ApiError {
    fn from(err: IngestError) -> Self {
        match err {
            IngestError::EmptyInput => ApiError::EmptyInput(err.to_string()),
            IngestError::UnsupportedEncoding { .. } => {
                ApiError::UnsupportedEncoding(err.to_string())
            }
            IngestError::Embedding(_) => ApiError::RetrievalUnavailable(err.to_string()),
        }
    }
}

impl From<RetrievalError> for ApiError {
    fn from(err: RetrievalError) -> Self {
        ApiError::RetrievalUnavailable(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ingest_errors_map_to_api_codes() {
        let (status, code, _) = ApiError::from(IngestError::EmptyInput).parts();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(code, "empty_input");

        let (status, code, _) = ApiError::from(IngestError::UnsupportedEncoding {
            detail: "bad bytes".to_string(),
        })
        .parts();
        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(code, "unsupported_encoding");
    }

    #[test]
    fn retrieval_errors_are_bad_gateway() {
        let err = RetrievalError::Unavailable(recap_core::error::EmbedError::new("down"));
        let (status, code, _) = ApiError::from(err).parts();
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(code, "retrieval_unavailable");
    }
}
