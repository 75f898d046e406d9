//! # Recap
//!
//! **A retrieval-augmented study assistant for personal notes.**
//!
//! Recap answers natural-language questions from a personal notes corpus:
//! it retrieves the most relevant passages (semantic vector search, with a
//! dependency-free keyword fallback), hands question + context to a hosted
//! language model, and returns the answer. New notes — raw text or PDF —
//! are folded into the searchable corpus at runtime.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌───────────────┐   ┌─────────────┐
//! │ Notes files  │──▶│ ContextRetriever │◀──│  Embedder   │
//! │ base + dir   │   │ (recap-core)   │   │ OpenAI/Ollama│
//! └──────────────┘   └──────┬────────┘   └─────────────┘
//!                           │ context
//!              ┌────────────┤
//!              ▼            ▼
//!         ┌────────┐   ┌─────────┐      ┌───────────┐
//!         │  CLI   │   │  HTTP   │─────▶│ Hosted LLM │
//!         │ (recap)│   │ (axum)  │      └───────────┘
//!         └────────┘   └─────────┘
//! ```
//!
//! The retrieval core lives in the `recap-core` crate and is pure
//! in-memory computation; this crate owns everything with an outside
//! edge: configuration, filesystem corpus sources, the embedding and LLM
//! provider clients, text extraction, the HTTP server, and the CLI.
//!
//! ## Quick Start
//!
//! ```bash
//! recap sources                      # check configured notes sources
//! recap context "krebs cycle"        # inspect what retrieval returns
//! recap ask "what is the krebs cycle?"
//! recap serve                        # start the HTTP API
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing and validation |
//! | [`sources`] | Corpus loading: base notes file + notes directory |
//! | [`bootstrap`] | Wires config + sources + embedder into a retriever |
//! | [`embedding`] | Embedding provider clients (OpenAI, Ollama) |
//! | [`llm`] | Hosted LLM client and prompt construction |
//! | [`extract`] | Text extraction for uploads (plain text, PDF) |
//! | [`server`] | HTTP API: `/ask`, `/notes`, `/notes/upload`, `/health` |
//! | [`ask`] | CLI one-shot question answering |
//! | [`ingest`] | CLI file import into the notes directory |

pub mod ask;
pub mod bootstrap;
pub mod config;
pub mod embedding;
pub mod extract;
mod http;
pub mod ingest;
pub mod llm;
pub mod server;
pub mod sources;
