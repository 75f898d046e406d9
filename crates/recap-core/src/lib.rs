//! # Recap Core
//!
//! Shared, runtime-free logic for Recap: data models, the append-only
//! corpus, the keyword scorer, the embedder seam, the vector index, and
//! the context retriever.
//!
//! This crate contains no tokio, filesystem I/O, HTTP, or other
//! application dependencies. Embedding is an injected collaborator
//! behind the [`embedding::Embedder`] trait; everything else is pure
//! in-memory computation.

pub mod corpus;
pub mod embedding;
pub mod error;
pub mod index;
pub mod keyword;
pub mod models;
pub mod retriever;
