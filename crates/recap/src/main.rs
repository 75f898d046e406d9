//! # Recap CLI (`recap`)
//!
//! The `recap` binary is the primary interface for the study assistant.
//!
//! ## Usage
//!
//! ```bash
//! recap --config ./config/recap.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `recap serve` | Start the HTTP API |
//! | `recap ask "<question>"` | Retrieve context and ask the hosted model |
//! | `recap context "<query>"` | Print the retrieved context only |
//! | `recap ingest <path>` | File a text/PDF document into the notes directory |
//! | `recap sources` | List configured corpus sources and their status |
//!
//! ## Examples
//!
//! ```bash
//! # Check which notes sources are configured
//! recap sources
//!
//! # Inspect retrieval quality without spending model tokens
//! recap context "krebs cycle" --max-chars 400
//!
//! # Ask a question grounded in your notes
//! recap ask "what does the krebs cycle produce?"
//!
//! # Import a lecture PDF into the notes directory
//! recap ingest ./downloads/lecture-04.pdf
//!
//! # Start the HTTP API
//! recap serve
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use recap::{ask, config, ingest, server, sources};

/// Recap — a retrieval-augmented study assistant for personal notes.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file. See `config/recap.example.toml` for a full example.
#[derive(Parser)]
#[command(
    name = "recap",
    about = "Recap — a retrieval-augmented study assistant for personal notes",
    version,
    long_about = "Recap answers questions from a personal notes corpus: it retrieves the \
    most relevant passages (semantic vector search with a keyword fallback), hands \
    question + context to a hosted language model, and returns the answer."
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/recap.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API.
    ///
    /// Loads the corpus, builds the retrieval index for the configured
    /// mode, and serves `/ask`, `/notes`, `/notes/upload`, and `/health`
    /// on `[server].bind`.
    Serve,

    /// Retrieve context for a question and ask the hosted model.
    Ask {
        /// The question to answer from your notes.
        question: String,
        /// Override the context character budget.
        #[arg(long)]
        max_chars: Option<usize>,
        /// Also print the retrieved context before the answer.
        #[arg(long)]
        show_context: bool,
    },

    /// Print the retrieved context for a query without calling the model.
    Context {
        /// The query to retrieve context for.
        query: String,
        /// Override the context character budget.
        #[arg(long)]
        max_chars: Option<usize>,
    },

    /// Extract text from a file (plain text or PDF) and file it into the
    /// notes directory as a new source.
    Ingest {
        /// The file to import.
        path: PathBuf,
    },

    /// List configured corpus sources and their status.
    Sources,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Serve => server::run_server(&config).await,
        Commands::Ask {
            question,
            max_chars,
            show_context,
        } => ask::run_ask(&config, &question, max_chars, show_context).await,
        Commands::Context { query, max_chars } => {
            ask::run_context(&config, &query, max_chars).await
        }
        Commands::Ingest { path } => ingest::run_ingest(&config, &path),
        Commands::Sources => sources::list_sources(&config),
    }
}
