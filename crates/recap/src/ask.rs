//! One-shot question answering and context inspection (CLI).

use anyhow::Result;

use crate::bootstrap;
use crate::config::Config;
use crate::llm;

/// CLI entry point — retrieve context, ask the hosted model, print the
/// answer.
pub async fn run_ask(
    config: &Config,
    question: &str,
    max_chars: Option<usize>,
    show_context: bool,
) -> Result<()> {
    let (retriever, embedder) = bootstrap::build_retriever(config).await?;
    let budget = max_chars.unwrap_or(config.retrieval.max_context_chars);

    let context = retriever
        .get_relevant_context(embedder.as_ref(), question, budget)
        .await?;

    let answer = llm::answer(&config.llm, question, &context).await?;

    if show_context {
        println!("CONTEXT:");
        println!("{}", context);
        println!();
    }
    println!("{}", answer);

    Ok(())
}

/// CLI entry point — print the retrieved context without calling the
/// model. Useful for judging retrieval quality in isolation.
pub async fn run_context(config: &Config, query: &str, max_chars: Option<usize>) -> Result<()> {
    let (retriever, embedder) = bootstrap::build_retriever(config).await?;
    let budget = max_chars.unwrap_or(config.retrieval.max_context_chars);

    let context = retriever
        .get_relevant_context(embedder.as_ref(), query, budget)
        .await?;

    println!("{}", context);
    Ok(())
}
