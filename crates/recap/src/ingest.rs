//! File import: extract text from a document and file it into the notes
//! directory as a new plain-text source.
//!
//! The in-process corpus is read once at startup, so a CLI import is
//! made durable by writing into the notes directory rather than by
//! mutating a running index.

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::extract;

/// CLI entry point — extract, validate, and file one document.
pub fn run_ingest(config: &Config, path: &Path) -> Result<()> {
    let notes_dir = config
        .corpus
        .notes_dir
        .as_ref()
        .ok_or_else(|| anyhow::anyhow!("corpus.notes_dir must be configured to ingest files"))?;

    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let content_type = extract::content_type_for_path(path);
    let text = extract::extract_text(&bytes, content_type)?;

    if text.trim().is_empty() {
        bail!("no text extracted from {}", path.display());
    }

    std::fs::create_dir_all(notes_dir)
        .with_context(|| format!("Failed to create {}", notes_dir.display()))?;
    let target = available_target(notes_dir, path);
    std::fs::write(&target, text.trim())
        .with_context(|| format!("Failed to write {}", target.display()))?;

    println!("ingest {}", path.display());
    println!("  content type: {}", content_type);
    println!("  filed as: {}", target.display());
    println!("ok");

    Ok(())
}

/// Pick a non-clobbering `.txt` name in the notes directory.
fn available_target(notes_dir: &Path, source: &Path) -> PathBuf {
    let stem = source
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("note");

    let mut target = notes_dir.join(format!("{}.txt", stem));
    let mut counter = 1;
    while target.exists() {
        target = notes_dir.join(format!("{}-{}.txt", stem, counter));
        counter += 1;
    }
    target
}
