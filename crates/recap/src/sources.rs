//! Corpus sources: the base notes file plus auxiliary files in the notes
//! directory, read once at startup.
//!
//! A missing or unreadable source is never fatal — it is logged and
//! contributes nothing, so a fresh checkout starts with an empty corpus
//! and the retriever's "no notes" sentinel instead of an error.

use anyhow::Result;
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::Path;
use walkdir::WalkDir;

use recap_core::models::{Document, DocumentOrigin};

use crate::config::{Config, CorpusConfig};

/// Load the initial corpus: the base file first, then auxiliary files
/// sorted by relative path (deterministic ordering, and therefore
/// deterministic tie-breaks downstream).
///
/// Only documents that are non-empty after trimming are returned. The
/// base file is excluded from the directory scan so it cannot contribute
/// twice when it lives inside the notes directory.
pub fn load_initial_corpus(config: &CorpusConfig) -> Vec<Document> {
    let mut documents = Vec::new();

    match std::fs::read_to_string(&config.base_file) {
        Ok(text) => match Document::new(&text, DocumentOrigin::BaseCorpus) {
            Some(doc) => documents.push(doc),
            None => {
                tracing::warn!(path = %config.base_file.display(), "base notes file is empty, skipping")
            }
        },
        Err(err) => {
            tracing::warn!(path = %config.base_file.display(), %err, "base notes file unavailable, starting without it")
        }
    }

    if let Some(dir) = &config.notes_dir {
        documents.extend(load_auxiliary(dir, &config.include_globs, &config.base_file));
    }

    documents
}

fn load_auxiliary(root: &Path, include_globs: &[String], base_file: &Path) -> Vec<Document> {
    let include_set = match build_globset(include_globs) {
        Ok(set) => set,
        Err(err) => {
            tracing::warn!(%err, "invalid corpus.include_globs, skipping notes directory");
            return Vec::new();
        }
    };

    if !root.is_dir() {
        tracing::warn!(path = %root.display(), "notes directory unavailable, skipping");
        return Vec::new();
    }

    let base_canonical = base_file.canonicalize().ok();

    let mut found: Vec<(String, Document)> = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                tracing::warn!(%err, "skipping unreadable notes entry");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let relative = path.strip_prefix(root).unwrap_or(path);
        let rel_str = relative.to_string_lossy().to_string();

        if !include_set.is_match(&rel_str) {
            continue;
        }

        // The base file contributes through its own slot, not the scan.
        if base_canonical.is_some() && path.canonicalize().ok() == base_canonical {
            continue;
        }

        match std::fs::read_to_string(path) {
            Ok(text) => {
                if let Some(doc) = Document::new(&text, DocumentOrigin::BaseCorpus) {
                    found.push((rel_str, doc));
                }
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "skipping unreadable notes file")
            }
        }
    }

    found.sort_by(|a, b| a.0.cmp(&b.0));
    found.into_iter().map(|(_, doc)| doc).collect()
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}

/// CLI entry point — print each configured source and its status.
pub fn list_sources(config: &Config) -> Result<()> {
    println!("{:<12} {:<48} STATUS", "SOURCE", "PATH");

    let base_status = if config.corpus.base_file.is_file() {
        "OK"
    } else {
        "MISSING"
    };
    println!(
        "{:<12} {:<48} {}",
        "base",
        config.corpus.base_file.display().to_string(),
        base_status
    );

    match &config.corpus.notes_dir {
        Some(dir) => {
            let status = if dir.is_dir() { "OK" } else { "MISSING" };
            println!("{:<12} {:<48} {}", "notes-dir", dir.display().to_string(), status);
        }
        None => {
            println!("{:<12} {:<48} NOT CONFIGURED", "notes-dir", "-");
        }
    }

    let documents = load_initial_corpus(&config.corpus);
    println!("  documents at startup: {}", documents.len());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn corpus_config(base_file: PathBuf, notes_dir: Option<PathBuf>) -> CorpusConfig {
        CorpusConfig {
            base_file,
            notes_dir,
            include_globs: vec!["**/*.txt".to_string(), "**/*.md".to_string()],
        }
    }

    #[test]
    fn missing_base_file_yields_empty_corpus() {
        let tmp = TempDir::new().unwrap();
        let config = corpus_config(tmp.path().join("absent.txt"), None);
        assert!(load_initial_corpus(&config).is_empty());
    }

    #[test]
    fn base_then_auxiliary_in_path_order() {
        let tmp = TempDir::new().unwrap();
        let base = tmp.path().join("notes.txt");
        fs::write(&base, "base notes").unwrap();

        let dir = tmp.path().join("notes");
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join("b-physics.txt"), "physics notes").unwrap();
        fs::write(dir.join("a-biology.txt"), "biology notes").unwrap();

        let config = corpus_config(base, Some(dir));
        let docs = load_initial_corpus(&config);
        let bodies: Vec<&str> = docs.iter().map(|d| d.body.as_str()).collect();
        assert_eq!(bodies, vec!["base notes", "biology notes", "physics notes"]);
    }

    #[test]
    fn base_file_inside_notes_dir_counted_once() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("notes");
        fs::create_dir(&dir).unwrap();
        let base = dir.join("notes.txt");
        fs::write(&base, "only once").unwrap();

        let config = corpus_config(base, Some(dir));
        let docs = load_initial_corpus(&config);
        assert_eq!(docs.len(), 1);
    }

    #[test]
    fn empty_and_non_matching_files_skipped() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("notes");
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join("blank.txt"), "   \n\t").unwrap();
        fs::write(dir.join("image.png"), "not notes").unwrap();
        fs::write(dir.join("real.md"), "actual notes").unwrap();

        let config = corpus_config(tmp.path().join("absent.txt"), Some(dir));
        let docs = load_initial_corpus(&config);
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].body, "actual notes");
    }
}
