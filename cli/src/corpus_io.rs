//! Corpus directories on disk.
//!
//! A raw corpus is a flat directory of `*.txt` files. Preprocessing analyzes
//! each file and writes the tokens, space-joined, to a processed directory
//! under the same file name. The file name doubles as the document id.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use engine::{Analyzer, Corpus};
use walkdir::WalkDir;

/// Analyze every `*.txt` file directly under `raw` and write its token
/// stream to `processed`. Returns the number of documents written.
pub fn preprocess_dir(analyzer: &Analyzer, raw: &Path, processed: &Path) -> Result<usize> {
    if !raw.is_dir() {
        bail!("raw corpus directory not found: {}", raw.display());
    }
    fs::create_dir_all(processed)
        .with_context(|| format!("creating {}", processed.display()))?;

    let mut written = 0usize;
    for entry in WalkDir::new(raw).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry?;
        if !is_txt(entry.path()) {
            continue;
        }
        let text = fs::read_to_string(entry.path())
            .with_context(|| format!("reading {}", entry.path().display()))?;
        let tokens = analyzer.analyze(&text);
        let out = processed.join(entry.file_name());
        fs::write(&out, tokens.join(" "))
            .with_context(|| format!("writing {}", out.display()))?;
        tracing::info!(
            doc = %entry.file_name().to_string_lossy(),
            tokens = tokens.len(),
            "processed document"
        );
        written += 1;
    }
    Ok(written)
}

/// Load a processed corpus. Each `*.txt` file becomes one document: id is
/// the file name, tokens are the whitespace-split contents. A missing
/// directory loads as an empty corpus rather than an error.
pub fn load_corpus(processed: &Path) -> Result<Corpus> {
    let mut corpus = Corpus::new();
    if !processed.is_dir() {
        tracing::warn!(dir = %processed.display(), "processed corpus directory missing");
        return Ok(corpus);
    }
    for entry in WalkDir::new(processed).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry?;
        if !is_txt(entry.path()) {
            continue;
        }
        let contents = fs::read_to_string(entry.path())
            .with_context(|| format!("reading {}", entry.path().display()))?;
        let tokens = contents.split_whitespace().map(str::to_string).collect();
        corpus.insert(entry.file_name().to_string_lossy().into_owned(), tokens);
    }
    Ok(corpus)
}

fn is_txt(path: &Path) -> bool {
    path.is_file() && path.extension().and_then(|e| e.to_str()) == Some("txt")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preprocess_writes_token_files() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let raw = tmp.path().join("raw");
        let processed = tmp.path().join("processed");
        fs::create_dir(&raw).expect("mkdir");
        fs::write(raw.join("a.txt"), "Cats are chasing dogs.").expect("write");
        fs::write(raw.join("notes.md"), "ignored").expect("write");

        let analyzer = Analyzer::default();
        let n = preprocess_dir(&analyzer, &raw, &processed).expect("preprocess");
        assert_eq!(n, 1);

        let out = fs::read_to_string(processed.join("a.txt")).expect("read");
        assert_eq!(out, "cat chase dog");
        assert!(!processed.join("notes.md").exists());
    }

    #[test]
    fn preprocess_missing_raw_dir_is_an_error() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let analyzer = Analyzer::default();
        let err = preprocess_dir(&analyzer, &tmp.path().join("nope"), &tmp.path().join("out"));
        assert!(err.is_err());
    }

    #[test]
    fn load_round_trips_processed_files() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let processed = tmp.path().join("processed");
        fs::create_dir(&processed).expect("mkdir");
        fs::write(processed.join("doc1.txt"), "cat dog cat").expect("write");
        fs::write(processed.join("doc2.txt"), "bird").expect("write");

        let corpus = load_corpus(&processed).expect("load");
        assert_eq!(corpus.len(), 2);
        assert_eq!(
            corpus.tokens("doc1.txt").expect("doc1"),
            &["cat".to_string(), "dog".to_string(), "cat".to_string()][..]
        );
    }

    #[test]
    fn load_missing_dir_yields_empty_corpus() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let corpus = load_corpus(&tmp.path().join("absent")).expect("load");
        assert!(corpus.is_empty());
    }
}
