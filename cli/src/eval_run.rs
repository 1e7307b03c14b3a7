//! Judged evaluation: score both retrieval models against a set of queries
//! with known relevant documents.
//!
//! The judgment file is a JSON object mapping each query string to the list
//! of relevant document ids, e.g.
//! `{"cats": ["pets.txt"], "dogs or birds": ["pets.txt", "birds.txt"]}`.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use engine::{eval, Analyzer, CorpusStats, InvertedIndex, TermMatrix, WeightingScheme};

use crate::corpus_io;

type Judgments = BTreeMap<String, BTreeSet<String>>;

pub fn run(
    corpus_dir: &Path,
    judgments_path: &Path,
    analyzer: &Analyzer,
    top_k: usize,
) -> Result<()> {
    let corpus = corpus_io::load_corpus(corpus_dir)?;
    let judgments: Judgments = serde_json::from_str(
        &fs::read_to_string(judgments_path)
            .with_context(|| format!("reading {}", judgments_path.display()))?,
    )
    .with_context(|| format!("parsing {}", judgments_path.display()))?;
    tracing::info!(docs = corpus.len(), queries = judgments.len(), "evaluation run");

    let index = InvertedIndex::build(&corpus);
    println!("boolean retrieval");
    println!("{:<28}{:<12}{:<12}{}", "query", "precision", "recall", "f1");
    for (query, relevant) in &judgments {
        let retrieved = index.search(query);
        let p = eval::precision(&retrieved, relevant);
        let r = eval::recall(&retrieved, relevant);
        println!(
            "{:<28}{:<12.4}{:<12.4}{:.4}",
            query,
            p,
            r,
            eval::f1_score(p, r)
        );
    }

    let stats = CorpusStats::build(&corpus);
    for scheme in [WeightingScheme::Standard, WeightingScheme::Sublinear] {
        let matrix = TermMatrix::build(&stats, scheme);
        println!();
        println!("vsm, {scheme} scheme, k = {top_k}");
        println!("{:<28}{:<12}{:<12}{}", "query", "p@k", "ap@k", "ndcg@k");
        let mut sum_p = 0.0;
        let mut sum_ap = 0.0;
        let mut sum_ndcg = 0.0;
        for (query, relevant) in &judgments {
            let ranked = matrix.rank(&analyzer.analyze(query));
            let p = eval::precision_at_k(&ranked, relevant, top_k);
            let ap = eval::average_precision(&ranked, relevant, Some(top_k));
            let ndcg = eval::ndcg_at_k(&ranked, relevant, top_k);
            sum_p += p;
            sum_ap += ap;
            sum_ndcg += ndcg;
            println!("{:<28}{:<12.4}{:<12.4}{:.4}", query, p, ap, ndcg);
        }
        let n = judgments.len().max(1) as f64;
        println!(
            "{:<28}{:<12.4}{:<12.4}{:.4}",
            "mean",
            sum_p / n,
            sum_ap / n,
            sum_ndcg / n
        );
    }
    Ok(())
}
