//! Interactive query shell over a processed corpus.
//!
//! Lines starting with a command keyword adjust the session; any other line
//! runs as a query under the current retrieval model.

use std::path::Path;

use anyhow::Result;
use engine::{Analyzer, CorpusStats, InvertedIndex, TermMatrix, WeightingScheme};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::corpus_io;

enum Model {
    Boolean,
    Vsm,
}

pub fn run(
    corpus_dir: &Path,
    analyzer: &Analyzer,
    scheme: WeightingScheme,
    top_k: usize,
) -> Result<()> {
    let corpus = corpus_io::load_corpus(corpus_dir)?;
    let index = InvertedIndex::build(&corpus);
    let stats = CorpusStats::build(&corpus);
    let mut matrix = TermMatrix::build(&stats, scheme);
    let mut model = Model::Vsm;
    let mut top_k = top_k;

    println!(
        "{} documents, {} terms. Type 'help' for commands, anything else to search.",
        corpus.len(),
        index.num_terms()
    );

    let mut rl = DefaultEditor::new()?;
    loop {
        let readline = rl.readline("quarry> ");
        match readline {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let parts: Vec<&str> = line.split_whitespace().collect();
                match parts[0] {
                    "exit" | "quit" => break,
                    "help" => print_help(),
                    "mode" => match parts.get(1).copied() {
                        Some("boolean") => {
                            model = Model::Boolean;
                            println!("model: boolean");
                        }
                        Some("vsm") => {
                            model = Model::Vsm;
                            println!("model: vsm");
                        }
                        _ => println!("usage: mode boolean|vsm"),
                    },
                    "scheme" => match parts.get(1) {
                        Some(name) => match WeightingScheme::parse(name) {
                            Ok(next) => {
                                // Selecting a scheme always rebuilds the matrix,
                                // even when it is the one already active.
                                matrix = TermMatrix::build(&stats, next);
                                println!("scheme: {next}");
                            }
                            Err(err) => println!("{err}"),
                        },
                        None => println!("usage: scheme standard|sublinear"),
                    },
                    "k" => match parts.get(1).and_then(|v| v.parse::<usize>().ok()) {
                        Some(n) if n > 0 => {
                            top_k = n;
                            println!("top_k: {n}");
                        }
                        _ => println!("usage: k <positive integer>"),
                    },
                    "term" => match parts.get(1) {
                        Some(raw) => {
                            let term = analyzer
                                .analyze(raw)
                                .into_iter()
                                .next()
                                .unwrap_or_else(|| raw.to_string());
                            println!(
                                "term {term:?}: df = {}, idf = {:.4}",
                                stats.doc_frequency(&term),
                                stats.idf(&term)
                            );
                        }
                        None => println!("usage: term <word>"),
                    },
                    "stats" => {
                        println!("documents: {}", stats.num_docs());
                        println!("terms:     {}", stats.num_terms());
                        println!("scheme:    {}", matrix.scheme());
                        println!("top_k:     {top_k}");
                    }
                    _ => match model {
                        Model::Boolean => {
                            let hits = index.search(line);
                            println!("{} matching document(s)", hits.len());
                            for doc in &hits {
                                println!("  {doc}");
                            }
                        }
                        Model::Vsm => {
                            let ranked = matrix.rank(&analyzer.analyze(line));
                            for (i, hit) in ranked.iter().take(top_k).enumerate() {
                                println!("{:<6}{:<28}{:.4}", i + 1, hit.doc, hit.score);
                            }
                        }
                    },
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            }
            Err(err) => {
                println!("Error: {err:?}");
                break;
            }
        }
    }
    Ok(())
}

fn print_help() {
    println!("commands:");
    println!("  mode boolean|vsm   switch retrieval model (vsm at startup)");
    println!("  scheme <name>      rebuild the term matrix under a weighting scheme");
    println!("  k <n>              number of ranked results to print");
    println!("  term <word>        document frequency and idf of a term");
    println!("  stats              corpus and session summary");
    println!("  exit | quit        leave the shell");
    println!("any other line runs as a query under the current model");
}
