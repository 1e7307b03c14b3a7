//! `quarry` command line: preprocess a corpus, query it, evaluate retrieval.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use engine::analysis::Algorithm;
use engine::{Analyzer, CorpusStats, InvertedIndex, TermMatrix, WeightingScheme};
use tracing_subscriber::{EnvFilter, fmt};

mod corpus_io;
mod eval_run;
mod shell;

#[derive(Parser)]
#[command(name = "quarry")]
#[command(about = "Boolean and TF-IDF retrieval over a directory of text files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Analyzer settings shared by every subcommand. Queries must be analyzed
/// exactly like the corpus was, so keep these consistent across runs.
#[derive(Args)]
struct AnalyzerArgs {
    /// Snowball stemmer language
    #[arg(long, default_value = "english")]
    language: String,
    /// Newline-separated stopword file replacing the built-in English list
    #[arg(long)]
    stopwords: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Tokenize raw text files into a processed corpus directory
    Preprocess {
        /// Directory of raw .txt documents
        #[arg(long)]
        raw: String,
        /// Output directory for the tokenized documents
        #[arg(long)]
        processed: String,
        #[command(flatten)]
        analyzer: AnalyzerArgs,
    },
    /// Run one query against a processed corpus
    Search {
        /// Processed corpus directory
        #[arg(long)]
        corpus: String,
        /// Retrieval model: "boolean" or "vsm"
        #[arg(long, default_value = "vsm")]
        model: String,
        /// Term weighting scheme for the vsm model
        #[arg(long, default_value = "standard", value_parser = WeightingScheme::parse)]
        scheme: WeightingScheme,
        /// Number of ranked results to print
        #[arg(long, default_value_t = 5)]
        top_k: usize,
        /// Print results as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
        #[command(flatten)]
        analyzer: AnalyzerArgs,
        /// Query text
        query: Vec<String>,
    },
    /// Interactive query shell
    Shell {
        /// Processed corpus directory
        #[arg(long)]
        corpus: String,
        /// Term weighting scheme to start with
        #[arg(long, default_value = "standard", value_parser = WeightingScheme::parse)]
        scheme: WeightingScheme,
        /// Number of ranked results to print
        #[arg(long, default_value_t = 5)]
        top_k: usize,
        #[command(flatten)]
        analyzer: AnalyzerArgs,
    },
    /// Score both retrieval models against a relevance judgment file
    Eval {
        /// Processed corpus directory
        #[arg(long)]
        corpus: String,
        /// JSON file mapping each query to its relevant document ids
        #[arg(long)]
        judgments: String,
        /// Ranking cutoff for p@k, ap@k and ndcg@k
        #[arg(long, default_value_t = 5)]
        top_k: usize,
        #[command(flatten)]
        analyzer: AnalyzerArgs,
    },
}

impl AnalyzerArgs {
    fn build(&self) -> Result<Analyzer> {
        let algorithm = match self.language.as_str() {
            "danish" => Algorithm::Danish,
            "dutch" => Algorithm::Dutch,
            "english" => Algorithm::English,
            "finnish" => Algorithm::Finnish,
            "french" => Algorithm::French,
            "german" => Algorithm::German,
            "hungarian" => Algorithm::Hungarian,
            "italian" => Algorithm::Italian,
            "norwegian" => Algorithm::Norwegian,
            "portuguese" => Algorithm::Portuguese,
            "romanian" => Algorithm::Romanian,
            "russian" => Algorithm::Russian,
            "spanish" => Algorithm::Spanish,
            "swedish" => Algorithm::Swedish,
            "turkish" => Algorithm::Turkish,
            other => bail!("unsupported stemmer language: {other}"),
        };
        let mut analyzer = Analyzer::new(algorithm);
        if let Some(path) = &self.stopwords {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("reading stopword file {path}"))?;
            analyzer = analyzer.with_stopwords(
                contents
                    .lines()
                    .map(|line| line.trim().to_lowercase())
                    .filter(|line| !line.is_empty()),
            );
        }
        Ok(analyzer)
    }
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Preprocess { raw, processed, analyzer } => {
            let analyzer = analyzer.build()?;
            let n = corpus_io::preprocess_dir(&analyzer, Path::new(&raw), Path::new(&processed))?;
            println!("processed {n} documents into {processed}");
            Ok(())
        }
        Commands::Search { corpus, model, scheme, top_k, json, analyzer, query } => {
            run_search(&corpus, &model, scheme, top_k, json, &analyzer.build()?, &query.join(" "))
        }
        Commands::Shell { corpus, scheme, top_k, analyzer } => {
            shell::run(Path::new(&corpus), &analyzer.build()?, scheme, top_k)
        }
        Commands::Eval { corpus, judgments, top_k, analyzer } => {
            eval_run::run(Path::new(&corpus), Path::new(&judgments), &analyzer.build()?, top_k)
        }
    }
}

fn run_search(
    corpus_dir: &str,
    model: &str,
    scheme: WeightingScheme,
    top_k: usize,
    json: bool,
    analyzer: &Analyzer,
    query: &str,
) -> Result<()> {
    let corpus = corpus_io::load_corpus(Path::new(corpus_dir))?;
    tracing::info!(docs = corpus.len(), corpus = corpus_dir, "loaded corpus");

    match model {
        "boolean" => {
            let index = InvertedIndex::build(&corpus);
            let hits = index.search(query);
            if json {
                println!("{}", serde_json::to_string_pretty(&hits)?);
            } else {
                println!("{} matching document(s)", hits.len());
                for doc in &hits {
                    println!("  {doc}");
                }
            }
        }
        "vsm" => {
            let stats = CorpusStats::build(&corpus);
            let matrix = TermMatrix::build(&stats, scheme);
            let ranked = matrix.rank(&analyzer.analyze(query));
            if json {
                let top: Vec<_> = ranked.iter().take(top_k).collect();
                println!("{}", serde_json::to_string_pretty(&top)?);
            } else {
                println!("{:<6}{:<28}{}", "rank", "document", "score");
                for (i, hit) in ranked.iter().take(top_k).enumerate() {
                    println!("{:<6}{:<28}{:.4}", i + 1, hit.doc, hit.score);
                }
            }
        }
        other => bail!("unknown retrieval model: {other} (expected \"boolean\" or \"vsm\")"),
    }
    Ok(())
}
