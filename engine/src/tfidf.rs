use std::collections::{BTreeMap, HashMap};

use crate::corpus::Corpus;

/// Term statistics derived from one corpus snapshot: raw term frequencies
/// per document, document frequencies per term, and the idf table
/// `idf(t) = log10(N / df(t))` with N clamped to at least 1.
///
/// Pure function of the corpus; nothing is updated incrementally.
#[derive(Debug, Default)]
pub struct CorpusStats {
    num_docs: usize,
    // BTreeMap keeps the document listing deterministic for matrix rows.
    tf: BTreeMap<String, HashMap<String, u32>>,
    df: HashMap<String, u32>,
    idf: HashMap<String, f64>,
}

impl CorpusStats {
    pub fn build(corpus: &Corpus) -> Self {
        let mut tf: BTreeMap<String, HashMap<String, u32>> = BTreeMap::new();
        for (doc, tokens) in corpus.iter() {
            let counts = tf.entry(doc.to_string()).or_default();
            for token in tokens {
                *counts.entry(token.clone()).or_insert(0) += 1;
            }
        }

        let mut df: HashMap<String, u32> = HashMap::new();
        for counts in tf.values() {
            for term in counts.keys() {
                *df.entry(term.clone()).or_insert(0) += 1;
            }
        }

        let n = corpus.len().max(1) as f64;
        let idf: HashMap<String, f64> = df
            .iter()
            .map(|(term, &d)| {
                let weight = if d > 0 { (n / d as f64).log10() } else { 0.0 };
                (term.clone(), weight)
            })
            .collect();

        tracing::debug!(docs = corpus.len(), terms = df.len(), "built corpus statistics");
        Self {
            num_docs: corpus.len(),
            tf,
            df,
            idf,
        }
    }

    pub fn num_docs(&self) -> usize {
        self.num_docs
    }

    pub fn num_terms(&self) -> usize {
        self.df.len()
    }

    /// Raw occurrence count of `term` in `doc` (0 if either is unknown).
    pub fn term_frequency(&self, doc: &str, term: &str) -> u32 {
        self.tf
            .get(doc)
            .and_then(|counts| counts.get(term))
            .copied()
            .unwrap_or(0)
    }

    /// Number of distinct documents containing `term`.
    pub fn doc_frequency(&self, term: &str) -> u32 {
        self.df.get(term).copied().unwrap_or(0)
    }

    /// Inverse document frequency of `term` (0.0 for unknown terms).
    pub fn idf(&self, term: &str) -> f64 {
        self.idf.get(term).copied().unwrap_or(0.0)
    }

    /// Documents with a term-frequency table, in lexicographic id order.
    pub fn documents(&self) -> impl Iterator<Item = &str> {
        self.tf.keys().map(String::as_str)
    }

    /// Per-term counts for one document.
    pub fn term_counts(&self, doc: &str) -> Option<&HashMap<String, u32>> {
        self.tf.get(doc)
    }

    /// The full idf table (vocabulary source for the weight matrix).
    pub fn idf_table(&self) -> &HashMap<String, f64> {
        &self.idf
    }
}
