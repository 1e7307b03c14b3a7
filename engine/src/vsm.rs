use std::collections::HashMap;
use std::fmt;

use anyhow::{bail, Result};
use nalgebra::{DMatrix, DVector};
use serde::Serialize;

use crate::tfidf::CorpusStats;

/// Term-weight formula applied to both document rows and query vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightingScheme {
    /// `tf × idf`
    Standard,
    /// `ln(1 + tf) × idf`
    Sublinear,
}

impl WeightingScheme {
    /// Parse a scheme name. Unknown names are a configuration error and
    /// are rejected, never silently defaulted.
    pub fn parse(name: &str) -> Result<Self> {
        match name {
            "standard" => Ok(Self::Standard),
            "sublinear" => Ok(Self::Sublinear),
            other => bail!("unknown weighting scheme {other:?} (expected \"standard\" or \"sublinear\")"),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Sublinear => "sublinear",
        }
    }

    fn weight(self, tf: u32, idf: f64) -> f64 {
        match self {
            Self::Standard => tf as f64 * idf,
            Self::Sublinear => (tf as f64).ln_1p() * idf,
        }
    }
}

impl fmt::Display for WeightingScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One scored document in a ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedDoc {
    pub doc: String,
    pub score: f64,
}

/// Dense document × term weight matrix under one scheme.
///
/// Rows follow the lexicographic document order, columns the sorted term
/// vocabulary (all idf keys); both orders and the term -> column map are
/// fixed at build time, so cell positions are stable across runs for the
/// same corpus. The matrix is rebuilt per scheme selection and never
/// mutated by ranking.
#[derive(Debug)]
pub struct TermMatrix {
    scheme: WeightingScheme,
    doc_order: Vec<String>,
    vocabulary: Vec<String>,
    columns: HashMap<String, usize>,
    /// idf per vocabulary column, so query weighting never goes back to
    /// the string-keyed table.
    idf: Vec<f64>,
    weights: DMatrix<f64>,
}

impl TermMatrix {
    /// Build the weight matrix for `scheme` from corpus statistics.
    pub fn build(stats: &CorpusStats, scheme: WeightingScheme) -> Self {
        let mut vocabulary: Vec<String> = stats.idf_table().keys().cloned().collect();
        vocabulary.sort();
        let columns: HashMap<String, usize> = vocabulary
            .iter()
            .enumerate()
            .map(|(col, term)| (term.clone(), col))
            .collect();
        let idf: Vec<f64> = vocabulary.iter().map(|term| stats.idf(term)).collect();
        let doc_order: Vec<String> = stats.documents().map(str::to_string).collect();

        let mut weights = DMatrix::zeros(doc_order.len(), vocabulary.len());
        for (row, doc) in doc_order.iter().enumerate() {
            if let Some(counts) = stats.term_counts(doc) {
                for (term, &freq) in counts {
                    if let Some(&col) = columns.get(term) {
                        weights[(row, col)] = scheme.weight(freq, idf[col]);
                    }
                }
            }
        }

        tracing::debug!(
            docs = doc_order.len(),
            terms = vocabulary.len(),
            scheme = scheme.name(),
            "built weight matrix"
        );
        Self {
            scheme,
            doc_order,
            vocabulary,
            columns,
            idf,
            weights,
        }
    }

    pub fn scheme(&self) -> WeightingScheme {
        self.scheme
    }

    pub fn num_docs(&self) -> usize {
        self.doc_order.len()
    }

    /// Document ids in row order.
    pub fn doc_ids(&self) -> &[String] {
        &self.doc_order
    }

    /// Sorted term vocabulary in column order.
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    pub fn weights(&self) -> &DMatrix<f64> {
        &self.weights
    }

    /// Weight of `term` in `doc`, if both are known.
    pub fn weight(&self, doc: &str, term: &str) -> Option<f64> {
        let row = self
            .doc_order
            .binary_search_by(|d| d.as_str().cmp(doc))
            .ok()?;
        let col = *self.columns.get(term)?;
        Some(self.weights[(row, col)])
    }

    /// Build a query vector over the fixed vocabulary using this matrix's
    /// scheme. Query terms outside the vocabulary contribute nothing to
    /// the vector and so never influence ranking.
    pub fn query_vector(&self, query_tokens: &[String]) -> DVector<f64> {
        let mut counts: HashMap<&str, u32> = HashMap::new();
        for token in query_tokens {
            *counts.entry(token.as_str()).or_insert(0) += 1;
        }
        let mut vector = DVector::zeros(self.vocabulary.len());
        for (term, freq) in counts {
            if let Some(&col) = self.columns.get(term) {
                vector[col] = self.scheme.weight(freq, self.idf[col]);
            }
        }
        vector
    }

    /// Score every document in the corpus against the query by cosine
    /// similarity. The result is a permutation of all documents, sorted by
    /// score descending with ties broken by ascending document id; top-k
    /// truncation is the caller's concern.
    pub fn rank(&self, query_tokens: &[String]) -> Vec<RankedDoc> {
        let query = self.query_vector(query_tokens);
        let mut ranked: Vec<RankedDoc> = self
            .doc_order
            .iter()
            .enumerate()
            .map(|(row, doc)| RankedDoc {
                doc: doc.clone(),
                score: cosine(&query, &self.weights.row(row).transpose()),
            })
            .collect();
        // Deterministic: score desc, then doc id asc.
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.doc.cmp(&b.doc)));
        ranked
    }
}

/// Cosine similarity between two vectors of the same dimension. If either
/// norm is zero the similarity is defined as 0.0 rather than a division
/// fault.
pub fn cosine(a: &DVector<f64>, b: &DVector<f64>) -> f64 {
    let denom = a.norm() * b.norm();
    if denom == 0.0 {
        0.0
    } else {
        a.dot(b) / denom
    }
}
