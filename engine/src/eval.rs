//! Offline retrieval-quality metrics.
//!
//! Set metrics consume boolean result sets; ranked metrics consume the
//! full `(doc, score)` ranking the vector-space model returns. Nothing
//! here performs retrieval; these are pure functions over engine outputs
//! and a relevance judgment set.

use std::collections::BTreeSet;

use crate::vsm::RankedDoc;

/// Fraction of retrieved documents that are relevant. Empty retrieval
/// scores 0.0.
pub fn precision(retrieved: &BTreeSet<String>, relevant: &BTreeSet<String>) -> f64 {
    if retrieved.is_empty() {
        return 0.0;
    }
    retrieved.intersection(relevant).count() as f64 / retrieved.len() as f64
}

/// Fraction of relevant documents that were retrieved. Empty judgment set
/// scores 0.0.
pub fn recall(retrieved: &BTreeSet<String>, relevant: &BTreeSet<String>) -> f64 {
    if relevant.is_empty() {
        return 0.0;
    }
    retrieved.intersection(relevant).count() as f64 / relevant.len() as f64
}

/// Harmonic mean of precision and recall; 0.0 when both are zero.
pub fn f1_score(precision: f64, recall: f64) -> f64 {
    if precision + recall == 0.0 {
        return 0.0;
    }
    2.0 * precision * recall / (precision + recall)
}

/// Precision over the first k ranks. The divisor is k itself, so a ranking
/// shorter than k is penalized for the missing positions.
pub fn precision_at_k(ranked: &[RankedDoc], relevant: &BTreeSet<String>, k: usize) -> f64 {
    if k == 0 {
        return 0.0;
    }
    let hits = ranked
        .iter()
        .take(k)
        .filter(|r| relevant.contains(&r.doc))
        .count();
    hits as f64 / k as f64
}

/// Average of the precision values at each rank where a relevant document
/// appears, optionally truncated to the first k ranks. No hits scores 0.0.
pub fn average_precision(
    ranked: &[RankedDoc],
    relevant: &BTreeSet<String>,
    k: Option<usize>,
) -> f64 {
    let cutoff = k.unwrap_or(ranked.len());
    let mut hits = 0u32;
    let mut sum = 0.0;
    for (rank, entry) in ranked.iter().take(cutoff).enumerate() {
        if relevant.contains(&entry.doc) {
            hits += 1;
            sum += f64::from(hits) / (rank + 1) as f64;
        }
    }
    if hits == 0 {
        0.0
    } else {
        sum / f64::from(hits)
    }
}

/// Normalized discounted cumulative gain over the first k ranks, with
/// binary gains and a log2(rank + 1) discount. Zero ideal DCG (no relevant
/// documents reachable in k) scores 0.0.
pub fn ndcg_at_k(ranked: &[RankedDoc], relevant: &BTreeSet<String>, k: usize) -> f64 {
    let gains: Vec<f64> = ranked
        .iter()
        .take(k)
        .map(|r| if relevant.contains(&r.doc) { 1.0 } else { 0.0 })
        .collect();
    let mut ideal = gains.clone();
    ideal.sort_by(|a, b| b.total_cmp(a));

    let dcg = |scores: &[f64]| -> f64 {
        scores
            .iter()
            .enumerate()
            .map(|(idx, gain)| gain / ((idx as f64) + 2.0).log2())
            .sum()
    };

    let ideal_dcg = dcg(&ideal);
    if ideal_dcg > 0.0 {
        dcg(&gains) / ideal_dcg
    } else {
        0.0
    }
}
