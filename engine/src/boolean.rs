use std::collections::{BTreeSet, HashMap};

use crate::corpus::Corpus;

/// Exact-match retrieval: term -> set of document ids containing it.
///
/// A document id appears under term `t` iff `t` occurs at least once in
/// that document's token sequence. Built once per corpus snapshot; rebuilt
/// wholesale if the corpus changes.
#[derive(Debug, Default)]
pub struct InvertedIndex {
    postings: HashMap<String, BTreeSet<String>>,
    all_docs: BTreeSet<String>,
}

impl InvertedIndex {
    /// Index every distinct token of every document. Pure function of the
    /// corpus; an empty corpus yields an empty index.
    pub fn build(corpus: &Corpus) -> Self {
        let mut postings: HashMap<String, BTreeSet<String>> = HashMap::new();
        let mut all_docs = BTreeSet::new();
        for (doc, tokens) in corpus.iter() {
            all_docs.insert(doc.to_string());
            for token in tokens {
                postings
                    .entry(token.clone())
                    .or_default()
                    .insert(doc.to_string());
            }
        }
        tracing::debug!(
            docs = all_docs.len(),
            terms = postings.len(),
            "built inverted index"
        );
        Self { postings, all_docs }
    }

    /// Posting set for a term. Unknown terms yield the empty set.
    pub fn postings(&self, term: &str) -> BTreeSet<String> {
        self.postings.get(term).cloned().unwrap_or_default()
    }

    /// Number of distinct documents containing `term`.
    pub fn doc_frequency(&self, term: &str) -> usize {
        self.postings.get(term).map_or(0, BTreeSet::len)
    }

    pub fn num_docs(&self) -> usize {
        self.all_docs.len()
    }

    pub fn num_terms(&self) -> usize {
        self.postings.len()
    }

    /// Evaluate a parsed query. Results are deduplicated and carry no
    /// ordering guarantee beyond the set's own.
    pub fn eval(&self, query: &BooleanQuery) -> BTreeSet<String> {
        match query {
            BooleanQuery::Term(t) => self.postings(t),
            BooleanQuery::And(t1, t2) => &self.postings(t1) & &self.postings(t2),
            BooleanQuery::Or(t1, t2) => &self.postings(t1) | &self.postings(t2),
            // Asymmetric: documents containing t1 but not t2, i.e.
            // P(t1) ∩ (U \ P(t2)), which reduces to set difference.
            BooleanQuery::Not(t1, t2) => &self.postings(t1) - &self.postings(t2),
        }
    }

    /// Parse and evaluate in one step.
    pub fn search(&self, query: &str) -> BTreeSet<String> {
        self.eval(&BooleanQuery::parse(query))
    }
}

/// A query in the restricted boolean grammar: a single term, or exactly one
/// binary connective between two terms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BooleanQuery {
    Term(String),
    And(String, String),
    Or(String, String),
    Not(String, String),
}

impl BooleanQuery {
    /// Parse a query against the restricted grammar.
    ///
    /// The query is lowercased and whitespace-split. With three or more
    /// tokens, the first occurrence of a connective word picks the
    /// operation ("and" checked before "or" before "not") and the tokens
    /// immediately around it become the operands; everything else is
    /// silently ignored. Without a recognized connective the first token
    /// becomes a single-term query, extra tokens again ignored. An empty
    /// query parses to an empty-string term, which matches no document.
    ///
    /// Deliberately minimal: no nesting, no parentheses, no second
    /// connective, and no way to search for the words "and"/"or"/"not"
    /// themselves. A connective at the very start or end of the query is
    /// missing an operand; that operand becomes the empty-string term.
    pub fn parse(query: &str) -> Self {
        let lowered = query.to_lowercase();
        let tokens: Vec<&str> = lowered.split_whitespace().collect();
        if tokens.len() >= 3 {
            for connective in ["and", "or", "not"] {
                if let Some(idx) = tokens.iter().position(|t| *t == connective) {
                    let t1 = if idx > 0 { tokens[idx - 1] } else { "" }.to_string();
                    let t2 = tokens.get(idx + 1).copied().unwrap_or("").to_string();
                    return match connective {
                        "and" => Self::And(t1, t2),
                        "or" => Self::Or(t1, t2),
                        _ => Self::Not(t1, t2),
                    };
                }
            }
        }
        Self::Term(tokens.first().copied().unwrap_or("").to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus(docs: &[(&str, &[&str])]) -> Corpus {
        docs.iter()
            .map(|(id, toks)| {
                (
                    id.to_string(),
                    toks.iter().map(|t| t.to_string()).collect::<Vec<_>>(),
                )
            })
            .collect()
    }

    fn ids(set: &BTreeSet<String>) -> Vec<&str> {
        set.iter().map(String::as_str).collect()
    }

    #[test]
    fn parse_recognizes_each_connective() {
        assert_eq!(
            BooleanQuery::parse("cat AND dog"),
            BooleanQuery::And("cat".into(), "dog".into())
        );
        assert_eq!(
            BooleanQuery::parse("cat or dog"),
            BooleanQuery::Or("cat".into(), "dog".into())
        );
        assert_eq!(
            BooleanQuery::parse("cat NOT dog"),
            BooleanQuery::Not("cat".into(), "dog".into())
        );
        assert_eq!(
            BooleanQuery::parse("cat"),
            BooleanQuery::Term("cat".into())
        );
    }

    #[test]
    fn parse_prefers_and_over_or_over_not() {
        // "and" wins even when "or" appears first in the query.
        assert_eq!(
            BooleanQuery::parse("a or b and c"),
            BooleanQuery::And("b".into(), "c".into())
        );
        assert_eq!(
            BooleanQuery::parse("a not b or c"),
            BooleanQuery::Or("b".into(), "c".into())
        );
    }

    #[test]
    fn parse_uses_first_connective_occurrence() {
        assert_eq!(
            BooleanQuery::parse("a and b and c"),
            BooleanQuery::And("a".into(), "b".into())
        );
    }

    #[test]
    fn parse_degenerates_without_connective() {
        // Extra tokens are silently dropped.
        assert_eq!(
            BooleanQuery::parse("smoke flash grenade"),
            BooleanQuery::Term("smoke".into())
        );
        // Two tokens never form a connective query.
        assert_eq!(
            BooleanQuery::parse("cat and"),
            BooleanQuery::Term("cat".into())
        );
    }

    #[test]
    fn parse_empty_query() {
        assert_eq!(BooleanQuery::parse(""), BooleanQuery::Term("".into()));
        assert_eq!(BooleanQuery::parse("   "), BooleanQuery::Term("".into()));
    }

    #[test]
    fn parse_connective_at_edge_gets_empty_operand() {
        assert_eq!(
            BooleanQuery::parse("and x y"),
            BooleanQuery::And("".into(), "x".into())
        );
        assert_eq!(
            BooleanQuery::parse("x y and"),
            BooleanQuery::And("y".into(), "".into())
        );
    }

    #[test]
    fn eval_on_two_document_corpus() {
        let corpus = corpus(&[("d1", &["a", "b"][..]), ("d2", &["b", "c"][..])]);
        let index = InvertedIndex::build(&corpus);

        assert_eq!(ids(&index.search("a and b")), vec!["d1"]);
        assert_eq!(ids(&index.search("b or c")), vec!["d1", "d2"]);
        assert_eq!(ids(&index.search("b not c")), vec!["d1"]);
        assert_eq!(ids(&index.search("b")), vec!["d1", "d2"]);
    }

    #[test]
    fn unknown_terms_contribute_empty_sets() {
        let corpus = corpus(&[("d1", &["a"][..])]);
        let index = InvertedIndex::build(&corpus);
        assert!(index.search("zzz").is_empty());
        assert!(index.search("a and zzz").is_empty());
        assert_eq!(ids(&index.search("a or zzz")), vec!["d1"]);
        assert_eq!(ids(&index.search("a not zzz")), vec!["d1"]);
    }

    #[test]
    fn not_requires_a_positive_match() {
        // NOT is not unary negation: a document matches only if it
        // contains the left term.
        let corpus = corpus(&[("d1", &["a"][..]), ("d2", &["b"][..])]);
        let index = InvertedIndex::build(&corpus);
        assert_eq!(ids(&index.search("a not b")), vec!["d1"]);
        assert!(index.search("zzz not b").is_empty());
    }

    #[test]
    fn empty_corpus_yields_empty_index() {
        let index = InvertedIndex::build(&Corpus::new());
        assert_eq!(index.num_docs(), 0);
        assert_eq!(index.num_terms(), 0);
        assert!(index.search("anything").is_empty());
    }

    #[test]
    fn queries_are_case_insensitive() {
        let corpus = corpus(&[("d1", &["cat"][..]), ("d2", &["dog"][..])]);
        let index = InvertedIndex::build(&corpus);
        assert_eq!(ids(&index.search("CAT Or DOG")), vec!["d1", "d2"]);
    }
}
