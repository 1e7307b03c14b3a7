use std::collections::BTreeMap;

/// A fixed corpus snapshot: document id -> normalized token sequence.
///
/// Documents are immutable once inserted; derived structures (inverted
/// index, statistics, weight matrices) are rebuilt from a snapshot rather
/// than updated in place. The map is a `BTreeMap` so document iteration is
/// lexicographic by id, which pins the row order of the weight matrix
/// across runs.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    docs: BTreeMap<String, Vec<String>>,
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert (or replace) a document's token sequence.
    pub fn insert(&mut self, id: impl Into<String>, tokens: Vec<String>) {
        self.docs.insert(id.into(), tokens);
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.docs.contains_key(id)
    }

    /// Token sequence of one document, if present.
    pub fn tokens(&self, id: &str) -> Option<&[String]> {
        self.docs.get(id).map(Vec::as_slice)
    }

    /// Documents in lexicographic id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.docs.iter().map(|(id, toks)| (id.as_str(), toks.as_slice()))
    }

    /// Document ids in lexicographic order.
    pub fn doc_ids(&self) -> impl Iterator<Item = &str> {
        self.docs.keys().map(String::as_str)
    }
}

impl FromIterator<(String, Vec<String>)> for Corpus {
    fn from_iter<I: IntoIterator<Item = (String, Vec<String>)>>(iter: I) -> Self {
        Self {
            docs: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn iteration_is_lexicographic() {
        let mut corpus = Corpus::new();
        corpus.insert("doc2.txt", toks(&["b"]));
        corpus.insert("doc10.txt", toks(&["c"]));
        corpus.insert("doc1.txt", toks(&["a"]));
        let ids: Vec<&str> = corpus.doc_ids().collect();
        // String order, so "doc10" sorts before "doc2".
        assert_eq!(ids, vec!["doc1.txt", "doc10.txt", "doc2.txt"]);
    }

    #[test]
    fn reinsert_replaces_tokens() {
        let mut corpus = Corpus::new();
        corpus.insert("d", toks(&["old"]));
        corpus.insert("d", toks(&["new"]));
        assert_eq!(corpus.len(), 1);
        assert_eq!(corpus.tokens("d"), Some(&toks(&["new"])[..]));
    }
}
