//! Boolean and vector-space retrieval over a fixed corpus of tokenized
//! documents.
//!
//! The engine is a set of pure functions over immutable corpus snapshots:
//! [`InvertedIndex`] answers exact boolean queries, [`CorpusStats`] derives
//! tf/df/idf tables, and [`TermMatrix`] ranks every document by cosine
//! similarity under a selectable [`WeightingScheme`]. Text normalization
//! lives in [`analysis`]; callers hand the engine already-normalized token
//! sequences and consume either a result set (boolean) or a full scored
//! ranking (vector space). The [`eval`] module scores those outputs against
//! relevance judgments.

pub mod analysis;
pub mod boolean;
pub mod corpus;
pub mod eval;
pub mod tfidf;
pub mod vsm;

pub use analysis::Analyzer;
pub use boolean::{BooleanQuery, InvertedIndex};
pub use corpus::Corpus;
pub use tfidf::CorpusStats;
pub use vsm::{RankedDoc, TermMatrix, WeightingScheme};
