use lazy_static::lazy_static;
use regex::Regex;
use rust_stemmers::Stemmer;
use std::collections::HashSet;
use unicode_normalization::UnicodeNormalization;

pub use rust_stemmers::Algorithm;

lazy_static! {
    // Word = letter or digit start, then letters/digits/underscore/apostrophe.
    // Digits are kept so numeric tokens ("2", "16") survive normalization.
    static ref WORD: Regex =
        Regex::new(r"(?u)[\p{L}\p{N}][\p{L}\p{N}_']*").expect("valid regex");
}

const ENGLISH_STOPWORDS: &[&str] = &[
    "a","about","above","after","again","against","all","am","an","and","any","are","aren't","as","at",
    "be","because","been","before","being","below","between","both","but","by",
    "can","can't","cannot","could","couldn't",
    "did","didn't","do","does","doesn't","doing","don't","down","during",
    "each","few","for","from","further",
    "had","hadn't","has","hasn't","have","haven't","having","he","he'd","he'll","he's","her","here","here's","hers","herself","him","himself","his","how","how's",
    "i","i'd","i'll","i'm","i've","if","in","into","is","isn't","it","it's","its","itself",
    "let's","me","more","most","mustn't","my","myself",
    "no","nor","not","of","off","on","once","only","or","other","ought","our","ours","ourselves","out","over","own",
    "same","she","she'd","she'll","she's","should","shouldn't","so","some","such",
    "than","that","that's","the","their","theirs","them","themselves","then","there","there's","these","they","they'd","they'll","they're","they've","this","those","through","to","too",
    "under","until","up","very",
    "was","wasn't","we","we'd","we'll","we're","we've","were","weren't","what","what's","when","when's","where","where's","which","while","who","who's","whom","why","why's","with","won't","would","wouldn't",
    "you","you'd","you'll","you're","you've","your","yours","yourself","yourselves",
];

/// Turns raw text into the normalized token sequence the engine consumes:
/// NFKC fold, lowercase, word extraction, stopword removal, stemming.
///
/// An `Analyzer` is a plain value passed to whoever tokenizes text (corpus
/// loading, query handling); nothing here lives in process-global state, so
/// two analyzers with different configurations can coexist.
pub struct Analyzer {
    stemmer: Stemmer,
    stopwords: HashSet<String>,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(Algorithm::English)
    }
}

impl Analyzer {
    /// Analyzer with the given Snowball stemmer and the default English
    /// stopword list.
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            stemmer: Stemmer::create(algorithm),
            stopwords: ENGLISH_STOPWORDS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Replace the stopword set (entries are matched against lowercased,
    /// pre-stemming tokens).
    pub fn with_stopwords<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stopwords = words.into_iter().map(Into::into).collect();
        self
    }

    /// Raw text -> ordered normalized tokens.
    pub fn analyze(&self, text: &str) -> Vec<String> {
        let folded = text.nfkc().collect::<String>().to_lowercase();
        let mut tokens = Vec::new();
        for mat in WORD.find_iter(&folded) {
            let word = mat.as_str();
            if self.stopwords.contains(word) {
                continue;
            }
            tokens.push(self.stemmer.stem(word).to_string());
        }
        tokens
    }
}
