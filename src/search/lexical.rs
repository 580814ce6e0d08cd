//! BM25 lexical ranking over the batch's abstracts.
//!
//! Builds an ephemeral inverted term-frequency index over the rankable
//! papers of one pipeline run and scores them against the query with Okapi
//! BM25. Corpus statistics (document frequencies, average length) come from
//! this batch only; there is no external corpus.
//!
//! Unlike a search-engine top-K, [`LexicalIndex::rank`] always returns a
//! full ranking of every indexed document. The ranking feeds rank fusion,
//! so documents with score 0 still need a deterministic position.
//!
//! References:
//! - Robertson & Zaragoza (2009). "The Probabilistic Relevance Framework:
//!   BM25 and Beyond."

use crate::config::{BM25_B, BM25_K1};
use std::collections::HashMap;
use tracing::instrument;

/// BM25 parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bm25Params {
    /// Term-frequency saturation parameter
    pub k1: f32,
    /// Document-length normalization parameter
    pub b: f32,
}

impl Default for Bm25Params {
    fn default() -> Self {
        Self {
            k1: BM25_K1,
            b: BM25_B,
        }
    }
}

/// Lowercase alphanumeric tokenization shared by documents and queries.
///
/// Splits on any non-alphanumeric character and lowercases each token.
/// Deliberately simple: both sides of the match use the same function, so
/// no analyzer mismatch is possible.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Inverted term-frequency index over one batch of documents.
///
/// Documents are addressed by their position in the slice passed to
/// [`LexicalIndex::build`]; the caller owns the mapping from position to
/// paper. The index is scoped to a single pipeline run.
#[derive(Debug)]
pub struct LexicalIndex {
    /// term -> postings of (document position, term frequency)
    postings: HashMap<String, Vec<(usize, u32)>>,
    /// Token count per document
    doc_lens: Vec<u32>,
    /// Average document length in tokens (0.0 for an empty index)
    avg_doc_len: f32,
    params: Bm25Params,
}

impl LexicalIndex {
    /// Builds an index over the given document texts.
    #[instrument(skip_all, fields(doc_count = texts.len()))]
    pub fn build(texts: &[&str], params: Bm25Params) -> Self {
        let mut postings: HashMap<String, Vec<(usize, u32)>> = HashMap::new();
        let mut doc_lens = Vec::with_capacity(texts.len());

        for (doc, text) in texts.iter().enumerate() {
            let tokens = tokenize(text);
            doc_lens.push(tokens.len() as u32);

            let mut term_freqs: HashMap<String, u32> = HashMap::new();
            for token in tokens {
                *term_freqs.entry(token).or_insert(0) += 1;
            }
            for (term, tf) in term_freqs {
                postings.entry(term).or_default().push((doc, tf));
            }
        }

        let avg_doc_len = if doc_lens.is_empty() {
            0.0
        } else {
            doc_lens.iter().sum::<u32>() as f32 / doc_lens.len() as f32
        };

        Self {
            postings,
            doc_lens,
            avg_doc_len,
            params,
        }
    }

    /// Number of indexed documents.
    pub fn len(&self) -> usize {
        self.doc_lens.len()
    }

    /// Returns `true` if no documents are indexed.
    pub fn is_empty(&self) -> bool {
        self.doc_lens.is_empty()
    }

    /// IDF with the "+1" variant: always positive, stable for terms that
    /// appear in most of the batch.
    fn idf(&self, term: &str) -> f32 {
        let n = self.len() as f32;
        let df = self.postings.get(term).map_or(0.0, |p| p.len() as f32);
        (1.0 + (n - df + 0.5) / (df + 0.5)).ln()
    }

    /// Ranks every indexed document against the query.
    ///
    /// Returns `(document position, BM25 score)` for all documents, ordered
    /// by score descending with ties broken by original position. Documents
    /// matching no query term score 0.0 but are still included. An empty
    /// query (or an empty index) degrades to the original order / an empty
    /// ranking rather than an error.
    #[instrument(skip_all, fields(query_len = query.len(), doc_count = self.len()))]
    pub fn rank(&self, query: &str) -> Vec<(usize, f32)> {
        let mut scores = vec![0.0f32; self.len()];
        if self.is_empty() {
            return Vec::new();
        }

        // Query term repetition contributes once per occurrence, like the
        // classic Okapi formulation.
        for term in tokenize(query) {
            let Some(postings) = self.postings.get(&term) else {
                continue;
            };
            let idf = self.idf(&term);

            for &(doc, tf) in postings {
                let tf = tf as f32;
                let doc_len = self.doc_lens[doc] as f32;
                let norm = self.params.k1
                    * (1.0 - self.params.b + self.params.b * doc_len / self.avg_doc_len);
                scores[doc] += idf * (tf * (self.params.k1 + 1.0)) / (tf + norm);
            }
        }

        let mut order: Vec<usize> = (0..self.len()).collect();
        order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]).then(a.cmp(&b)));
        order.into_iter().map(|doc| (doc, scores[doc])).collect()
    }
}
