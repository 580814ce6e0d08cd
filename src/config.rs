//! Default configuration constants.
//!
//! This module contains the constants that define the default pipeline
//! configuration. All of them can be overridden per reranker instance via
//! [`RerankConfig`](crate::search::engine::RerankConfig); the constants keep
//! code and tests consistent about the defaults.

// =============================================================================
// BM25 Lexical Ranking
// =============================================================================

/// BM25 term-frequency saturation parameter (k1).
///
/// Standard Okapi BM25 value. Higher values let repeated query terms keep
/// contributing to the score for longer before saturating.
pub const BM25_K1: f32 = 1.2;

/// BM25 document-length normalization parameter (b).
///
/// Standard Okapi BM25 value. 1.0 fully normalizes by document length,
/// 0.0 disables length normalization.
pub const BM25_B: f32 = 0.75;

// =============================================================================
// Composite (TreeScorer) Weights
// =============================================================================

/// Weight of the citation-history term, `log10(citations + 1)`.
pub const HISTORICAL_WEIGHT: f64 = 0.4;

/// Weight of the citation-momentum term, `citations / (age + 1)`.
pub const MOMENTUM_WEIGHT: f64 = 0.4;

/// Weight of the fused lexical/semantic relevance term.
pub const RELEVANCE_WEIGHT: f64 = 0.2;

// =============================================================================
// Year Grouping
// =============================================================================

/// Default number of papers kept per year group in per-year-cap mode.
pub const DEFAULT_PER_YEAR_CAP: usize = 5;

/// Default number of papers kept overall in global-cap mode.
pub const DEFAULT_GLOBAL_CAP: usize = 30;

// =============================================================================
// Embedding Concurrency
// =============================================================================

/// Maximum number of in-flight embedding calls per pipeline run.
///
/// Embedding lookups are I/O-bound and independent per document, so they run
/// concurrently, but the limit keeps one batch from overwhelming the provider.
pub const MAX_IN_FLIGHT_EMBEDDINGS: usize = 8;
