//! # Citerank
//!
//! Rerank-and-score pipeline for academic-paper search results.
//!
//! Given a query and a batch of paper records from an upstream search API,
//! the pipeline:
//!
//! 1. Deduplicates the batch by paper id (first occurrence wins)
//! 2. Partitions papers into rankable (has abstract) and unrankable subsets
//! 3. Ranks rankable papers lexically (BM25) and semantically (embedding
//!    cosine similarity) against the query
//! 4. Fuses both rankings with Reciprocal Rank Fusion (RRF)
//! 5. Computes a composite "tree" score per paper from citation history,
//!    citation momentum, and fused relevance
//! 6. Groups the scored papers by publication year with a configurable
//!    truncation policy
//!
//! Every pipeline run operates over one bounded in-memory batch; no index
//! or paper is shared across runs. The only injected capability is the
//! [`embedding::EmbeddingProvider`], which must be safe for concurrent use.
//!
//! ## Modules
//!
//! - [`search`] - Dedup, BM25 lexical ranking, semantic ranking, RRF fusion,
//!   and the [`PaperReranker`] orchestrator
//! - [`scoring`] - Composite TreeScorer (citation history + momentum + relevance)
//! - [`grouping`] - Year grouping and truncation policies
//! - [`paper`] - Paper record and result types (upstream JSON contract)
//! - [`embedding`] - Embedding provider trait
//! - [`config`] - Default configuration constants
//! - [`error`] - Error types

pub mod config;
pub mod embedding;
pub mod error;
pub mod grouping;
pub mod paper;
pub mod scoring;
pub mod search;

#[doc(hidden)]
pub mod test_utils;

pub use grouping::GroupingPolicy;
pub use paper::{Paper, ScoredPaper, YearGroup, YearGroupedResults};
pub use search::engine::{PaperReranker, RerankConfig};
