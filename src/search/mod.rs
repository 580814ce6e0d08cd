//! Hybrid ranking pipeline combining lexical and semantic retrieval.
//!
//! This module implements the retrieval half of the pipeline:
//!
//! - **Lexical ranking** (BM25 over the batch's abstracts)
//! - **Semantic ranking** (embedding cosine similarity via an injected provider)
//! - **Reciprocal Rank Fusion** (RRF) to merge the two rankings
//!
//! # Architecture
//!
//! - `dedup`: batch deduplication and rankable/unrankable partitioning
//! - `lexical`: ephemeral BM25 inverted index, full-corpus ranking
//! - `semantic`: query/abstract embedding with bounded concurrency, cosine ranking
//! - `fusion`: Reciprocal Rank Fusion over positional rankings
//! - `engine`: [`PaperReranker`](engine::PaperReranker) orchestrating the whole pipeline
//!
//! Both retrievers rank the *entire* rankable set (top-K = corpus size):
//! the full rankings feed fusion, not a final top-K. All indexes built here
//! are scoped to one pipeline run and discarded after fusion.
//!
//! # Algorithm Details
//!
//! **Lexical (BM25)**: term frequency with "+1" IDF over this batch only,
//! k1=1.2, b=0.75 (standard). No corpus statistics beyond the batch.
//!
//! **Semantic**: cosine similarity between the query embedding and each
//! abstract embedding. Per-document embedding failures exclude only that
//! document; a failed query embedding degrades the run to lexical-only.
//!
//! **RRF**: `fused(d) = Σ_r 1 / (k + rank_r(d))` with k=60. Rankings need
//! no score normalization, so scale differences between BM25 and cosine
//! similarity never matter.

pub mod dedup;
pub mod engine;
pub mod fusion;
pub mod lexical;
pub mod semantic;

pub use engine::{PaperReranker, RerankConfig};
pub use fusion::{reciprocal_rank_fusion, RRF_K};
