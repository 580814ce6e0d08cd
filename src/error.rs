//! Error types for citerank.
//!
//! Input anomalies (missing year, citation count, or abstract) are never
//! errors; they are resolved by documented defaults in the pipeline stages.
//! The types here cover collaborator failures (the embedding provider) and
//! pipeline-level failures that are allowed to reach the caller.

use thiserror::Error;

/// Errors returned by an embedding provider.
///
/// A failure for a single document excludes only that document from the
/// semantic ranking; a failure for the query embedding downgrades the run
/// to lexical-only ranking. Neither aborts the batch.
#[derive(Debug, Clone, Error)]
pub enum EmbeddingError {
    /// Provider is unreachable or not ready
    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),
    /// Provider accepted the request but inference failed
    #[error("Inference failed: {0}")]
    InferenceFailed(String),
    /// Provider returned no vector for the text
    #[error("Empty embedding returned")]
    EmptyEmbedding,
}

/// Pipeline-level errors.
///
/// The pipeline degrades gracefully on data problems and collaborator
/// failures, so in practice it always produces a result. This type exists
/// for failures a collaborator models as hard (and for future invariants);
/// such failures surface whole, never as a partial result.
#[derive(Debug, Clone, Error)]
pub enum PipelineError {
    /// Hard embedding failure the collaborator chose to propagate
    #[error("Embedding error: {0}")]
    Embedding(#[from] EmbeddingError),
    /// Malformed input that cannot be resolved by defaults
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
