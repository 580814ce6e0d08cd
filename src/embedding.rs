//! Embedding provider trait.
//!
//! The pipeline never loads or runs an embedding model itself; it is handed
//! a provider capability at construction time. This keeps model loading,
//! retry policy, and transport concerns outside the core and lets tests
//! inject deterministic fakes.

use crate::error::EmbeddingError;
use async_trait::async_trait;

/// A source of fixed-dimension text embeddings.
///
/// # Contract
///
/// - Must be deterministic for identical text within a single run.
/// - Must be safe for concurrent use: one provider handle is shared by all
///   in-flight embedding calls of a run (hence `Send + Sync`).
/// - Is assumed pre-loaded and warm; model loading is out of scope.
///
/// # Failure semantics
///
/// Returning `Err` for a document's text excludes that document from the
/// semantic ranking only. Returning `Err` for the query text downgrades the
/// whole run to lexical-only ranking. The pipeline never retries; retry and
/// backoff belong to the implementation behind this trait.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embeds one text into a fixed-dimension vector.
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;
}
