//! Semantic ranking via embedding cosine similarity.
//!
//! Obtains one embedding for the query and one per rankable abstract from
//! the injected [`EmbeddingProvider`], then ranks documents by cosine
//! similarity to the query. Embedding lookups are independent and
//! I/O-bound, so they run concurrently with a bounded in-flight limit.
//!
//! Failure isolation: a provider error for one document excludes that
//! document from the semantic ranking only (it contributes no rank to
//! fusion from this retriever); a provider error for the query degrades
//! the run to an empty semantic ranking, never an error.

use crate::embedding::EmbeddingProvider;
use futures::stream::{self, StreamExt};
use tracing::{debug, instrument, warn};

/// Cosine similarity between two vectors.
///
/// Returns 0.0 when either vector has zero magnitude. The result is clamped
/// to [-1, 1] to absorb floating-point drift.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(&x, &y)| x * y).sum();
    let mag_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let mag_b: f32 = b.iter().map(|y| y * y).sum::<f32>().sqrt();

    if mag_a == 0.0 || mag_b == 0.0 {
        return 0.0;
    }
    (dot / (mag_a * mag_b)).clamp(-1.0, 1.0)
}

/// Ranks documents by embedding similarity to the query.
///
/// `texts` are addressed by position, matching the lexical index; the
/// caller owns the position-to-paper mapping.
///
/// # Returns
///
/// `(document position, cosine similarity)` pairs ordered by similarity
/// descending, ties broken by original position. Documents whose embedding
/// failed are absent from the result. Returns an empty ranking if the query
/// embedding fails (total provider unavailability) - the batch still
/// completes on lexical ranking alone.
#[instrument(skip_all, fields(query_len = query.len(), doc_count = texts.len()))]
pub async fn rank_by_similarity(
    provider: &dyn EmbeddingProvider,
    query: &str,
    texts: &[&str],
    max_in_flight: usize,
) -> Vec<(usize, f32)> {
    if texts.is_empty() {
        return Vec::new();
    }

    let query_vec = match provider.embed(query).await {
        Ok(vec) if !vec.is_empty() => vec,
        Ok(_) => {
            warn!("Provider returned no vector for query, falling back to lexical-only ranking");
            return Vec::new();
        }
        Err(e) => {
            warn!(error = %e, "Query embedding failed, falling back to lexical-only ranking");
            return Vec::new();
        }
    };

    // Bounded fan-out: at most max_in_flight embedding calls at once.
    let embeddings: Vec<_> = stream::iter(texts.iter().enumerate())
        .map(|(doc, &text)| async move { (doc, provider.embed(text).await) })
        .buffered(max_in_flight.max(1))
        .collect()
        .await;

    let mut similarities = Vec::with_capacity(embeddings.len());
    for (doc, result) in embeddings {
        match result {
            Ok(vec) if !vec.is_empty() => {
                similarities.push((doc, cosine_similarity(&query_vec, &vec)));
            }
            Ok(_) => {
                warn!(doc, "Provider returned no vector, excluding from semantic ranking");
            }
            Err(e) => {
                warn!(doc, error = %e, "Embedding failed, excluding from semantic ranking");
            }
        }
    }

    debug!(
        ranked = similarities.len(),
        excluded = texts.len() - similarities.len(),
        "Semantic ranking complete"
    );

    similarities.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
    similarities
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EmbeddingError;
    use crate::test_utils::{FailingEmbedder, FlakyEmbedder, StaticEmbedder};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Tracks concurrent `embed` calls; the yield point lets other queued
    /// embeddings start before this one finishes.
    #[derive(Default)]
    struct InFlightTracker {
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
    }

    #[async_trait]
    impl EmbeddingProvider for InFlightTracker {
        async fn embed(&self, _text: &str) -> Result<Vec<f32>, EmbeddingError> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);
            tokio::task::yield_now().await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            Ok(vec![1.0, 0.0])
        }
    }

    #[test]
    fn test_cosine_identical_vectors() {
        let v = vec![0.5, 0.3, 0.2];
        let sim = cosine_similarity(&v, &v);
        assert!((sim - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_orthogonal_vectors() {
        let sim = cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]);
        assert_eq!(sim, 0.0);
    }

    #[test]
    fn test_cosine_zero_vector() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
    }

    #[tokio::test]
    async fn test_ranks_by_similarity_to_query() {
        let provider = StaticEmbedder::new()
            .with("query", vec![1.0, 0.0, 0.0])
            .with("close", vec![0.9, 0.1, 0.0])
            .with("far", vec![0.0, 1.0, 0.0]);

        let ranking = rank_by_similarity(&provider, "query", &["far", "close"], 4).await;

        assert_eq!(ranking.len(), 2);
        assert_eq!(ranking[0].0, 1); // "close"
        assert_eq!(ranking[1].0, 0); // "far"
        assert!(ranking[0].1 > ranking[1].1);
    }

    #[tokio::test]
    async fn test_per_document_failure_excludes_only_that_document() {
        let provider = FlakyEmbedder::failing_on("poison");

        let ranking =
            rank_by_similarity(&provider, "graph networks", &["graph theory", "poison text"], 4)
                .await;

        assert_eq!(ranking.len(), 1);
        assert_eq!(ranking[0].0, 0);
    }

    #[tokio::test]
    async fn test_provider_down_returns_empty_ranking() {
        let provider = FailingEmbedder;
        let ranking = rank_by_similarity(&provider, "query", &["a", "b"], 4).await;
        assert!(ranking.is_empty());
    }

    #[tokio::test]
    async fn test_empty_input_returns_empty_ranking() {
        let provider = FailingEmbedder;
        let ranking = rank_by_similarity(&provider, "query", &[], 4).await;
        assert!(ranking.is_empty());
    }

    #[tokio::test]
    async fn test_in_flight_embeddings_never_exceed_limit() {
        let provider = InFlightTracker::default();
        let texts = vec!["text"; 16];

        let ranking = rank_by_similarity(&provider, "query", &texts, 3).await;

        assert_eq!(ranking.len(), 16);
        let max = provider.max_in_flight.load(Ordering::SeqCst);
        assert!(max <= 3, "observed {max} concurrent embedding calls");
        // The fan-out actually overlapped calls rather than serializing them
        assert!(max > 1);
    }

    #[tokio::test]
    async fn test_ties_break_by_original_order() {
        let provider = StaticEmbedder::new()
            .with("query", vec![1.0, 0.0])
            .with("same", vec![1.0, 0.0]);

        let ranking = rank_by_similarity(&provider, "query", &["same", "same"], 4).await;

        assert_eq!(ranking[0].0, 0);
        assert_eq!(ranking[1].0, 1);
    }
}
