//! Test fakes for the embedding provider.
//!
//! Shared by unit tests and the integration suite. Hidden from docs; not
//! part of the public API surface.

use crate::embedding::EmbeddingProvider;
use crate::error::EmbeddingError;
use crate::search::lexical::tokenize;
use async_trait::async_trait;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

/// Deterministic bag-of-words embedder.
///
/// Each token hashes into one bucket of a fixed-dimension vector; the
/// vector is L2-normalized. Texts sharing tokens get higher cosine
/// similarity, which is enough signal to exercise the semantic ranking
/// without a real model. `DefaultHasher::new()` uses fixed keys, so the
/// embedding is stable across runs.
pub struct HashedBagEmbedder {
    dim: usize,
}

impl HashedBagEmbedder {
    /// Creates an embedder producing `dim`-dimensional vectors.
    pub fn new(dim: usize) -> Self {
        Self { dim }
    }
}

#[async_trait]
impl EmbeddingProvider for HashedBagEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let mut vec = vec![0.0f32; self.dim];
        for token in tokenize(text) {
            let mut hasher = DefaultHasher::new();
            token.hash(&mut hasher);
            let bucket = (hasher.finish() % self.dim as u64) as usize;
            vec[bucket] += 1.0;
        }

        let norm = vec.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for x in &mut vec {
                *x /= norm;
            }
        }
        Ok(vec)
    }
}

/// Provider with fixed vectors per exact text.
///
/// Unknown text is an error, which makes accidental lookups visible in
/// tests instead of silently similar.
#[derive(Default)]
pub struct StaticEmbedder {
    vectors: HashMap<String, Vec<f32>>,
}

impl StaticEmbedder {
    /// Creates an empty provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a vector for an exact text (builder style).
    pub fn with(mut self, text: &str, vector: Vec<f32>) -> Self {
        self.vectors.insert(text.to_string(), vector);
        self
    }
}

#[async_trait]
impl EmbeddingProvider for StaticEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        self.vectors
            .get(text)
            .cloned()
            .ok_or_else(|| EmbeddingError::InferenceFailed(format!("no vector for {text:?}")))
    }
}

/// Always fails: simulates total provider unavailability.
pub struct FailingEmbedder;

#[async_trait]
impl EmbeddingProvider for FailingEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>, EmbeddingError> {
        Err(EmbeddingError::ProviderUnavailable(
            "provider down".to_string(),
        ))
    }
}

/// Fails only for texts containing a marker substring; otherwise behaves
/// like [`HashedBagEmbedder`]. Simulates isolated per-document failures.
pub struct FlakyEmbedder {
    inner: HashedBagEmbedder,
    fail_marker: String,
}

impl FlakyEmbedder {
    /// Creates a provider that errors on any text containing `marker`.
    pub fn failing_on(marker: &str) -> Self {
        Self {
            inner: HashedBagEmbedder::new(64),
            fail_marker: marker.to_string(),
        }
    }
}

#[async_trait]
impl EmbeddingProvider for FlakyEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        if text.contains(&self.fail_marker) {
            return Err(EmbeddingError::InferenceFailed(
                "simulated per-document failure".to_string(),
            ));
        }
        self.inner.embed(text).await
    }
}
