//! Pipeline orchestration: the [`PaperReranker`] service object.
//!
//! A reranker is constructed once (with its embedding provider and
//! configuration) and reused across requests; it holds no mutable state, so
//! concurrent runs never interact. Each call to
//! [`rerank_and_score`](PaperReranker::rerank_and_score) owns its batch and
//! builds ephemeral indexes that die with the run - there is no process-wide
//! searcher singleton.

use crate::config::MAX_IN_FLIGHT_EMBEDDINGS;
use crate::embedding::EmbeddingProvider;
use crate::error::PipelineError;
use crate::grouping::{group_by_year, GroupingPolicy};
use crate::paper::{Paper, ScoredPaper, YearGroupedResults};
use crate::scoring::{composite_score, ScoreWeights};
use crate::search::dedup::{dedup_papers, partition_by_abstract};
use crate::search::fusion::{reciprocal_rank_fusion, RRF_K};
use crate::search::lexical::{Bm25Params, LexicalIndex};
use crate::search::semantic::rank_by_similarity;
use chrono::Datelike;
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

/// Per-instance pipeline configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RerankConfig {
    /// RRF smoothing constant
    pub rrf_k: f32,
    /// BM25 parameters for the lexical retriever
    pub bm25: Bm25Params,
    /// Composite score weights
    pub weights: ScoreWeights,
    /// Year-grouping truncation policy
    pub grouping: GroupingPolicy,
    /// Bound on simultaneous in-flight embedding calls
    pub max_in_flight_embeddings: usize,
    /// Current year for the momentum term; `None` reads the system clock.
    /// Tests inject a fixed year here for reproducible scores.
    pub current_year: Option<i32>,
}

impl Default for RerankConfig {
    fn default() -> Self {
        Self {
            rrf_k: RRF_K,
            bm25: Bm25Params::default(),
            weights: ScoreWeights::default(),
            grouping: GroupingPolicy::default(),
            max_in_flight_embeddings: MAX_IN_FLIGHT_EMBEDDINGS,
            current_year: None,
        }
    }
}

/// Long-lived rerank-and-score service.
///
/// # Example
///
/// ```ignore
/// let reranker = PaperReranker::new(Arc::new(provider));
/// let grouped = reranker.rerank_and_score("graph neural networks", papers).await?;
/// for group in &grouped.groups {
///     println!("{:?}: {} papers", group.year, group.papers.len());
/// }
/// ```
pub struct PaperReranker {
    provider: Arc<dyn EmbeddingProvider>,
    config: RerankConfig,
}

impl PaperReranker {
    /// Creates a reranker with the default configuration.
    pub fn new(provider: Arc<dyn EmbeddingProvider>) -> Self {
        Self::with_config(provider, RerankConfig::default())
    }

    /// Creates a reranker with an explicit configuration.
    pub fn with_config(provider: Arc<dyn EmbeddingProvider>, config: RerankConfig) -> Self {
        Self { provider, config }
    }

    /// The active configuration.
    pub fn config(&self) -> &RerankConfig {
        &self.config
    }

    /// Runs the full pipeline over one batch.
    ///
    /// Stages: dedup, partition, lexical + semantic ranking (concurrent,
    /// joined before fusion), RRF fusion, composite scoring, year grouping.
    ///
    /// # Degradation
    ///
    /// - Empty `papers` returns an empty result.
    /// - An empty `query` degrades both retrievers to a stable order.
    /// - Embedding failures never abort the batch: per-document failures
    ///   exclude that document from the semantic ranking; a failed query
    ///   embedding drops the semantic ranking entirely (lexical-only run).
    ///
    /// Cancellation: dropping the returned future drops all in-flight
    /// embedding calls with it; partial results are never observable.
    #[instrument(skip_all, fields(query_len = query.len(), paper_count = papers.len()))]
    pub async fn rerank_and_score(
        &self,
        query: &str,
        papers: Vec<Paper>,
    ) -> Result<YearGroupedResults, PipelineError> {
        if papers.is_empty() {
            return Ok(YearGroupedResults::default());
        }

        let unique = dedup_papers(papers);
        let (rankable, unrankable) = partition_by_abstract(unique);
        debug!(
            rankable = rankable.len(),
            unrankable = unrankable.len(),
            "Partitioned batch"
        );

        // Partition guarantees every rankable paper has a usable abstract.
        let abstracts: Vec<&str> = rankable
            .iter()
            .map(|p| p.rankable_abstract().unwrap_or(""))
            .collect();

        // Lexical and semantic retrieval read the same immutable set and
        // write disjoint outputs; fusion is the join point.
        let lexical_fut = async { LexicalIndex::build(&abstracts, self.config.bm25).rank(query) };
        let semantic_fut = rank_by_similarity(
            self.provider.as_ref(),
            query,
            &abstracts,
            self.config.max_in_flight_embeddings,
        );
        let (lexical_ranking, semantic_ranking) = futures::join!(lexical_fut, semantic_fut);

        info!(
            lexical = lexical_ranking.len(),
            semantic = semantic_ranking.len(),
            "Retrieval complete"
        );

        let lexical_ids: Vec<usize> = lexical_ranking.iter().map(|(doc, _)| *doc).collect();
        let semantic_ids: Vec<usize> = semantic_ranking.iter().map(|(doc, _)| *doc).collect();
        let fused = reciprocal_rank_fusion(
            &[&lexical_ids, &semantic_ids],
            rankable.len(),
            self.config.rrf_k,
        );

        let current_year = self
            .config
            .current_year
            .unwrap_or_else(|| chrono::Utc::now().year());

        // Move papers out of the rankable set in fused order.
        let mut slots: Vec<Option<Paper>> = rankable.into_iter().map(Some).collect();
        let mut scored = Vec::with_capacity(slots.len() + unrankable.len());

        for (doc, relevance) in fused {
            let Some(paper) = slots.get_mut(doc).and_then(Option::take) else {
                debug_assert!(false, "fusion emitted a duplicate or unknown document");
                error!(doc, "Fusion emitted a duplicate or unknown document, skipping");
                continue;
            };
            let score = composite_score(
                paper.citations(),
                paper.year,
                current_year,
                relevance,
                self.config.weights,
            );
            scored.push(ScoredPaper {
                paper,
                relevance,
                score,
            });
        }

        // Unrankable papers are appended with relevance 0.0; citation
        // signals alone drive their score.
        for paper in unrankable {
            let score = composite_score(
                paper.citations(),
                paper.year,
                current_year,
                0.0,
                self.config.weights,
            );
            scored.push(ScoredPaper {
                paper,
                relevance: 0.0,
                score,
            });
        }

        Ok(group_by_year(scored, self.config.grouping))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::HashedBagEmbedder;

    fn reranker() -> PaperReranker {
        PaperReranker::with_config(
            Arc::new(HashedBagEmbedder::new(64)),
            RerankConfig {
                current_year: Some(2025),
                ..RerankConfig::default()
            },
        )
    }

    fn paper(id: &str, year: Option<i32>, citations: u64, abstract_text: Option<&str>) -> Paper {
        let mut p = Paper::new(id);
        p.year = year;
        p.citation_count = Some(citations);
        p.abstract_text = abstract_text.map(str::to_string);
        p
    }

    #[tokio::test]
    async fn test_empty_batch_returns_empty_result() {
        let result = reranker().rerank_and_score("query", Vec::new()).await.unwrap();
        assert!(result.is_empty());
        assert!(result.groups.is_empty());
    }

    #[tokio::test]
    async fn test_duplicates_collapse_before_ranking() {
        let papers = vec![
            paper("a", Some(2020), 10, Some("graph networks")),
            paper("a", Some(2020), 10, Some("graph networks")),
            paper("b", Some(2020), 5, Some("other topic")),
        ];

        let result = reranker().rerank_and_score("graph", papers).await.unwrap();

        assert_eq!(result.len(), 2);
    }

    #[tokio::test]
    async fn test_empty_query_is_not_an_error() {
        let papers = vec![
            paper("a", Some(2020), 10, Some("graph networks")),
            paper("b", Some(2021), 5, Some("other topic")),
        ];

        let result = reranker().rerank_and_score("", papers).await.unwrap();

        // Stable degenerate ranking, every paper still present and scored
        assert_eq!(result.len(), 2);
        assert!(result.iter_papers().all(|p| p.score > 0.0));
    }

    #[tokio::test]
    async fn test_relevance_always_populated() {
        let papers = vec![
            paper("ranked", Some(2020), 10, Some("graph networks")),
            paper("unranked", Some(2020), 10, None),
        ];

        let result = reranker().rerank_and_score("graph", papers).await.unwrap();

        for scored in result.iter_papers() {
            match scored.paper.id.as_str() {
                "ranked" => assert!(scored.relevance > 0.0),
                "unranked" => assert_eq!(scored.relevance, 0.0),
                other => panic!("unexpected paper {other}"),
            }
        }
    }
}
