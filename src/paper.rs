//! Paper record and result types.
//!
//! [`Paper`] mirrors the upstream search API's record contract (camelCase
//! JSON field names, every field except `paperId` optional). Fields the
//! pipeline does not know about are preserved in a flattened pass-through
//! map so output records carry everything the upstream sent.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A paper record flowing through the pipeline.
///
/// Only `id` is required. Absent `year` propagates as "unknown" and is
/// handled explicitly at scoring and grouping; absent `citation_count` is
/// treated as 0; absent (or whitespace-only) `abstract` makes the paper
/// unrankable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paper {
    /// Opaque unique identifier, unique within a run after deduplication
    #[serde(rename = "paperId")]
    pub id: String,
    /// Display title, opaque to the pipeline
    #[serde(default)]
    pub title: String,
    /// Publication year, if known
    #[serde(default)]
    pub year: Option<i32>,
    /// Citation count; `None` is treated as 0
    #[serde(rename = "citationCount", default)]
    pub citation_count: Option<u64>,
    /// Abstract text; presence determines rankability
    #[serde(rename = "abstract", default)]
    pub abstract_text: Option<String>,
    /// Upstream fields the pipeline passes through unmodified
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Paper {
    /// Creates a paper with just an id; remaining fields default to absent.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            year: None,
            citation_count: None,
            abstract_text: None,
            extra: Map::new(),
        }
    }

    /// Citation count with the documented default of 0 when absent.
    pub fn citations(&self) -> u64 {
        self.citation_count.unwrap_or(0)
    }

    /// Abstract text usable for ranking, if any.
    ///
    /// Returns `None` for absent, empty, or whitespace-only abstracts;
    /// otherwise the trimmed text.
    pub fn rankable_abstract(&self) -> Option<&str> {
        self.abstract_text
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }
}

/// A paper after fusion and composite scoring.
///
/// `relevance` and `score` are always populated (possibly 0.0): unrankable
/// papers get `relevance = 0.0`, papers with unknown year get `score = 0.0`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredPaper {
    /// The original record, fields passed through unmodified
    #[serde(flatten)]
    pub paper: Paper,
    /// Fused lexical/semantic relevance from RRF (0.0 for unrankable papers)
    pub relevance: f32,
    /// Composite tree score; the pipeline's final ranking key
    pub score: f64,
}

/// One publication-year bucket of scored papers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearGroup {
    /// Publication year, or `None` for the distinguished unknown bucket
    pub year: Option<i32>,
    /// Papers in this year, sorted by score descending
    pub papers: Vec<ScoredPaper>,
}

/// Final pipeline output: year groups sorted by year descending, the
/// unknown-year bucket (if any) last.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct YearGroupedResults {
    /// Year buckets in output order
    pub groups: Vec<YearGroup>,
}

impl YearGroupedResults {
    /// Total number of papers across all groups.
    pub fn len(&self) -> usize {
        self.groups.iter().map(|g| g.papers.len()).sum()
    }

    /// Returns `true` if no papers survived grouping.
    pub fn is_empty(&self) -> bool {
        self.groups.iter().all(|g| g.papers.is_empty())
    }

    /// Iterates all papers in output order (year desc, score desc).
    pub fn iter_papers(&self) -> impl Iterator<Item = &ScoredPaper> {
        self.groups.iter().flat_map(|g| g.papers.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_upstream_record() {
        let json = r#"{
            "paperId": "abc123",
            "title": "Graph Neural Networks",
            "year": 2020,
            "citationCount": 42,
            "abstract": "We study graph neural networks.",
            "venue": "NeurIPS"
        }"#;

        let paper: Paper = serde_json::from_str(json).unwrap();
        assert_eq!(paper.id, "abc123");
        assert_eq!(paper.year, Some(2020));
        assert_eq!(paper.citations(), 42);
        assert_eq!(
            paper.rankable_abstract(),
            Some("We study graph neural networks.")
        );
        // Unknown fields pass through
        assert_eq!(paper.extra.get("venue"), Some(&Value::from("NeurIPS")));
    }

    #[test]
    fn test_deserialize_minimal_record() {
        let paper: Paper = serde_json::from_str(r#"{"paperId": "x"}"#).unwrap();
        assert_eq!(paper.id, "x");
        assert_eq!(paper.year, None);
        assert_eq!(paper.citations(), 0);
        assert_eq!(paper.rankable_abstract(), None);
    }

    #[test]
    fn test_null_citation_count_defaults_to_zero() {
        let paper: Paper =
            serde_json::from_str(r#"{"paperId": "x", "citationCount": null}"#).unwrap();
        assert_eq!(paper.citations(), 0);
    }

    #[test]
    fn test_whitespace_abstract_is_not_rankable() {
        let mut paper = Paper::new("x");
        paper.abstract_text = Some("   \n\t ".to_string());
        assert_eq!(paper.rankable_abstract(), None);

        paper.abstract_text = Some("  real text  ".to_string());
        assert_eq!(paper.rankable_abstract(), Some("real text"));
    }

    #[test]
    fn test_scored_paper_serializes_flat() {
        let scored = ScoredPaper {
            paper: Paper::new("p1"),
            relevance: 0.5,
            score: 1.25,
        };
        let value = serde_json::to_value(&scored).unwrap();
        assert_eq!(value["paperId"], "p1");
        assert_eq!(value["relevance"], 0.5);
        assert_eq!(value["score"], 1.25);
    }
}
