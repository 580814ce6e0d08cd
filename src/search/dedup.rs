//! Batch deduplication and rankable/unrankable partitioning.
//!
//! The first two pipeline stages. Both are order-preserving and have no
//! error conditions: empty input yields empty output.

use crate::paper::Paper;
use std::collections::HashSet;
use tracing::debug;

/// Removes duplicate papers by id, first occurrence wins.
///
/// Idempotent: running the result through again yields the same sequence.
pub fn dedup_papers(papers: Vec<Paper>) -> Vec<Paper> {
    let input_len = papers.len();
    let mut seen: HashSet<String> = HashSet::with_capacity(input_len);
    let mut unique = Vec::with_capacity(input_len);

    for paper in papers {
        if seen.insert(paper.id.clone()) {
            unique.push(paper);
        }
    }

    if unique.len() < input_len {
        debug!(
            removed = input_len - unique.len(),
            kept = unique.len(),
            "Removed duplicate papers"
        );
    }
    unique
}

/// Splits a deduplicated batch into (rankable, unrankable) subsets.
///
/// A paper is rankable when it has a non-empty, non-whitespace abstract.
/// Relative order is preserved within each subset.
pub fn partition_by_abstract(papers: Vec<Paper>) -> (Vec<Paper>, Vec<Paper>) {
    papers
        .into_iter()
        .partition(|p| p.rankable_abstract().is_some())
}
