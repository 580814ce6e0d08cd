//! Reciprocal Rank Fusion (RRF) over positional rankings.
//!
//! Merges rankings from multiple retrievers without score normalization:
//! only rank positions matter, so BM25 scores and cosine similarities never
//! need to live on the same scale.

/// Standard RRF k parameter from the original paper:
/// "Reciprocal Rank Fusion outperforms Condorcet and individual Rank
/// Learning Methods" by Cormack, Clarke, and Buettcher (SIGIR 2009).
///
/// Smaller k emphasizes top ranks; larger k weights ranks more uniformly.
/// 60 is the conventional balance.
pub const RRF_K: f32 = 60.0;

/// Fuses rankings with Reciprocal Rank Fusion.
///
/// Formula: `fused(d) = Σ_r 1 / (k + rank_r(d))` where `rank_r(d)` is the
/// 1-based position of document `d` in ranking `r`. A ranking that does not
/// contain `d` contributes 0 - never an error, since retrievers may exclude
/// documents (e.g. failed embeddings).
///
/// Documents are positions in `0..doc_count`, matching the rankable set's
/// original order. Every position appears in the output, including those
/// absent from all rankings (fused score 0.0).
///
/// # Returns
///
/// `(document position, fused score)` ordered by fused score descending,
/// ties broken by original position. Output is bit-for-bit reproducible for
/// identical inputs.
pub fn reciprocal_rank_fusion(rankings: &[&[usize]], doc_count: usize, k: f32) -> Vec<(usize, f32)> {
    let mut fused = vec![0.0f32; doc_count];

    for ranking in rankings {
        for (rank, &doc) in ranking.iter().enumerate() {
            debug_assert!(doc < doc_count, "ranking refers to unknown document");
            if let Some(score) = fused.get_mut(doc) {
                // rank is 1-based in the RRF formula
                *score += 1.0 / (k + (rank + 1) as f32);
            }
        }
    }

    let mut order: Vec<usize> = (0..doc_count).collect();
    order.sort_by(|&a, &b| fused[b].total_cmp(&fused[a]).then(a.cmp(&b)));
    order.into_iter().map(|doc| (doc, fused[doc])).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score_of(fused: &[(usize, f32)], doc: usize) -> f32 {
        fused.iter().find(|(d, _)| *d == doc).unwrap().1
    }

    #[test]
    fn test_fused_score_decreases_with_rank() {
        // Both retrievers agree on the order; fused score must strictly
        // decrease as rank increases.
        let ranking: Vec<usize> = (0..5).collect();
        let fused = reciprocal_rank_fusion(&[&ranking, &ranking], 5, RRF_K);

        for pair in fused.windows(2) {
            assert!(pair[0].1 > pair[1].1, "score must strictly decrease");
        }
        // Order follows the agreed ranking
        let order: Vec<usize> = fused.iter().map(|(d, _)| *d).collect();
        assert_eq!(order, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_document_in_both_beats_document_in_one() {
        // doc 1 leads the lexical ranking but is absent from the semantic
        // one; doc 0 appears in both and wins despite the worse lexical rank
        let lexical = vec![1, 0];
        let semantic = vec![0];
        let fused = reciprocal_rank_fusion(&[&lexical, &semantic], 2, RRF_K);

        // doc 0: 1/(k+2) + 1/(k+1); doc 1: 1/(k+1)
        assert!(score_of(&fused, 0) > score_of(&fused, 1));
    }

    #[test]
    fn test_single_retriever_equal_rank_comparison() {
        // Two documents at the same rank position, one ranked by both
        // retrievers, the other by a single retriever.
        let a = vec![0];
        let b = vec![0];
        let fused_both = reciprocal_rank_fusion(&[&a, &b], 1, RRF_K);

        let only = vec![0];
        let fused_one = reciprocal_rank_fusion(&[&only], 1, RRF_K);

        assert!(fused_both[0].1 > fused_one[0].1);
        assert!((fused_both[0].1 - 2.0 * fused_one[0].1).abs() < 1e-6);
    }

    #[test]
    fn test_missing_document_gets_zero_score() {
        // doc 2 appears in no ranking but must still be present
        let lexical = vec![0, 1];
        let semantic = vec![1, 0];
        let fused = reciprocal_rank_fusion(&[&lexical, &semantic], 3, RRF_K);

        assert_eq!(fused.len(), 3);
        assert_eq!(score_of(&fused, 2), 0.0);
        assert_eq!(fused[2].0, 2); // zero-score doc sorts last
    }

    #[test]
    fn test_symmetric_ranks_fuse_equal() {
        // doc 0: rank 1 then rank 2; doc 1: rank 2 then rank 1
        let first = vec![0, 1];
        let second = vec![1, 0];
        let fused = reciprocal_rank_fusion(&[&first, &second], 2, RRF_K);

        let diff = (score_of(&fused, 0) - score_of(&fused, 1)).abs();
        assert!(diff < 1e-6, "symmetric ranks must have equal fused scores");
        // Tie broken by original position
        assert_eq!(fused[0].0, 0);
    }

    #[test]
    fn test_empty_rankings() {
        let fused = reciprocal_rank_fusion(&[], 0, RRF_K);
        assert!(fused.is_empty());

        let fused = reciprocal_rank_fusion(&[&[][..], &[][..]], 2, RRF_K);
        assert_eq!(fused.len(), 2);
        assert!(fused.iter().all(|(_, s)| *s == 0.0));
    }

    #[test]
    fn test_fusion_is_deterministic() {
        let lexical = vec![2, 0, 1];
        let semantic = vec![1, 2];
        let a = reciprocal_rank_fusion(&[&lexical, &semantic], 3, RRF_K);
        let b = reciprocal_rank_fusion(&[&lexical, &semantic], 3, RRF_K);
        assert_eq!(a, b);
    }

    #[test]
    fn test_smaller_k_emphasizes_top_ranks() {
        let ranking = vec![0, 1];
        let small = reciprocal_rank_fusion(&[&ranking], 2, 1.0);
        let large = reciprocal_rank_fusion(&[&ranking], 2, 100.0);

        let gap_small = small[0].1 - small[1].1;
        let gap_large = large[0].1 - large[1].1;
        assert!(gap_small > gap_large);
    }
}
