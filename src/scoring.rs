//! Composite "tree" scoring: citation history, citation momentum, relevance.
//!
//! Every paper - rankable or not - gets a final score combining:
//!
//! - **historical**: `log10(citations + 1)`, raw accumulated impact
//! - **momentum**: `citations / (current_year - year + 1)`, citations
//!   normalized by years since publication (the `+1` keeps the denominator
//!   non-zero for papers published in the current year)
//! - **relevance**: the fused lexical/semantic score from RRF
//!
//! The canonical combination is the weighted sum
//! `0.4 * historical + 0.4 * momentum + 0.2 * relevance`. A weighted
//! product was considered and rejected: it collapses the score to 0
//! whenever relevance is 0, which zeroes every paper without an abstract
//! even when its citation signals are strong.
//!
//! Papers with an unknown publication year score 0.0 regardless of citation
//! count or relevance - momentum cannot be computed without a year, and
//! this is an explicit policy rather than a crash.

use crate::config::{HISTORICAL_WEIGHT, MOMENTUM_WEIGHT, RELEVANCE_WEIGHT};

/// Weights for the composite score's three terms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    /// Weight of `log10(citations + 1)`
    pub historical: f64,
    /// Weight of `citations / (age + 1)`
    pub momentum: f64,
    /// Weight of the fused relevance
    pub relevance: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            historical: HISTORICAL_WEIGHT,
            momentum: MOMENTUM_WEIGHT,
            relevance: RELEVANCE_WEIGHT,
        }
    }
}

/// Computes the composite score for one paper.
///
/// Pure function of `(citations, year, current_year, relevance)` - no
/// hidden state. Returns 0.0 when `year` is absent. Years after
/// `current_year` (preprints dated ahead) clamp the age to 0 so the
/// momentum denominator stays at least 1.
pub fn composite_score(
    citations: u64,
    year: Option<i32>,
    current_year: i32,
    relevance: f32,
    weights: ScoreWeights,
) -> f64 {
    let Some(year) = year else {
        return 0.0;
    };

    let citations = citations as f64;
    let historical = (citations + 1.0).log10();

    let age = i64::from(current_year)
        .saturating_sub(i64::from(year))
        .max(0) as f64;
    let momentum = citations / (age + 1.0);

    weights.historical * historical
        + weights.momentum * momentum
        + weights.relevance * f64::from(relevance)
}
