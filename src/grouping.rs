//! Year grouping and truncation policies.
//!
//! The final pipeline stage: buckets scored papers by publication year,
//! sorts each bucket by score descending (stable on ties), and applies the
//! configured size policy. Papers with an unknown year land in a
//! distinguished unknown bucket ordered after all known years - dropping
//! them silently would lose records the caller sent us.

use crate::config::{DEFAULT_GLOBAL_CAP, DEFAULT_PER_YEAR_CAP};
use crate::paper::{ScoredPaper, YearGroup, YearGroupedResults};
use std::collections::HashMap;
use tracing::debug;

/// Truncation policy applied at grouping time.
///
/// Both modes appear in practice; the policy is explicit configuration
/// rather than a hard-coded choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupingPolicy {
    /// Keep the top `per_year` papers within each year group; all years kept.
    PerYearCap {
        /// Maximum papers per year group
        per_year: usize,
    },
    /// Keep the global top `total` papers by score, then bucket the
    /// survivors by year.
    GlobalCapThenGroup {
        /// Maximum papers overall
        total: usize,
    },
}

impl Default for GroupingPolicy {
    fn default() -> Self {
        Self::PerYearCap {
            per_year: DEFAULT_PER_YEAR_CAP,
        }
    }
}

impl GroupingPolicy {
    /// Global-cap policy with the default overall total.
    pub fn global_default() -> Self {
        Self::GlobalCapThenGroup {
            total: DEFAULT_GLOBAL_CAP,
        }
    }
}

/// Groups scored papers by publication year under the given policy.
///
/// Output groups are ordered year descending with the unknown bucket last;
/// papers within a group are ordered score descending, ties keeping their
/// input order.
pub fn group_by_year(mut papers: Vec<ScoredPaper>, policy: GroupingPolicy) -> YearGroupedResults {
    if let GroupingPolicy::GlobalCapThenGroup { total } = policy {
        // Global cap applies before bucketing: stable sort keeps input
        // order on score ties, then the survivors are grouped.
        papers.sort_by(|a, b| b.score.total_cmp(&a.score));
        papers.truncate(total);
    }

    let mut buckets: HashMap<Option<i32>, Vec<ScoredPaper>> = HashMap::new();
    for paper in papers {
        buckets.entry(paper.paper.year).or_default().push(paper);
    }

    let mut groups: Vec<YearGroup> = buckets
        .into_iter()
        .map(|(year, mut papers)| {
            papers.sort_by(|a, b| b.score.total_cmp(&a.score));
            if let GroupingPolicy::PerYearCap { per_year } = policy {
                papers.truncate(per_year);
            }
            YearGroup { year, papers }
        })
        .collect();

    // Years descending, unknown bucket last
    groups.sort_by(|a, b| match (a.year, b.year) {
        (Some(ya), Some(yb)) => yb.cmp(&ya),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });

    debug!(groups = groups.len(), "Grouped papers by year");
    YearGroupedResults { groups }
}
