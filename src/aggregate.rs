//! Per-category engagement summaries.

use indexmap::IndexMap;
use serde::Serialize;

use crate::models::{CategoryAccumulator, CategoryId};

/// Reduced statistics for one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySummary {
    pub post_count: usize,
    pub total_likes: u64,
    pub avg_likes: f64,
    pub total_hashtags: u64,
    pub avg_hashtags: f64,
}

impl CategorySummary {
    pub fn from_accumulator(acc: &CategoryAccumulator) -> Self {
        Self {
            post_count: acc.len(),
            total_likes: saturating_total(&acc.likes),
            avg_likes: mean(&acc.likes),
            total_hashtags: saturating_total(&acc.hashtags),
            avg_hashtags: mean(&acc.hashtags),
        }
    }
}

/// Sum that pins at `u64::MAX` instead of overflowing.
fn saturating_total(values: &[u64]) -> u64 {
    values.iter().fold(0u64, |sum, &v| sum.saturating_add(v))
}

// Averaged in f64 so a saturated total does not skew the mean.
fn mean(values: &[u64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().map(|&v| v as f64).sum::<f64>() / values.len() as f64
    }
}

/// Summarize every non-empty accumulator, preserving order.
pub fn aggregate(
    accumulators: &IndexMap<CategoryId, CategoryAccumulator>,
) -> IndexMap<CategoryId, CategorySummary> {
    accumulators
        .iter()
        .filter(|(_, acc)| !acc.is_empty())
        .map(|(id, acc)| (*id, CategorySummary::from_accumulator(acc)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn acc(rows: &[(u64, u64, u64)]) -> CategoryAccumulator {
        let mut a = CategoryAccumulator::default();
        for &(post, likes, tags) in rows {
            a.push(post, likes, tags);
        }
        a
    }

    #[test]
    fn totals_and_averages() {
        let s = CategorySummary::from_accumulator(&acc(&[(1, 100, 5), (2, 50, 3)]));
        assert_eq!(s.post_count, 2);
        assert_eq!(s.total_likes, 150);
        assert_eq!(s.avg_likes, 75.0);
        assert_eq!(s.total_hashtags, 8);
        assert_eq!(s.avg_hashtags, 4.0);
    }

    #[test]
    fn empty_accumulator_averages_to_zero() {
        let s = CategorySummary::from_accumulator(&CategoryAccumulator::default());
        assert_eq!(s.post_count, 0);
        assert_eq!(s.avg_likes, 0.0);
        assert_eq!(s.avg_hashtags, 0.0);
    }

    #[test]
    fn huge_counts_saturate_instead_of_overflowing() {
        let mut map = IndexMap::new();
        map.insert(1, acc(&[(1, u64::MAX, u64::MAX), (2, u64::MAX, 1)]));

        let summaries = aggregate(&map);
        let s = &summaries[&1];
        assert_eq!(s.post_count, 2);
        assert_eq!(s.total_likes, u64::MAX);
        assert_eq!(s.total_hashtags, u64::MAX);
        assert_eq!(s.avg_likes, u64::MAX as f64);
    }

    #[test]
    fn aggregate_keeps_order_and_drops_empty() {
        let mut map = IndexMap::new();
        map.insert(3, acc(&[(1, 10, 1)]));
        map.insert(1, CategoryAccumulator::default());
        map.insert(2, acc(&[(2, 20, 2), (3, 40, 0)]));

        let summaries = aggregate(&map);
        let ids: Vec<_> = summaries.keys().copied().collect();
        assert_eq!(ids, vec![3, 2]);
        assert_eq!(summaries[&2].avg_likes, 30.0);
    }
}
