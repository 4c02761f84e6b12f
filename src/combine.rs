//! Similarity metrics computed from sufficient statistics.
//!
//! All four metrics are evaluated from the running sums accumulated in
//! [`PairAggregate`], never from materialized rating vectors.
//!
//! # Mathematical Background
//!
//! ## Pearson correlation
//!
//! From the five sufficient statistics over n co-rating users:
//!
//! ```text
//! ρ = (n·Σab − Σa·Σb) / (sqrt(n·Σa² − (Σa)²) · sqrt(n·Σb² − (Σb)²))
//! ```
//!
//! When every co-rating for one item is identical, that item's variance
//! term is zero and the quotient is undefined; the non-finite value is
//! propagated to the output, not coerced to zero.
//!
//! ## Regularized correlation
//!
//! Shrinkage toward a prior, weighted by sample size:
//!
//! ```text
//! w = n / (n + prior_count)
//! ρ_reg = w·ρ + (1 − w)·prior_correlation
//! ```
//!
//! As n grows this converges to the raw correlation; small samples are
//! pulled toward the prior.
//!
//! ## Cosine similarity
//!
//! `Σab / (sqrt(Σa²)·sqrt(Σb²))`
//!
//! ## Jaccard similarity
//!
//! `n / (raters_a + raters_b − n)`, using the items' total rater counts,
//! which approximates the Jaccard index of the two rater sets under the
//! one-rating-per-user-item assumption.

use std::collections::HashMap;

use crate::ratings::{ItemId, ItemPair, PairAggregate, SimilarityResult};

/// Pearson correlation from a pair's sufficient statistics.
///
/// Returns a non-finite value when either item's co-ratings have zero
/// variance.
///
/// # Examples
///
/// ```
/// use semejanza::combine::pearson_from_stats;
/// use semejanza::ratings::PairAggregate;
///
/// let mut agg = PairAggregate::new();
/// agg.observe(5.0, 4.0);
/// agg.observe(3.0, 2.0);
/// agg.observe(4.0, 5.0);
///
/// let corr = pearson_from_stats(&agg);
/// assert!((corr - 0.6546536707).abs() < 1e-9);
/// ```
#[must_use]
pub fn pearson_from_stats(agg: &PairAggregate) -> f64 {
    let n = agg.size as f64;
    let numerator = n * agg.dot_product - agg.sum_a * agg.sum_b;
    let denom_a = (n * agg.sum_sq_a - agg.sum_a * agg.sum_a).sqrt();
    let denom_b = (n * agg.sum_sq_b - agg.sum_b * agg.sum_b).sqrt();
    numerator / (denom_a * denom_b)
}

/// Shrink a raw correlation toward a prior, weighted by sample size.
///
/// With `prior_count = 0` this is the identity on `correlation`; as
/// `prior_count → ∞` the result tends to `prior_correlation`. A
/// non-finite `correlation` stays non-finite.
///
/// # Examples
///
/// ```
/// use semejanza::combine::regularize;
///
/// // 3 observations against 5 virtual ones: weight 3/8.
/// let shrunk = regularize(0.8, 3, 5.0, 0.0);
/// assert!((shrunk - 0.3).abs() < 1e-12);
///
/// assert_eq!(regularize(0.8, 3, 0.0, 0.0), 0.8);
/// ```
#[must_use]
pub fn regularize(
    correlation: f64,
    size: usize,
    prior_count: f64,
    prior_correlation: f64,
) -> f64 {
    let n = size as f64;
    let weight = n / (n + prior_count);
    weight * correlation + (1.0 - weight) * prior_correlation
}

/// Cosine similarity from a pair's sufficient statistics.
#[must_use]
pub fn cosine_from_stats(agg: &PairAggregate) -> f64 {
    agg.dot_product / (agg.sum_sq_a.sqrt() * agg.sum_sq_b.sqrt())
}

/// Approximate Jaccard index of two rater sets.
///
/// `size` is the co-rating count, `raters_a`/`raters_b` the items' total
/// rater counts, so the denominator is the inclusion-exclusion union
/// size. Requires `size <= raters_a + raters_b`; the pipeline upholds
/// this (the co-rating count never exceeds either rater count).
///
/// # Panics
///
/// In debug builds, panics if `size > raters_a + raters_b`.
///
/// # Examples
///
/// ```
/// use semejanza::combine::jaccard;
///
/// assert_eq!(jaccard(2, 4, 4), 1.0 / 3.0);
/// assert_eq!(jaccard(3, 3, 3), 1.0);
/// ```
#[must_use]
pub fn jaccard(size: usize, raters_a: usize, raters_b: usize) -> f64 {
    debug_assert!(
        size <= raters_a + raters_b,
        "co-rating count {size} exceeds union bound {raters_a} + {raters_b}"
    );
    size as f64 / (raters_a + raters_b - size) as f64
}

/// Join pair aggregates with rater counts and evaluate all four metrics.
///
/// A pair whose item is absent from `rater_counts` (filtered out by the
/// popularity window) is dropped silently; this is an inner join, with no
/// deduplication pass over the output and no guaranteed order.
#[must_use]
pub fn combine(
    pair_aggregates: &HashMap<ItemPair, PairAggregate>,
    rater_counts: &HashMap<ItemId, usize>,
    prior_count: f64,
    prior_correlation: f64,
) -> Vec<SimilarityResult> {
    let mut results = Vec::with_capacity(pair_aggregates.len());
    for (pair, agg) in pair_aggregates {
        let Some(&raters_a) = rater_counts.get(&pair.a()) else {
            continue;
        };
        let Some(&raters_b) = rater_counts.get(&pair.b()) else {
            continue;
        };

        let correlation = pearson_from_stats(agg);
        results.push(SimilarityResult {
            item_a: pair.a(),
            item_b: pair.b(),
            correlation,
            regularized_correlation: regularize(
                correlation,
                agg.size,
                prior_count,
                prior_correlation,
            ),
            cosine_similarity: cosine_from_stats(agg),
            jaccard_similarity: jaccard(agg.size, raters_a, raters_b),
            size: agg.size,
            raters_a,
            raters_b,
        });
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    fn known_aggregate() -> PairAggregate {
        let mut agg = PairAggregate::new();
        agg.observe(5.0, 4.0);
        agg.observe(3.0, 2.0);
        agg.observe(4.0, 5.0);
        agg
    }

    #[test]
    fn test_pearson_known_value() {
        let corr = pearson_from_stats(&known_aggregate());
        // 6 / (sqrt(6)·sqrt(14)) = 6 / sqrt(84)
        assert!((corr - 6.0 / 84.0_f64.sqrt()).abs() < 1e-12);
        assert!((corr - 0.6547).abs() < 1e-4);
    }

    #[test]
    fn test_pearson_zero_variance_is_non_finite() {
        let mut agg = PairAggregate::new();
        agg.observe(5.0, 1.0);
        agg.observe(5.0, 2.0);
        agg.observe(5.0, 3.0);
        assert!(!pearson_from_stats(&agg).is_finite());
    }

    #[test]
    fn test_regularize_known_value() {
        let corr = pearson_from_stats(&known_aggregate());
        let shrunk = regularize(corr, 3, 5.0, 0.0);
        assert!((shrunk - 0.2455).abs() < 1e-4);
    }

    #[test]
    fn test_regularize_zero_prior_count_is_identity() {
        assert_eq!(regularize(-0.42, 7, 0.0, 0.9), -0.42);
    }

    #[test]
    fn test_regularize_propagates_non_finite() {
        assert!(regularize(f64::NAN, 3, 5.0, 0.0).is_nan());
    }

    #[test]
    fn test_cosine_known_value() {
        let cos = cosine_from_stats(&known_aggregate());
        // 46 / sqrt(50·45) = 46 / sqrt(2250)
        assert!((cos - 46.0 / 2250.0_f64.sqrt()).abs() < 1e-12);
        assert!((cos - 0.9698).abs() < 1e-4);
    }

    #[test]
    fn test_jaccard_full_overlap() {
        assert_eq!(jaccard(3, 3, 3), 1.0);
    }

    #[test]
    #[should_panic(expected = "exceeds union bound")]
    #[cfg(debug_assertions)]
    fn test_jaccard_rejects_impossible_intersection() {
        let _ = jaccard(10, 3, 3);
    }

    #[test]
    fn test_combine_drops_missing_join_keys() {
        let mut pairs = HashMap::new();
        pairs.insert(
            crate::ratings::ItemPair::new(1, 2).expect("distinct"),
            known_aggregate(),
        );

        // Item 2 was filtered out of the rater counts.
        let mut rater_counts = HashMap::new();
        rater_counts.insert(1, 3);

        let results = combine(&pairs, &rater_counts, 5.0, 0.0);
        assert!(results.is_empty());
    }

    #[test]
    fn test_combine_emits_all_fields() {
        let mut pairs = HashMap::new();
        pairs.insert(
            crate::ratings::ItemPair::new(1, 2).expect("distinct"),
            known_aggregate(),
        );
        let mut rater_counts = HashMap::new();
        rater_counts.insert(1, 3);
        rater_counts.insert(2, 3);

        let results = combine(&pairs, &rater_counts, 5.0, 0.0);
        assert_eq!(results.len(), 1);
        let r = &results[0];
        assert_eq!((r.item_a, r.item_b), (1, 2));
        assert_eq!((r.size, r.raters_a, r.raters_b), (3, 3, 3));
        assert!((r.correlation - 0.6547).abs() < 1e-4);
        assert!((r.regularized_correlation - 0.2455).abs() < 1e-4);
        assert!((r.cosine_similarity - 0.9698).abs() < 1e-4);
        assert_eq!(r.jaccard_similarity, 1.0);
    }
}
