//! End-to-end similarity pipeline.
//!
//! [`ItemSimilarity`] wires the three stages together: rater counting,
//! pair aggregation, and metric combination. The first two stages are
//! independent consumers of the input; the combiner joins against the
//! fully materialized rater-count map, so it only runs once both are
//! complete.

use std::collections::HashMap;

use crate::combine::combine;
use crate::error::{Result, SemejanzaError};
use crate::pairs::aggregate_pairs;
use crate::raters::count_raters;
use crate::ratings::{ItemId, RatingRecord, SimilarityResult};

/// Item-based collaborative-filtering similarity model.
///
/// For every pair of items rated in common by enough users, computes
/// Pearson correlation, shrinkage-regularized correlation, cosine
/// similarity, and Jaccard overlap from running sufficient statistics.
///
/// # Parameters
///
/// - `min_raters` / `max_raters`: inclusive popularity window on raters
///   per item (default `1..=usize::MAX`, no filtering)
/// - `min_intersection`: minimum co-rating count per pair (default 1)
/// - `prior_count` / `prior_correlation`: strength and target of the
///   shrinkage prior (default 10.0 virtual observations toward 0.0)
/// - `max_ratings_per_user`: cap on the quadratic pair expansion
///   (default none)
///
/// # Example
///
/// ```
/// use semejanza::pipeline::ItemSimilarity;
/// use semejanza::ratings::RatingRecord;
///
/// let ratings = vec![
///     RatingRecord::new(1, 10, 5.0),
///     RatingRecord::new(1, 20, 4.0),
///     RatingRecord::new(2, 10, 3.0),
///     RatingRecord::new(2, 20, 2.0),
///     RatingRecord::new(3, 10, 4.0),
///     RatingRecord::new(3, 20, 5.0),
/// ];
///
/// let mut model = ItemSimilarity::new()
///     .with_min_intersection(2)
///     .with_prior(5.0, 0.0);
/// model.fit(&ratings).unwrap();
///
/// let results = model.results();
/// assert_eq!(results.len(), 1);
/// assert!((results[0].correlation - 0.6547).abs() < 1e-4);
/// ```
#[derive(Debug, Clone)]
pub struct ItemSimilarity {
    min_raters: usize,
    max_raters: usize,
    min_intersection: usize,
    prior_count: f64,
    prior_correlation: f64,
    max_ratings_per_user: Option<usize>,
    rater_counts: HashMap<ItemId, usize>,
    results: Vec<SimilarityResult>,
}

impl ItemSimilarity {
    /// Create a model with default parameters (no filtering, prior of
    /// 10 virtual observations toward correlation 0).
    #[must_use]
    pub fn new() -> Self {
        Self {
            min_raters: 1,
            max_raters: usize::MAX,
            min_intersection: 1,
            prior_count: 10.0,
            prior_correlation: 0.0,
            max_ratings_per_user: None,
            rater_counts: HashMap::new(),
            results: Vec::new(),
        }
    }

    /// Set the minimum raters per item (inclusive).
    #[must_use]
    pub fn with_min_raters(mut self, min_raters: usize) -> Self {
        self.min_raters = min_raters;
        self
    }

    /// Set the maximum raters per item (inclusive).
    #[must_use]
    pub fn with_max_raters(mut self, max_raters: usize) -> Self {
        self.max_raters = max_raters;
        self
    }

    /// Set the minimum co-rating count required to retain an item pair.
    #[must_use]
    pub fn with_min_intersection(mut self, min_intersection: usize) -> Self {
        self.min_intersection = min_intersection;
        self
    }

    /// Set the shrinkage prior: `prior_count` virtual observations of
    /// `prior_correlation`.
    #[must_use]
    pub fn with_prior(mut self, prior_count: f64, prior_correlation: f64) -> Self {
        self.prior_count = prior_count;
        self.prior_correlation = prior_correlation;
        self
    }

    /// Cap the number of ratings considered per user; users above the cap
    /// are skipped entirely (see [`crate::pairs`] on the quadratic cost).
    #[must_use]
    pub fn with_max_ratings_per_user(mut self, cap: usize) -> Self {
        self.max_ratings_per_user = Some(cap);
        self
    }

    /// Run the pipeline over a batch of ratings.
    ///
    /// Replaces any previously fitted state. Empty input succeeds with
    /// empty results.
    ///
    /// # Errors
    ///
    /// Returns [`SemejanzaError::InvalidHyperparameter`] if the
    /// configuration is inconsistent (`min_intersection` of zero, a
    /// negative or non-finite prior, or an empty popularity window).
    pub fn fit(&mut self, records: &[RatingRecord]) -> Result<()> {
        self.validate()?;

        self.rater_counts = count_raters(records, self.min_raters, self.max_raters);
        let pairs = aggregate_pairs(records, self.min_intersection, self.max_ratings_per_user);
        self.results = combine(
            &pairs,
            &self.rater_counts,
            self.prior_count,
            self.prior_correlation,
        );
        Ok(())
    }

    /// Similarity records from the last `fit`, in no guaranteed order.
    #[must_use]
    pub fn results(&self) -> &[SimilarityResult] {
        &self.results
    }

    /// Consume the model, returning the similarity records.
    #[must_use]
    pub fn into_results(self) -> Vec<SimilarityResult> {
        self.results
    }

    /// Surviving rater counts from the last `fit`. Items outside the
    /// popularity window are absent.
    #[must_use]
    pub fn rater_counts(&self) -> &HashMap<ItemId, usize> {
        &self.rater_counts
    }

    fn validate(&self) -> Result<()> {
        if self.min_intersection < 1 {
            return Err(SemejanzaError::InvalidHyperparameter {
                param: "min_intersection".to_string(),
                value: self.min_intersection.to_string(),
                constraint: "must be >= 1".to_string(),
            });
        }
        if !self.prior_count.is_finite() || self.prior_count < 0.0 {
            return Err(SemejanzaError::InvalidHyperparameter {
                param: "prior_count".to_string(),
                value: self.prior_count.to_string(),
                constraint: "must be >= 0 and finite".to_string(),
            });
        }
        if !self.prior_correlation.is_finite() {
            return Err(SemejanzaError::InvalidHyperparameter {
                param: "prior_correlation".to_string(),
                value: self.prior_correlation.to_string(),
                constraint: "must be finite".to_string(),
            });
        }
        if self.min_raters > self.max_raters {
            return Err(SemejanzaError::InvalidHyperparameter {
                param: "min_raters".to_string(),
                value: self.min_raters.to_string(),
                constraint: format!("must be <= max_raters ({})", self.max_raters),
            });
        }
        Ok(())
    }
}

impl Default for ItemSimilarity {
    fn default() -> Self {
        Self::new()
    }
}
