//! Data model for the similarity pipeline.
//!
//! All records are plain immutable value types. The pipeline assumes at
//! most one rating per (user, item) pair and no particular arrival order;
//! malformed input is the ingestion layer's problem and never reaches
//! these types.

use serde::{Deserialize, Serialize};

/// Identifier for a user.
pub type UserId = u64;

/// Identifier for an item.
pub type ItemId = u64;

/// A single observed rating: one user's rating of one item.
///
/// # Examples
///
/// ```
/// use semejanza::ratings::RatingRecord;
///
/// let r = RatingRecord::new(1, 42, 4.5);
/// assert_eq!(r.item, 42);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingRecord {
    /// User who produced the rating
    pub user: UserId,
    /// Item being rated
    pub item: ItemId,
    /// Rating value
    pub rating: f64,
}

impl RatingRecord {
    /// Create a rating record.
    #[must_use]
    pub fn new(user: UserId, item: ItemId, rating: f64) -> Self {
        Self { user, item, rating }
    }
}

/// Canonical unordered pair of distinct items.
///
/// The pair is always stored with `a() < b()`, so `{x, y}` and `{y, x}`
/// map to the same key and self-pairs cannot be constructed. The invariant
/// is enforced by the only constructor rather than by a later
/// deduplication pass.
///
/// # Examples
///
/// ```
/// use semejanza::ratings::ItemPair;
///
/// let p = ItemPair::new(7, 3).unwrap();
/// assert_eq!((p.a(), p.b()), (3, 7));
/// assert_eq!(ItemPair::new(3, 7), ItemPair::new(7, 3));
/// assert!(ItemPair::new(5, 5).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemPair {
    a: ItemId,
    b: ItemId,
}

impl ItemPair {
    /// Canonicalize two item ids into an ordered pair.
    ///
    /// Returns `None` if `x == y` (self-pairs carry no similarity
    /// information).
    #[must_use]
    pub fn new(x: ItemId, y: ItemId) -> Option<Self> {
        match x.cmp(&y) {
            std::cmp::Ordering::Less => Some(Self { a: x, b: y }),
            std::cmp::Ordering::Greater => Some(Self { a: y, b: x }),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// The smaller item id.
    #[must_use]
    pub fn a(&self) -> ItemId {
        self.a
    }

    /// The larger item id.
    #[must_use]
    pub fn b(&self) -> ItemId {
        self.b
    }
}

/// Running sufficient statistics for one item pair.
///
/// Accumulates, over every user who rated both items, the co-rating count
/// and the five sums from which correlation and cosine similarity are
/// later computed without retaining the raw rating vectors:
///
/// ```text
/// size        number of co-rating users
/// dot_product Σ rating_a · rating_b
/// sum_a       Σ rating_a          sum_sq_a  Σ rating_a²
/// sum_b       Σ rating_b          sum_sq_b  Σ rating_b²
/// ```
///
/// All fields are commutative, associative sums, so partial aggregates
/// computed over disjoint subsets of users may be combined with [`merge`]
/// in any order and yield the same totals as a single pass.
///
/// [`merge`]: PairAggregate::merge
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PairAggregate {
    /// Number of users who rated both items
    pub size: usize,
    /// Sum of products of the two ratings
    pub dot_product: f64,
    /// Sum of ratings for the smaller-id item
    pub sum_a: f64,
    /// Sum of ratings for the larger-id item
    pub sum_b: f64,
    /// Sum of squared ratings for the smaller-id item
    pub sum_sq_a: f64,
    /// Sum of squared ratings for the larger-id item
    pub sum_sq_b: f64,
}

impl PairAggregate {
    /// Create an empty aggregate (all sums zero).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one co-rating observation into the aggregate.
    ///
    /// `rating_a` must be the rating of the pair's smaller-id item and
    /// `rating_b` the rating of the larger-id item.
    pub fn observe(&mut self, rating_a: f64, rating_b: f64) {
        self.size += 1;
        self.dot_product += rating_a * rating_b;
        self.sum_a += rating_a;
        self.sum_b += rating_b;
        self.sum_sq_a += rating_a * rating_a;
        self.sum_sq_b += rating_b * rating_b;
    }

    /// Combine a partial aggregate into this one by field-wise addition.
    ///
    /// # Examples
    ///
    /// ```
    /// use semejanza::ratings::PairAggregate;
    ///
    /// let mut one_pass = PairAggregate::new();
    /// one_pass.observe(5.0, 4.0);
    /// one_pass.observe(3.0, 2.0);
    ///
    /// let mut left = PairAggregate::new();
    /// left.observe(5.0, 4.0);
    /// let mut right = PairAggregate::new();
    /// right.observe(3.0, 2.0);
    /// left.merge(&right);
    ///
    /// assert_eq!(left, one_pass);
    /// ```
    pub fn merge(&mut self, other: &PairAggregate) {
        self.size += other.size;
        self.dot_product += other.dot_product;
        self.sum_a += other.sum_a;
        self.sum_b += other.sum_b;
        self.sum_sq_a += other.sum_sq_a;
        self.sum_sq_b += other.sum_sq_b;
    }
}

/// Final similarity record for one item pair.
///
/// `correlation` and `regularized_correlation` may be non-finite when the
/// co-rated ratings of either item have zero variance; consumers decide
/// whether to filter or clamp such values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimilarityResult {
    /// Smaller item id of the pair
    pub item_a: ItemId,
    /// Larger item id of the pair
    pub item_b: ItemId,
    /// Pearson correlation of co-ratings
    pub correlation: f64,
    /// Correlation shrunk toward the configured prior
    pub regularized_correlation: f64,
    /// Cosine similarity of co-ratings
    pub cosine_similarity: f64,
    /// Approximate Jaccard index of the two rater sets
    pub jaccard_similarity: f64,
    /// Number of users who rated both items
    pub size: usize,
    /// Total raters of `item_a` (after the popularity window filter)
    pub raters_a: usize,
    /// Total raters of `item_b` (after the popularity window filter)
    pub raters_b: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_pair_canonical_order() {
        let p = ItemPair::new(9, 2).expect("distinct items");
        assert!(p.a() < p.b());
        assert_eq!(p, ItemPair::new(2, 9).expect("distinct items"));
    }

    #[test]
    fn test_item_pair_rejects_self_pair() {
        assert!(ItemPair::new(4, 4).is_none());
    }

    #[test]
    fn test_observe_accumulates_all_five_sums() {
        let mut agg = PairAggregate::new();
        agg.observe(5.0, 4.0);
        agg.observe(3.0, 2.0);
        agg.observe(4.0, 5.0);

        assert_eq!(agg.size, 3);
        assert!((agg.dot_product - 46.0).abs() < 1e-12);
        assert!((agg.sum_a - 12.0).abs() < 1e-12);
        assert!((agg.sum_b - 11.0).abs() < 1e-12);
        assert!((agg.sum_sq_a - 50.0).abs() < 1e-12);
        assert!((agg.sum_sq_b - 45.0).abs() < 1e-12);
    }

    #[test]
    fn test_merge_matches_one_pass() {
        let obs = [(5.0, 4.0), (3.0, 2.0), (4.0, 5.0), (1.0, 1.5)];

        let mut whole = PairAggregate::new();
        for &(a, b) in &obs {
            whole.observe(a, b);
        }

        let mut left = PairAggregate::new();
        let mut right = PairAggregate::new();
        for &(a, b) in &obs[..2] {
            left.observe(a, b);
        }
        for &(a, b) in &obs[2..] {
            right.observe(a, b);
        }
        left.merge(&right);

        assert_eq!(left, whole);
    }

    #[test]
    fn test_merge_with_empty_is_identity() {
        let mut agg = PairAggregate::new();
        agg.observe(2.0, 3.0);
        let before = agg;
        agg.merge(&PairAggregate::new());
        assert_eq!(agg, before);
    }
}
