//! Co-rating pair discovery and sufficient-statistic accumulation.
//!
//! This is the self-join of the rating relation on user identity,
//! re-architected as an explicit group-by-user step, pairwise expansion,
//! and a keyed reduce: every unordered pair of distinct items a user rated
//! contributes one `(rating_a, rating_b)` observation to that pair's
//! running [`PairAggregate`].
//!
//! # Performance
//!
//! The expansion is quadratic in items-per-user: a user with k ratings
//! contributes k·(k−1)/2 pair observations, which dominates overall
//! throughput. `max_ratings_per_user` caps this; users above the cap are
//! skipped entirely, since including only a subset of their ratings would
//! bias the pair statistics.
//!
//! With the `parallel` feature, users are processed as a rayon
//! fold/reduce: partition-local maps are merged via
//! [`PairAggregate::merge`], which is sound because every accumulator
//! field is a commutative, associative sum.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::collections::HashMap;

use crate::ratings::{ItemId, ItemPair, PairAggregate, RatingRecord, UserId};

/// Aggregate co-rating statistics for every item pair.
///
/// Groups `records` by user, expands each user's ratings into canonical
/// item pairs, accumulates the five sufficient statistics per pair, and
/// finally drops pairs co-rated by fewer than `min_intersection` users.
///
/// # Arguments
///
/// * `records` - Rating observations, in any order
/// * `min_intersection` - Minimum co-rating count to retain a pair
/// * `max_ratings_per_user` - Skip users with more ratings than this cap
///
/// # Examples
///
/// ```
/// use semejanza::pairs::aggregate_pairs;
/// use semejanza::ratings::{ItemPair, RatingRecord};
///
/// let ratings = vec![
///     RatingRecord::new(1, 10, 5.0),
///     RatingRecord::new(1, 20, 4.0),
///     RatingRecord::new(2, 10, 3.0),
///     RatingRecord::new(2, 20, 2.0),
/// ];
///
/// let pairs = aggregate_pairs(&ratings, 2, None);
/// let agg = &pairs[&ItemPair::new(10, 20).unwrap()];
/// assert_eq!(agg.size, 2);
/// assert_eq!(agg.dot_product, 26.0);
/// ```
#[must_use]
pub fn aggregate_pairs(
    records: &[RatingRecord],
    min_intersection: usize,
    max_ratings_per_user: Option<usize>,
) -> HashMap<ItemPair, PairAggregate> {
    let user_groups = group_by_user(records, max_ratings_per_user);
    let mut pairs = expand_and_reduce(&user_groups);
    pairs.retain(|_, agg| agg.size >= min_intersection);
    pairs
}

/// Group ratings by user, applying the per-user cap.
fn group_by_user(
    records: &[RatingRecord],
    max_ratings_per_user: Option<usize>,
) -> Vec<Vec<(ItemId, f64)>> {
    let mut by_user: HashMap<UserId, Vec<(ItemId, f64)>> = HashMap::new();
    for record in records {
        by_user
            .entry(record.user)
            .or_default()
            .push((record.item, record.rating));
    }

    let cap = max_ratings_per_user.unwrap_or(usize::MAX);
    by_user
        .into_values()
        .filter(|items| items.len() <= cap)
        .collect()
}

/// Expand one user's ratings into pair observations.
fn expand_user(items: &[(ItemId, f64)], pairs: &mut HashMap<ItemPair, PairAggregate>) {
    for i in 0..items.len() {
        for j in (i + 1)..items.len() {
            let (item_x, rating_x) = items[i];
            let (item_y, rating_y) = items[j];
            // A repeated (user, item) observation would surface here as a
            // self-pair; ItemPair::new rejects it.
            let Some(pair) = ItemPair::new(item_x, item_y) else {
                continue;
            };
            let (rating_a, rating_b) = if item_x < item_y {
                (rating_x, rating_y)
            } else {
                (rating_y, rating_x)
            };
            pairs.entry(pair).or_default().observe(rating_a, rating_b);
        }
    }
}

/// Merge two partial pair maps by field-wise addition of the aggregates.
#[cfg(feature = "parallel")]
fn merge_pair_maps(
    a: HashMap<ItemPair, PairAggregate>,
    b: HashMap<ItemPair, PairAggregate>,
) -> HashMap<ItemPair, PairAggregate> {
    // Fold the smaller map into the larger to keep the reduce cheap.
    let (mut dst, src) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    for (pair, agg) in src {
        dst.entry(pair).or_default().merge(&agg);
    }
    dst
}

#[cfg(feature = "parallel")]
fn expand_and_reduce(user_groups: &[Vec<(ItemId, f64)>]) -> HashMap<ItemPair, PairAggregate> {
    user_groups
        .par_iter()
        .fold(HashMap::new, |mut local, items| {
            expand_user(items, &mut local);
            local
        })
        .reduce(HashMap::new, merge_pair_maps)
}

#[cfg(not(feature = "parallel"))]
fn expand_and_reduce(user_groups: &[Vec<(ItemId, f64)>]) -> HashMap<ItemPair, PairAggregate> {
    let mut pairs = HashMap::new();
    for items in user_groups {
        expand_user(items, &mut pairs);
    }
    pairs
}
