//! Per-item rater counting with a popularity window.
//!
//! Counts how many users rated each item and keeps only items whose count
//! falls inside an inclusive `[min_raters, max_raters]` window. Items
//! outside the window are absent from the returned map and thereby
//! excluded from every downstream pair.

use std::collections::HashMap;

use crate::ratings::{ItemId, RatingRecord};

/// Count raters per item and apply the `[min_raters, max_raters]` window.
///
/// Absence of an item in the result means it was filtered out. Empty input
/// yields an empty map; there are no error conditions.
///
/// # Examples
///
/// ```
/// use semejanza::raters::count_raters;
/// use semejanza::ratings::RatingRecord;
///
/// let ratings = vec![
///     RatingRecord::new(1, 10, 5.0),
///     RatingRecord::new(2, 10, 3.0),
///     RatingRecord::new(1, 20, 4.0),
/// ];
///
/// let counts = count_raters(&ratings, 2, usize::MAX);
/// assert_eq!(counts.get(&10), Some(&2));
/// assert_eq!(counts.get(&20), None); // only one rater
/// ```
#[must_use]
pub fn count_raters(
    records: &[RatingRecord],
    min_raters: usize,
    max_raters: usize,
) -> HashMap<ItemId, usize> {
    let mut counts: HashMap<ItemId, usize> = HashMap::new();
    for record in records {
        *counts.entry(record.item).or_insert(0) += 1;
    }
    counts.retain(|_, &mut count| count >= min_raters && count <= max_raters);
    counts
}
