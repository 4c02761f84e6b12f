//! Semejanza: item-to-item similarity statistics for collaborative
//! filtering, in pure Rust.
//!
//! Given sparse (user, item, rating) observations, Semejanza computes,
//! for every pair of items rated in common by enough users, Pearson
//! correlation, a shrinkage-regularized correlation, cosine similarity,
//! and Jaccard overlap, together with supporting counts. All metrics are
//! derived from running sufficient statistics, so no rating vectors are
//! ever materialized and partial aggregates merge by field-wise addition.
//!
//! # Quick Start
//!
//! ```
//! use semejanza::prelude::*;
//!
//! // Three users rate items 10 and 20.
//! let ratings = vec![
//!     RatingRecord::new(1, 10, 5.0),
//!     RatingRecord::new(1, 20, 4.0),
//!     RatingRecord::new(2, 10, 3.0),
//!     RatingRecord::new(2, 20, 2.0),
//!     RatingRecord::new(3, 10, 4.0),
//!     RatingRecord::new(3, 20, 5.0),
//! ];
//!
//! let mut model = ItemSimilarity::new()
//!     .with_min_intersection(2)
//!     .with_prior(5.0, 0.0);
//! model.fit(&ratings).unwrap();
//!
//! let result = &model.results()[0];
//! assert_eq!((result.item_a, result.item_b), (10, 20));
//! assert_eq!(result.size, 3);
//! assert!((result.correlation - 0.6547).abs() < 1e-4);
//! assert_eq!(result.jaccard_similarity, 1.0);
//! ```
//!
//! # Modules
//!
//! - [`ratings`]: Data model (rating records, canonical item pairs,
//!   sufficient-statistic accumulators, result records)
//! - [`raters`]: Per-item rater counting with a popularity window
//! - [`pairs`]: Group-by-user self-join and pair aggregation
//! - [`combine`]: The four similarity formulas and the final join
//! - [`pipeline`]: [`ItemSimilarity`](pipeline::ItemSimilarity), the
//!   builder-style front-end
//! - [`error`]: Error types
//!
//! # Features
//!
//! - `parallel` (default): parallelize the pair expansion with rayon.
//!   The accumulators are commutative and associative, so partition-local
//!   partial aggregates merge in any order.

pub mod combine;
pub mod error;
pub mod pairs;
pub mod pipeline;
pub mod prelude;
pub mod raters;
pub mod ratings;
