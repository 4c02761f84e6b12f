//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use semejanza::prelude::*;
//! ```

pub use crate::error::{Result, SemejanzaError};
pub use crate::pipeline::ItemSimilarity;
pub use crate::ratings::{ItemId, ItemPair, PairAggregate, RatingRecord, SimilarityResult, UserId};
