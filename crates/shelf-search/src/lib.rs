#![forbid(unsafe_code)]

//! Fuzzy ranking over generic record collections.
//!
//! Two entry points:
//!
//! - [`rank_single_key`] scores each record by its best-matching field path,
//!   filters by a threshold, and reports the score and winning path.
//! - [`rank_weighted`] scores each record by a weighted average over field
//!   paths and keeps records above [`WEIGHTED_FLOOR`].
//!
//! Both are stable: records with equal scores keep their collection order.
//! [`MemoRanker`] caches recent single-key queries.

pub mod memo;
pub mod options;
pub mod rank;

pub use memo::{MemoRanker, MemoStats};
pub use options::{MatchMode, SearchOptions, WEIGHTED_FLOOR, WeightedFields};
pub use rank::{
    Hit, Matches, Ranking, SearchResult, match_single_key, match_weighted, rank_single_key,
    rank_weighted,
};
